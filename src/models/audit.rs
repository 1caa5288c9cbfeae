use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub enum AuditAction {
    AddPerson,
    CreateOccasion,
    UpdateOccasion,
    DeleteOccasion,
    DisconnectTransactions,
    CreateTransaction,
    UpdateTransaction,
    DeleteTransaction,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct AuditLogEntry {
    pub id: String,
    pub action: AuditAction,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new<T: Serialize>(action: AuditAction, payload: &T) -> Self {
        AuditLogEntry {
            id: Uuid::new_v4().to_string(),
            action,
            payload: serde_json::to_string(payload).unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}
