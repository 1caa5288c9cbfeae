use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::LedgerError;
use crate::models::{Occasion, TimeState, TransactionDraft};

// Request structs for JSON payloads

#[derive(Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateOccasionRequest {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub included_people: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateOccasionRequest {
    pub name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub included_people: Option<Vec<String>>,
}

#[derive(Deserialize, ToSchema)]
pub struct PreviewRequest {
    #[serde(flatten)]
    pub draft: TransactionDraft,
    /// Tip calculator percentage, e.g. 15, 18 or 20.
    pub tip_percent: Option<u32>,
    /// Also compute per-person deltas; requires a fully-formed draft.
    #[serde(default)]
    pub include_deltas: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct PayoutRequest {
    pub scope: crate::payout::Scope,
}

// Response structs

/// Occasion plus its derived time-state, which is never stored.
#[derive(Serialize, ToSchema)]
pub struct OccasionResponse {
    pub id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub included_people: Vec<String>,
    pub time_state: TimeState,
}

impl OccasionResponse {
    pub fn new(occasion: Occasion, now: DateTime<Utc>) -> Self {
        let time_state = occasion.time_state(now);
        OccasionResponse {
            id: occasion.id,
            name: occasion.name,
            start_date: occasion.start_date,
            end_date: occasion.end_date,
            included_people: occasion.included_people,
            time_state,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub totals: crate::service::TransactionPreview,
    /// Present when `include_deltas` was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub deltas: Option<std::collections::BTreeMap<String, crate::money::Money>>,
}

#[derive(Serialize, ToSchema)]
pub struct ReassignedResponse {
    pub reassigned: usize,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::InvalidAmount(_)
            | LedgerError::MalformedTransaction(_)
            | LedgerError::InvalidTimeWindow(_) => StatusCode::BAD_REQUEST,
            LedgerError::PersonNotFound(_)
            | LedgerError::OccasionNotFound(_)
            | LedgerError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::UnbalancedLedger(_)
            | LedgerError::StorageError(_)
            | LedgerError::AuditError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
