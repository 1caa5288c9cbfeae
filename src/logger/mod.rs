use async_trait::async_trait;

use crate::error::LedgerError;
use crate::models::AuditLogEntry;

/// Audit trail port. Every mutation the service performs is recorded here;
/// the computation engine itself never logs.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, entry: AuditLogEntry) -> Result<(), LedgerError>;
    async fn entries(&self) -> Result<Vec<AuditLogEntry>, LedgerError>;
}

pub mod in_memory;
