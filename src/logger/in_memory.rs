use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::LedgerError;
use crate::logger::AuditLog;
use crate::models::AuditLogEntry;

#[derive(Clone)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditLogEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        InMemoryAuditLog {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record(&self, entry: AuditLogEntry) -> Result<(), LedgerError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditLogEntry>, LedgerError> {
        let entries = self.entries.read().await;
        Ok(entries.clone())
    }
}
