pub mod audit;
pub mod occasion;
pub mod person;
pub mod transaction;

pub use audit::{AuditAction, AuditLogEntry};
pub use occasion::{Occasion, TimeState};
pub use person::Person;
pub use transaction::{SharedItem, Transaction, TransactionDraft};
