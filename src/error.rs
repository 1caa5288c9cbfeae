use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LedgerError {
    /// Monetary input that is not a non-negative amount with at most two
    /// fractional digits after rounding
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transaction whose total disagrees with its allocations, or whose
    /// allocations reference people outside the allowed set
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),

    /// Balances do not sum to zero, or settlement could not resolve them
    #[error("Unbalanced ledger: {0}")]
    UnbalancedLedger(String),

    /// Person with given ID not found in the roster
    #[error("Person {0} not found")]
    PersonNotFound(String),

    /// Occasion with given ID not found
    #[error("Occasion {0} not found")]
    OccasionNotFound(String),

    /// Transaction with given ID not found
    #[error("Transaction {0} not found")]
    TransactionNotFound(String),

    /// Occasion end does not follow its start
    #[error("Invalid occasion window: {0}")]
    InvalidTimeWindow(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}
