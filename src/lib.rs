pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod models;
pub mod money;
pub mod payout;
pub mod service;
pub mod storage;

pub use error::LedgerError;
pub use logger::in_memory::InMemoryAuditLog;
pub use money::Money;
pub use service::LedgerService;
pub use storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
