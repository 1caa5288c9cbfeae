use async_trait::async_trait;

use crate::error::LedgerError;
use crate::models::{Occasion, Person, Transaction};

/// Persistence port for the host application. The engine itself never
/// touches storage; read consistency across concurrent requests is the
/// implementation's concern.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn upsert_person(&self, person: Person) -> Result<Person, LedgerError>;
    async fn get_person(&self, id: &str) -> Result<Option<Person>, LedgerError>;
    async fn list_people(&self) -> Result<Vec<Person>, LedgerError>;

    async fn create_occasion(&self, occasion: Occasion) -> Result<Occasion, LedgerError>;
    async fn update_occasion(&self, occasion: Occasion) -> Result<Occasion, LedgerError>;
    async fn delete_occasion(&self, id: &str) -> Result<(), LedgerError>;
    async fn get_occasion(&self, id: &str) -> Result<Option<Occasion>, LedgerError>;
    async fn list_occasions(&self) -> Result<Vec<Occasion>, LedgerError>;

    async fn create_transaction(&self, tx: Transaction) -> Result<Transaction, LedgerError>;
    async fn update_transaction(&self, tx: Transaction) -> Result<Transaction, LedgerError>;
    async fn delete_transaction(&self, id: &str) -> Result<(), LedgerError>;
    async fn get_transaction(&self, id: &str) -> Result<Option<Transaction>, LedgerError>;
    async fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError>;

    /// Detaches every transaction of the occasion (sets its occasion to
    /// "None"), returning how many were touched.
    async fn reassign_occasion(&self, occasion_id: &str) -> Result<usize, LedgerError>;
}

pub mod in_memory;
