use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::LedgerError;
use crate::models::{Occasion, Person, Transaction};
use crate::storage::Storage;

/// In-memory storage for tests and single-process deployments.
pub struct InMemoryStorage {
    people: Mutex<HashMap<String, Person>>,
    occasions: Mutex<HashMap<String, Occasion>>,
    transactions: Mutex<HashMap<String, Transaction>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            people: Mutex::new(HashMap::new()),
            occasions: Mutex::new(HashMap::new()),
            transactions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn upsert_person(&self, person: Person) -> Result<Person, LedgerError> {
        let mut people = self.people.lock().await;
        people.insert(person.id.clone(), person.clone());
        Ok(person)
    }

    async fn get_person(&self, id: &str) -> Result<Option<Person>, LedgerError> {
        Ok(self.people.lock().await.get(id).cloned())
    }

    async fn list_people(&self) -> Result<Vec<Person>, LedgerError> {
        let mut people: Vec<Person> = self.people.lock().await.values().cloned().collect();
        people.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(people)
    }

    async fn create_occasion(&self, occasion: Occasion) -> Result<Occasion, LedgerError> {
        let mut occasions = self.occasions.lock().await;
        occasions.insert(occasion.id.clone(), occasion.clone());
        Ok(occasion)
    }

    async fn update_occasion(&self, occasion: Occasion) -> Result<Occasion, LedgerError> {
        let mut occasions = self.occasions.lock().await;
        if !occasions.contains_key(&occasion.id) {
            return Err(LedgerError::OccasionNotFound(occasion.id));
        }
        occasions.insert(occasion.id.clone(), occasion.clone());
        Ok(occasion)
    }

    async fn delete_occasion(&self, id: &str) -> Result<(), LedgerError> {
        let mut occasions = self.occasions.lock().await;
        occasions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::OccasionNotFound(id.to_string()))
    }

    async fn get_occasion(&self, id: &str) -> Result<Option<Occasion>, LedgerError> {
        Ok(self.occasions.lock().await.get(id).cloned())
    }

    async fn list_occasions(&self) -> Result<Vec<Occasion>, LedgerError> {
        let mut occasions: Vec<Occasion> =
            self.occasions.lock().await.values().cloned().collect();
        occasions.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        Ok(occasions)
    }

    async fn create_transaction(&self, tx: Transaction) -> Result<Transaction, LedgerError> {
        let mut transactions = self.transactions.lock().await;
        transactions.insert(tx.id.clone(), tx.clone());
        Ok(tx)
    }

    async fn update_transaction(&self, tx: Transaction) -> Result<Transaction, LedgerError> {
        let mut transactions = self.transactions.lock().await;
        if !transactions.contains_key(&tx.id) {
            return Err(LedgerError::TransactionNotFound(tx.id));
        }
        transactions.insert(tx.id.clone(), tx.clone());
        Ok(tx)
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.lock().await;
        transactions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))
    }

    async fn get_transaction(&self, id: &str) -> Result<Option<Transaction>, LedgerError> {
        Ok(self.transactions.lock().await.get(id).cloned())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let mut transactions: Vec<Transaction> =
            self.transactions.lock().await.values().cloned().collect();
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(transactions)
    }

    async fn reassign_occasion(&self, occasion_id: &str) -> Result<usize, LedgerError> {
        let mut transactions = self.transactions.lock().await;
        let mut reassigned = 0;
        for tx in transactions.values_mut() {
            if tx.occasion.as_deref() == Some(occasion_id) {
                tx.occasion = None;
                reassigned += 1;
            }
        }
        Ok(reassigned)
    }
}
