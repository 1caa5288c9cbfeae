use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::logger::AuditLog;
use crate::models::{
    AuditAction, AuditLogEntry, Occasion, Person, Transaction, TransactionDraft,
};
use crate::money::Money;
use crate::payout::{PersonBalance, Scope, Transfer, compute_balances, compute_settlement};
use crate::storage::Storage;

/// Live edit-preview totals, recomputed on demand after each edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct TransactionPreview {
    #[schema(value_type = String)]
    pub subtotal: Money,
    #[schema(value_type = String)]
    pub total: Money,
    /// Suggested tip at the requested percentage of the subtotal.
    #[schema(value_type = Option<String>)]
    pub tip_preview: Option<Money>,
}

pub struct LedgerService<A: AuditLog, S: Storage> {
    storage: S,
    audit: A,
}

impl<A: AuditLog, S: Storage> LedgerService<A, S> {
    pub fn new(storage: S, audit: A) -> Self {
        info!("Initializing LedgerService");
        Self { storage, audit }
    }

    // ROSTER

    pub async fn add_person(&self, person: Person) -> Result<Person, LedgerError> {
        info!("Adding person {} to the roster", person.id);
        let saved = self.storage.upsert_person(person).await?;

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::AddPerson,
                &serde_json::json!({ "person_id": saved.id }),
            ))
            .await?;

        Ok(saved)
    }

    pub async fn list_people(&self) -> Result<Vec<Person>, LedgerError> {
        self.storage.list_people().await
    }

    pub async fn get_person(&self, id: &str) -> Result<Person, LedgerError> {
        self.storage
            .get_person(id)
            .await?
            .ok_or_else(|| LedgerError::PersonNotFound(id.to_string()))
    }

    // OCCASIONS

    pub async fn create_occasion(
        &self,
        name: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        included_people: Vec<String>,
    ) -> Result<Occasion, LedgerError> {
        info!("Creating occasion '{name}'");
        let included_people = self
            .checked_people(start_date, end_date, included_people)
            .await?;

        let occasion = Occasion {
            id: Uuid::new_v4().to_string(),
            name,
            start_date,
            end_date,
            included_people,
        };
        let created = self.storage.create_occasion(occasion).await?;
        debug!("Occasion created with ID: {}", created.id);

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::CreateOccasion,
                &serde_json::json!({ "occasion_id": created.id }),
            ))
            .await?;

        Ok(created)
    }

    pub async fn update_occasion(
        &self,
        id: &str,
        new_name: Option<String>,
        new_window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        new_people: Option<Vec<String>>,
    ) -> Result<Occasion, LedgerError> {
        info!("Updating occasion {id}");
        let mut occasion = self.get_occasion(id).await?;

        if let Some(name) = new_name {
            occasion.name = name;
        }
        if let Some((start_date, end_date)) = new_window {
            occasion.start_date = start_date;
            occasion.end_date = end_date;
        }
        if let Some(people) = new_people {
            occasion.included_people = people;
        }
        occasion.included_people = self
            .checked_people(
                occasion.start_date,
                occasion.end_date,
                occasion.included_people,
            )
            .await?;

        let updated = self.storage.update_occasion(occasion).await?;

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::UpdateOccasion,
                &serde_json::json!({ "occasion_id": updated.id }),
            ))
            .await?;

        Ok(updated)
    }

    /// Deletes the occasion. Its transactions survive: they are first
    /// detached, not deleted. Returns how many were detached.
    pub async fn delete_occasion(&self, id: &str) -> Result<usize, LedgerError> {
        info!("Deleting occasion {id}");
        self.get_occasion(id).await?;

        let reassigned = self.storage.reassign_occasion(id).await?;
        self.storage.delete_occasion(id).await?;
        debug!("Occasion {id} deleted, {reassigned} transactions detached");

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::DeleteOccasion,
                &serde_json::json!({ "occasion_id": id, "reassigned": reassigned }),
            ))
            .await?;

        Ok(reassigned)
    }

    /// Detaches every transaction of the occasion without deleting the
    /// occasion itself.
    pub async fn disconnect_transactions(&self, id: &str) -> Result<usize, LedgerError> {
        info!("Disconnecting transactions from occasion {id}");
        self.get_occasion(id).await?;

        let reassigned = self.storage.reassign_occasion(id).await?;

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::DisconnectTransactions,
                &serde_json::json!({ "occasion_id": id, "reassigned": reassigned }),
            ))
            .await?;

        Ok(reassigned)
    }

    pub async fn list_occasions(&self) -> Result<Vec<Occasion>, LedgerError> {
        self.storage.list_occasions().await
    }

    pub async fn get_occasion(&self, id: &str) -> Result<Occasion, LedgerError> {
        self.storage
            .get_occasion(id)
            .await?
            .ok_or_else(|| LedgerError::OccasionNotFound(id.to_string()))
    }

    // LEDGER

    pub async fn create_transaction(
        &self,
        draft: TransactionDraft,
    ) -> Result<Transaction, LedgerError> {
        info!("Creating transaction '{}'", draft.reason);
        let tx = materialize(Uuid::new_v4().to_string(), draft)?;
        self.validate_transaction(&tx).await?;

        let created = self.storage.create_transaction(tx).await?;
        debug!("Transaction created with ID: {}", created.id);

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::CreateTransaction,
                &serde_json::json!({ "transaction_id": created.id, "total": created.total }),
            ))
            .await?;

        Ok(created)
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        draft: TransactionDraft,
    ) -> Result<Transaction, LedgerError> {
        info!("Updating transaction {id}");
        if self.storage.get_transaction(id).await?.is_none() {
            warn!("Transaction {id} not found for update");
            return Err(LedgerError::TransactionNotFound(id.to_string()));
        }

        let tx = materialize(id.to_string(), draft)?;
        self.validate_transaction(&tx).await?;

        let updated = self.storage.update_transaction(tx).await?;

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::UpdateTransaction,
                &serde_json::json!({ "transaction_id": updated.id, "total": updated.total }),
            ))
            .await?;

        Ok(updated)
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<(), LedgerError> {
        info!("Deleting transaction {id}");
        if self.storage.get_transaction(id).await?.is_none() {
            warn!("Transaction {id} not found for delete");
            return Err(LedgerError::TransactionNotFound(id.to_string()));
        }
        self.storage.delete_transaction(id).await?;

        self.audit
            .record(AuditLogEntry::new(
                AuditAction::DeleteTransaction,
                &serde_json::json!({ "transaction_id": id }),
            ))
            .await?;

        Ok(())
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        self.storage.list_transactions().await
    }

    pub async fn get_transaction(&self, id: &str) -> Result<Transaction, LedgerError> {
        self.storage
            .get_transaction(id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))
    }

    // BALANCES & PAYOUTS

    pub async fn balances(&self, scope: &Scope) -> Result<Vec<PersonBalance>, LedgerError> {
        debug!("Computing balances for scope {scope:?}");
        let transactions = self.storage.list_transactions().await?;
        let roster = self.storage.list_people().await?;
        let occasions = self.storage.list_occasions().await?;
        compute_balances(&transactions, scope, &roster, &occasions)
    }

    pub async fn payouts(&self, scope: &Scope) -> Result<Vec<Transfer>, LedgerError> {
        debug!("Computing payouts for scope {scope:?}");
        let balances = self.balances(scope).await?;
        compute_settlement(&balances)
    }

    // EDIT PREVIEW

    /// Recomputes the running totals the edit drawer shows, including the
    /// tip-calculator suggestion. Pure; ignores any declared total.
    pub fn preview(&self, draft: &TransactionDraft, tip_percent: Option<u32>) -> TransactionPreview {
        let individual: Money = draft
            .individual_items
            .values()
            .flat_map(|amounts| amounts.iter().copied())
            .sum();
        let shared: Money = draft.shared_items.iter().map(|item| item.amount).sum();
        let subtotal = individual + shared;
        TransactionPreview {
            subtotal,
            total: subtotal + draft.tax + draft.tip,
            tip_preview: tip_percent.map(|percent| subtotal.percent(percent)),
        }
    }

    /// Per-person deltas for an in-progress draft, validated the same way a
    /// save would be.
    pub async fn preview_deltas(
        &self,
        draft: TransactionDraft,
    ) -> Result<BTreeMap<String, Money>, LedgerError> {
        let tx = materialize("preview".to_string(), draft)?;
        let allowed = self.allowed_people(&tx.occasion).await?;
        crate::payout::normalize_transaction(&tx, &allowed)
    }

    // AUDIT

    pub async fn audit_entries(&self) -> Result<Vec<AuditLogEntry>, LedgerError> {
        self.audit.entries().await
    }

    // HELPERS

    async fn checked_people(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        people: Vec<String>,
    ) -> Result<Vec<String>, LedgerError> {
        if end_date <= start_date {
            warn!("Rejected occasion window {start_date}..{end_date}");
            return Err(LedgerError::InvalidTimeWindow(format!(
                "{start_date} .. {end_date}"
            )));
        }
        let unique: BTreeSet<String> = people.into_iter().collect();
        for person in &unique {
            if self.storage.get_person(person).await?.is_none() {
                warn!("Occasion references unknown person {person}");
                return Err(LedgerError::PersonNotFound(person.clone()));
            }
        }
        Ok(unique.into_iter().collect())
    }

    async fn allowed_people(
        &self,
        occasion: &Option<String>,
    ) -> Result<BTreeSet<String>, LedgerError> {
        match occasion {
            Some(id) => {
                let occasion = self.get_occasion(id).await?;
                Ok(occasion.included_people.into_iter().collect())
            }
            None => {
                let roster = self.storage.list_people().await?;
                Ok(roster.into_iter().map(|person| person.id).collect())
            }
        }
    }

    async fn validate_transaction(&self, tx: &Transaction) -> Result<(), LedgerError> {
        let allowed = self.allowed_people(&tx.occasion).await?;
        crate::payout::normalize_transaction(tx, &allowed).map(|_| ())
    }
}

/// Finalizes a draft: strips placeholder shared items, recomputes the
/// canonical total and verifies the declared one against it.
fn materialize(id: String, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
    let shared_items: Vec<_> = draft
        .shared_items
        .into_iter()
        .filter(|item| !item.is_placeholder())
        .collect();

    let mut tx = Transaction {
        id,
        reason: draft.reason,
        payer: draft.payer,
        date: draft.date,
        occasion: draft.occasion,
        tax: draft.tax,
        tip: draft.tip,
        individual_items: draft.individual_items,
        shared_items,
        total: Money::ZERO,
    };
    tx.total = tx.subtotal() + tx.tax + tx.tip;

    if let Some(declared) = draft.total {
        if (declared - tx.total).cents().abs() > crate::constants::SPLIT_TOLERANCE_CENTS {
            return Err(LedgerError::MalformedTransaction(format!(
                "declared total {declared} does not match tax + tip + allocations {}",
                tx.total
            )));
        }
    }

    Ok(tx)
}
