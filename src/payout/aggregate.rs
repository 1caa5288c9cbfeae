use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::LedgerError;
use crate::models::{Occasion, Person, Transaction};
use crate::money::Money;
use crate::payout::PersonBalance;
use crate::payout::normalize::normalize_transaction;

/// Which slice of the ledger a payout computation covers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scope {
    /// Every transaction attached to the given occasion.
    Occasion { id: String },
    /// An explicit transaction list, e.g. a single row's payout view.
    Transactions { ids: Vec<String> },
    /// Every transaction with no occasion.
    Unassigned,
}

/// Folds the scoped transactions into one net balance per person, sorted by
/// person id. The balances sum to exactly zero.
///
/// The result is independent of transaction order: per-transaction deltas
/// are exact and addition commutes.
pub fn compute_balances(
    transactions: &[Transaction],
    scope: &Scope,
    roster: &[Person],
    occasions: &[Occasion],
) -> Result<Vec<PersonBalance>, LedgerError> {
    let selected: Vec<&Transaction> = match scope {
        Scope::Occasion { id } => {
            if !occasions.iter().any(|occasion| &occasion.id == id) {
                return Err(LedgerError::OccasionNotFound(id.clone()));
            }
            transactions
                .iter()
                .filter(|tx| tx.occasion.as_deref() == Some(id))
                .collect()
        }
        Scope::Transactions { ids } => {
            let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
            for id in ids {
                if !transactions.iter().any(|tx| &tx.id == id) {
                    return Err(LedgerError::TransactionNotFound(id.clone()));
                }
            }
            transactions
                .iter()
                .filter(|tx| wanted.contains(tx.id.as_str()))
                .collect()
        }
        Scope::Unassigned => transactions
            .iter()
            .filter(|tx| tx.occasion.is_none())
            .collect(),
    };

    let roster_ids: BTreeSet<String> = roster.iter().map(|person| person.id.clone()).collect();

    let mut balances: BTreeMap<String, Money> = BTreeMap::new();
    for tx in selected {
        let allowed = match &tx.occasion {
            Some(occasion_id) => occasions
                .iter()
                .find(|occasion| &occasion.id == occasion_id)
                .map(|occasion| occasion.included_people.iter().cloned().collect())
                .ok_or_else(|| LedgerError::OccasionNotFound(occasion_id.clone()))?,
            None => roster_ids.clone(),
        };
        for (person, delta) in normalize_transaction(tx, &allowed)? {
            *balances.entry(person).or_default() += delta;
        }
    }

    Ok(balances
        .into_iter()
        .map(|(person, amount)| PersonBalance { person, amount })
        .collect())
}
