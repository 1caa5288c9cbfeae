mod aggregate_tests;
mod settlement_tests;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};

use crate::logger::in_memory::InMemoryAuditLog;
use crate::models::{Person, SharedItem, Transaction};
use crate::money::Money;
use crate::service::LedgerService;
use crate::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> LedgerService<InMemoryAuditLog, InMemoryStorage> {
    let storage = InMemoryStorage::new();
    let audit = InMemoryAuditLog::new();
    LedgerService::new(storage, audit)
}

pub fn person(id: &str, name: &str) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        color: id.to_lowercase(),
    }
}

pub fn money(text: &str) -> Money {
    Money::parse(text).unwrap()
}

pub fn allowed(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Builds a transaction with a consistent total from (person, amount)
/// individual entries and (people, amount) shared entries.
pub fn transaction(
    id: &str,
    payer: &str,
    occasion: Option<&str>,
    individual: &[(&str, &str)],
    shared: &[(Vec<&str>, &str)],
    tax: &str,
    tip: &str,
) -> Transaction {
    let mut individual_items: BTreeMap<String, Vec<Money>> = BTreeMap::new();
    for (person, amount) in individual {
        individual_items
            .entry(person.to_string())
            .or_default()
            .push(money(amount));
    }
    let shared_items: Vec<SharedItem> = shared
        .iter()
        .map(|(people, amount)| SharedItem {
            people: people.iter().map(|p| p.to_string()).collect(),
            amount: money(amount),
        })
        .collect();

    let mut tx = Transaction {
        id: id.to_string(),
        reason: format!("test transaction {id}"),
        payer: payer.to_string(),
        date: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        occasion: occasion.map(String::from),
        tax: money(tax),
        tip: money(tip),
        individual_items,
        shared_items,
        total: Money::ZERO,
    };
    tx.total = tx.subtotal() + tx.tax + tx.tip;
    tx
}
