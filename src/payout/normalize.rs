use std::collections::{BTreeMap, BTreeSet};

use crate::constants::SPLIT_TOLERANCE_CENTS;
use crate::error::LedgerError;
use crate::models::Transaction;
use crate::money::Money;

/// Turns one transaction into per-person signed deltas: what the payer is
/// owed, and what each participant consumed. The deltas always sum to
/// exactly zero.
///
/// Tax and tip are apportioned pro-rata by consumption share, or evenly
/// across the participants when the subtotal is zero. `allowed` is the
/// occasion's included-people set, or the full roster for unassigned
/// transactions.
pub fn normalize_transaction(
    tx: &Transaction,
    allowed: &BTreeSet<String>,
) -> Result<BTreeMap<String, Money>, LedgerError> {
    if !allowed.contains(&tx.payer) {
        return Err(LedgerError::MalformedTransaction(format!(
            "payer {} is not in the allowed set",
            tx.payer
        )));
    }

    let participants = tx.participants();
    for person in &participants {
        if !allowed.contains(person) {
            return Err(LedgerError::MalformedTransaction(format!(
                "allocation references {person}, who is not in the allowed set"
            )));
        }
    }

    // What each participant consumed, before tax and tip.
    let mut consumed: BTreeMap<String, Money> = participants
        .iter()
        .map(|person| (person.clone(), Money::ZERO))
        .collect();

    for (person, amounts) in &tx.individual_items {
        if amounts.is_empty() {
            continue;
        }
        let sum: Money = amounts.iter().copied().sum();
        *consumed.entry(person.clone()).or_default() += sum;
    }

    for item in &tx.shared_items {
        if item.people.is_empty() {
            if item.amount.is_zero() {
                continue;
            }
            return Err(LedgerError::MalformedTransaction(
                "shared item has an amount but no participants".to_string(),
            ));
        }
        let sharers: Vec<&String> = item
            .people
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let shares = item.amount.split_even(sharers.len());
        for (person, share) in sharers.into_iter().zip(shares) {
            *consumed.entry(person.clone()).or_default() += share;
        }
    }

    let subtotal: Money = consumed.values().copied().sum();
    let extras = tx.tax + tx.tip;
    let total = subtotal + extras;

    if (tx.total - total).cents().abs() > SPLIT_TOLERANCE_CENTS {
        return Err(LedgerError::MalformedTransaction(format!(
            "total {} does not match tax + tip + allocations {total}",
            tx.total
        )));
    }

    if participants.is_empty() {
        if total.is_zero() {
            return Ok(BTreeMap::new());
        }
        return Err(LedgerError::MalformedTransaction(
            "transaction has amounts but no participants".to_string(),
        ));
    }

    // Pro-rata by consumption share; even split when nothing was consumed
    // individually (apportion falls back to an even split on zero weight).
    let weights: Vec<Money> = consumed.values().copied().collect();
    let apportioned = extras.apportion(&weights);
    for (share, amount) in consumed.values_mut().zip(apportioned) {
        *share += amount;
    }

    let mut deltas: BTreeMap<String, Money> = BTreeMap::new();
    for (person, share) in &consumed {
        deltas.insert(person.clone(), -*share);
    }
    *deltas.entry(tx.payer.clone()).or_insert(Money::ZERO) += total;

    Ok(deltas)
}
