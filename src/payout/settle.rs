use std::cmp::Ordering;

use crate::error::LedgerError;
use crate::money::Money;
use crate::payout::{PersonBalance, Transfer};

/// Converts net balances into a minimal transfer list that zeroes every
/// balance.
///
/// Greedy largest-magnitude matching: repeatedly pair the largest creditor
/// with the largest debtor. Each step retires at least one party, so at
/// most N-1 transfers are emitted for N participants. Ties pick the
/// lexicographically smaller person id, and the output is ordered by
/// descending amount then debtor id, keeping the result deterministic.
pub fn compute_settlement(balances: &[PersonBalance]) -> Result<Vec<Transfer>, LedgerError> {
    let residual: Money = balances.iter().map(|b| b.amount).sum();
    if !residual.is_zero() {
        return Err(LedgerError::UnbalancedLedger(format!(
            "balances sum to {residual}, expected zero"
        )));
    }

    let mut creditors: Vec<(String, Money)> = Vec::new();
    let mut debtors: Vec<(String, Money)> = Vec::new();
    for balance in balances {
        if balance.amount.is_zero() {
            continue;
        }
        if balance.amount > Money::ZERO {
            creditors.push((balance.person.clone(), balance.amount));
        } else {
            debtors.push((balance.person.clone(), balance.amount.abs()));
        }
    }

    let mut transfers = Vec::new();
    while !creditors.is_empty() && !debtors.is_empty() {
        let ci = pick_largest(&creditors);
        let di = pick_largest(&debtors);

        let amount = creditors[ci].1.min(debtors[di].1);
        transfers.push(Transfer {
            from: debtors[di].0.clone(),
            to: creditors[ci].0.clone(),
            amount,
        });

        creditors[ci].1 -= amount;
        debtors[di].1 -= amount;
        if creditors[ci].1.is_zero() {
            creditors.swap_remove(ci);
        }
        if debtors[di].1.is_zero() {
            debtors.swap_remove(di);
        }
    }

    // Unreachable once the sum check passed; guards the invariant anyway.
    if !creditors.is_empty() || !debtors.is_empty() {
        return Err(LedgerError::UnbalancedLedger(
            "settlement exhausted one side with balances remaining".to_string(),
        ));
    }

    transfers.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.from.cmp(&b.from))
            .then_with(|| a.to.cmp(&b.to))
    });
    Ok(transfers)
}

fn pick_largest(entries: &[(String, Money)]) -> usize {
    let mut best = 0;
    for i in 1..entries.len() {
        match entries[i].1.cmp(&entries[best].1) {
            Ordering::Greater => best = i,
            Ordering::Equal if entries[i].0 < entries[best].0 => best = i,
            _ => {}
        }
    }
    best
}
