use chrono::{TimeZone, Utc};

use crate::error::LedgerError;
use crate::models::{Occasion, Person, Transaction};
use crate::money::Money;
use crate::payout::{Scope, compute_balances};
use crate::tests::{money, person, transaction};

fn roster() -> Vec<Person> {
    vec![
        person("a", "Alice"),
        person("b", "Bob"),
        person("c", "Carol"),
    ]
}

fn occasion(id: &str, included: &[&str]) -> Occasion {
    Occasion {
        id: id.to_string(),
        name: format!("occasion {id}"),
        start_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
        included_people: included.iter().map(|p| p.to_string()).collect(),
    }
}

fn ledger() -> Vec<Transaction> {
    vec![
        transaction("t1", "a", Some("o1"), &[("b", "10.00")], &[], "0", "0"),
        transaction("t2", "b", None, &[("c", "5.00")], &[], "0", "0"),
        transaction("t3", "c", Some("o1"), &[("a", "2.50")], &[], "0", "0"),
    ]
}

#[test]
fn occasion_scope_only_counts_its_transactions() {
    let balances = compute_balances(
        &ledger(),
        &Scope::Occasion {
            id: "o1".to_string(),
        },
        &roster(),
        &[occasion("o1", &["a", "b", "c"])],
    )
    .unwrap();

    let expected = [
        ("a", money("10.00") - money("2.50")),
        ("b", -money("10.00")),
        ("c", money("2.50")),
    ];
    assert_eq!(balances.len(), expected.len());
    for (balance, (person, amount)) in balances.iter().zip(expected) {
        assert_eq!(balance.person, person);
        assert_eq!(balance.amount, amount);
    }
}

#[test]
fn unassigned_scope_only_counts_detached_transactions() {
    let balances = compute_balances(
        &ledger(),
        &Scope::Unassigned,
        &roster(),
        &[occasion("o1", &["a", "b", "c"])],
    )
    .unwrap();

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].person, "b");
    assert_eq!(balances[0].amount, money("5.00"));
    assert_eq!(balances[1].person, "c");
    assert_eq!(balances[1].amount, -money("5.00"));
}

#[test]
fn explicit_transaction_list_merges_deltas() {
    let balances = compute_balances(
        &ledger(),
        &Scope::Transactions {
            ids: vec!["t1".to_string(), "t2".to_string()],
        },
        &roster(),
        &[occasion("o1", &["a", "b", "c"])],
    )
    .unwrap();

    let expected = [
        ("a", money("10.00")),
        ("b", -money("5.00")),
        ("c", -money("5.00")),
    ];
    for (balance, (person, amount)) in balances.iter().zip(expected) {
        assert_eq!(balance.person, person);
        assert_eq!(balance.amount, amount);
    }
}

#[test]
fn balances_are_invariant_under_transaction_order() {
    let occasions = [occasion("o1", &["a", "b", "c"])];
    let mut reversed = ledger();
    reversed.reverse();

    let forward = compute_balances(&ledger(), &Scope::Unassigned, &roster(), &occasions).unwrap();
    let backward = compute_balances(&reversed, &Scope::Unassigned, &roster(), &occasions).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn balances_always_sum_to_zero() {
    let occasions = [occasion("o1", &["a", "b", "c"])];
    for scope in [
        Scope::Occasion {
            id: "o1".to_string(),
        },
        Scope::Unassigned,
        Scope::Transactions {
            ids: vec!["t1".to_string(), "t3".to_string()],
        },
    ] {
        let balances = compute_balances(&ledger(), &scope, &roster(), &occasions).unwrap();
        let sum: Money = balances.iter().map(|b| b.amount).sum();
        assert!(sum.is_zero(), "balances for {scope:?} sum to {sum}");
    }
}

#[test]
fn unknown_occasion_scope_is_rejected() {
    let result = compute_balances(
        &ledger(),
        &Scope::Occasion {
            id: "nope".to_string(),
        },
        &roster(),
        &[occasion("o1", &["a", "b", "c"])],
    );
    assert!(matches!(result, Err(LedgerError::OccasionNotFound(_))));
}

#[test]
fn unknown_transaction_id_is_rejected() {
    let result = compute_balances(
        &ledger(),
        &Scope::Transactions {
            ids: vec!["t1".to_string(), "missing".to_string()],
        },
        &roster(),
        &[occasion("o1", &["a", "b", "c"])],
    );
    assert!(matches!(result, Err(LedgerError::TransactionNotFound(_))));
}

#[test]
fn occasion_membership_is_enforced_per_transaction() {
    // t3 allocates to a, who is not included in the narrowed occasion.
    let result = compute_balances(
        &ledger(),
        &Scope::Occasion {
            id: "o1".to_string(),
        },
        &roster(),
        &[occasion("o1", &["b", "c"])],
    );
    assert!(matches!(result, Err(LedgerError::MalformedTransaction(_))));
}
