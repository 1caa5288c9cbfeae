use std::collections::HashMap;

use crate::error::LedgerError;
use crate::money::Money;
use crate::payout::{PersonBalance, Transfer, compute_settlement};
use crate::tests::money;

fn balance(person: &str, cents: i64) -> PersonBalance {
    PersonBalance {
        person: person.to_string(),
        amount: Money::from_cents(cents),
    }
}

/// Applies every transfer to the starting balances and asserts the result
/// is all-zero.
fn assert_settles(balances: &[PersonBalance], transfers: &[Transfer]) {
    let mut remaining: HashMap<&str, Money> = balances
        .iter()
        .map(|b| (b.person.as_str(), b.amount))
        .collect();
    for transfer in transfers {
        *remaining.entry(transfer.from.as_str()).or_default() += transfer.amount;
        *remaining.entry(transfer.to.as_str()).or_default() -= transfer.amount;
    }
    for (person, amount) in remaining {
        assert!(amount.is_zero(), "{person} left with {amount}");
    }
}

#[test]
fn settles_three_way_split() {
    let balances = [balance("a", 1500), balance("b", -500), balance("c", -1000)];
    let transfers = compute_settlement(&balances).unwrap();

    assert_eq!(
        transfers,
        vec![
            Transfer {
                from: "c".to_string(),
                to: "a".to_string(),
                amount: money("10.00"),
            },
            Transfer {
                from: "b".to_string(),
                to: "a".to_string(),
                amount: money("5.00"),
            },
        ]
    );
    assert_settles(&balances, &transfers);
}

#[test]
fn settles_the_single_payer_dinner() {
    // Deltas from: payer a fronts 30.00, b consumed 20.00, c 10.00.
    let balances = [balance("a", 3000), balance("b", -2000), balance("c", -1000)];
    let transfers = compute_settlement(&balances).unwrap();

    assert_eq!(transfers.len(), 2);
    assert_eq!(transfers[0].from, "b");
    assert_eq!(transfers[0].to, "a");
    assert_eq!(transfers[0].amount, money("20.00"));
    assert_eq!(transfers[1].from, "c");
    assert_eq!(transfers[1].amount, money("10.00"));
    assert_settles(&balances, &transfers);
}

#[test]
fn two_people_need_one_transfer() {
    let balances = [balance("a", -100), balance("b", 100)];
    let transfers = compute_settlement(&balances).unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].from, "a");
    assert_eq!(transfers[0].to, "b");
    assert_eq!(transfers[0].amount, money("1.00"));
}

#[test]
fn equal_magnitudes_break_ties_by_person_id() {
    let balances = [balance("b", 1000), balance("a", 1000), balance("c", -2000)];
    let transfers = compute_settlement(&balances).unwrap();

    assert_eq!(transfers.len(), 2);
    assert_eq!(transfers[0].from, "c");
    assert_eq!(transfers[0].to, "a");
    assert_eq!(transfers[1].from, "c");
    assert_eq!(transfers[1].to, "b");
    assert_settles(&balances, &transfers);
}

#[test]
fn settlement_is_idempotent() {
    let balances = [
        balance("a", 812),
        balance("b", -333),
        balance("c", -479),
        balance("d", 0),
    ];
    let first = compute_settlement(&balances).unwrap();
    let second = compute_settlement(&balances).unwrap();
    assert_eq!(first, second);
}

#[test]
fn never_emits_more_than_n_minus_one_transfers() {
    let cases: Vec<Vec<PersonBalance>> = vec![
        vec![
            balance("a", 100),
            balance("b", 200),
            balance("c", -150),
            balance("d", -150),
        ],
        vec![
            balance("a", 5000),
            balance("b", -1000),
            balance("c", -1000),
            balance("d", -1000),
            balance("e", -2000),
        ],
        vec![balance("a", 1), balance("b", -1)],
    ];
    for balances in cases {
        let transfers = compute_settlement(&balances).unwrap();
        assert!(
            transfers.len() <= balances.len() - 1,
            "{} transfers for {} people",
            transfers.len(),
            balances.len()
        );
        assert_settles(&balances, &transfers);
    }
}

#[test]
fn output_is_ordered_by_descending_amount() {
    let balances = [
        balance("a", 700),
        balance("b", 300),
        balance("c", -600),
        balance("d", -400),
    ];
    let transfers = compute_settlement(&balances).unwrap();
    for pair in transfers.windows(2) {
        assert!(pair[0].amount >= pair[1].amount);
    }
    assert_settles(&balances, &transfers);
}

#[test]
fn zero_balances_produce_no_transfers() {
    let balances = [balance("a", 0), balance("b", 0)];
    assert!(compute_settlement(&balances).unwrap().is_empty());
    assert!(compute_settlement(&[]).unwrap().is_empty());
}

#[test]
fn rejects_balances_that_do_not_sum_to_zero() {
    let result = compute_settlement(&[balance("a", 100), balance("b", -50)]);
    assert!(matches!(result, Err(LedgerError::UnbalancedLedger(_))));

    let result = compute_settlement(&[balance("a", 100)]);
    assert!(matches!(result, Err(LedgerError::UnbalancedLedger(_))));
}
