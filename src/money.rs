use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LedgerError;

/// A monetary value in integer minor units (cents).
///
/// All ledger arithmetic runs on this type so that repeated addition and
/// subtraction of many small allocations stays exact. Values at rest carry
/// two fractional digits; `Display` and serde use the `"12.34"` form the
/// upstream data format stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Money {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parses a non-negative decimal amount, rounding half-up past two
    /// fractional digits.
    pub fn parse(text: &str) -> Result<Money, LedgerError> {
        let invalid = || LedgerError::InvalidAmount(text.to_string());

        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('+') || trimmed.starts_with('-') {
            return Err(invalid());
        }

        let (units_part, frac_part) = match trimmed.split_once('.') {
            Some((units, frac)) => (units, frac),
            None => (trimmed, ""),
        };
        if units_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !units_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if units_part.is_empty() {
            0
        } else {
            units_part.parse().map_err(|_| invalid())?
        };

        let mut frac = frac_part.bytes().map(|b| i64::from(b - b'0'));
        let tenths = frac.next().unwrap_or(0);
        let hundredths = frac.next().unwrap_or(0);
        let round_up = frac.next().is_some_and(|digit| digit >= 5);

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths))
            .and_then(|c| c.checked_add(i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Money(cents))
    }

    /// Converts a non-negative float (e.g. a JSON number) to the nearest cent.
    pub fn from_float(value: f64) -> Result<Money, LedgerError> {
        if !value.is_finite() || value < 0.0 {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        let cents = (value * 100.0).round();
        if cents > i64::MAX as f64 {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        Ok(Money(cents as i64))
    }

    /// True when the magnitude is below one minor unit. Internally exact, so
    /// this is simply equality with zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn abs(self) -> Money {
        Money(self.0.abs())
    }

    /// Splits a non-negative amount into `n` parts differing by at most one
    /// cent, earlier parts taking the leftover cents. The parts always sum
    /// back to `self`.
    pub fn split_even(self, n: usize) -> Vec<Money> {
        if n == 0 {
            return Vec::new();
        }
        let n = n as i64;
        let base = self.0 / n;
        let leftover = self.0 % n;
        (0..n)
            .map(|i| Money(if i < leftover { base + 1 } else { base }))
            .collect()
    }

    /// Apportions a non-negative amount pro-rata by weight using the
    /// largest-remainder method, so the shares sum back to `self` exactly.
    /// A zero total weight falls back to an even split.
    pub fn apportion(self, weights: &[Money]) -> Vec<Money> {
        if weights.is_empty() {
            return Vec::new();
        }
        let total_weight: i128 = weights.iter().map(|w| w.0 as i128).sum();
        if total_weight <= 0 {
            return self.split_even(weights.len());
        }

        let target = self.0 as i128;
        let mut shares = Vec::with_capacity(weights.len());
        let mut remainders = Vec::with_capacity(weights.len());
        let mut assigned: i128 = 0;
        for (idx, weight) in weights.iter().enumerate() {
            let numerator = target * weight.0 as i128;
            let share = numerator.div_euclid(total_weight);
            assigned += share;
            shares.push(share as i64);
            remainders.push((numerator.rem_euclid(total_weight), idx));
        }

        // Leftover cents go to the largest remainders, index as tie-break.
        let leftover = (target - assigned) as usize;
        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for &(_, idx) in remainders.iter().take(leftover) {
            shares[idx] += 1;
        }

        shares.into_iter().map(Money).collect()
    }

    /// Whole-percent share of a non-negative amount, rounded half-up.
    /// Mirrors the tip calculator in the edit flow.
    pub fn percent(self, percent: u32) -> Money {
        Money((self.0 * i64::from(percent) + 50) / 100)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative decimal amount as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                Money::parse(v).map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Money::from_float(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                Money::from_float(v as f64).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Money::from_float(v as f64).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}
