//! The balance and settlement engine: pure, synchronous computation from
//! persisted transactions to "who pays whom".

pub mod aggregate;
pub mod normalize;
pub mod settle;

use serde::Serialize;
use utoipa::ToSchema;

use crate::money::Money;

pub use aggregate::{Scope, compute_balances};
pub use normalize::normalize_transaction;
pub use settle::compute_settlement;

/// Net position of one person over a scope of transactions. Positive means
/// the person is owed money. Derived per request, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct PersonBalance {
    pub person: String,
    #[schema(value_type = String)]
    pub amount: Money,
}

/// A directed payment that settles part of the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    #[schema(value_type = String)]
    pub amount: Money,
}
