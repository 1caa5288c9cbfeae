/// Tolerance in minor units when checking a declared total against the sum
/// of its parts. Upstream input may have passed through floating point once.
pub const SPLIT_TOLERANCE_CENTS: i64 = 1;

/// Sentinel occasion id used by the upstream data format for transactions
/// that are not attached to any occasion.
pub const NO_OCCASION: &str = "None";
