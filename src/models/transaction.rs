use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::money::Money;

/// An allocation consumed jointly by the listed people, split evenly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SharedItem {
    pub people: Vec<String>,
    #[schema(value_type = String)]
    pub amount: Money,
}

impl SharedItem {
    /// Trailing empty entries are a UI affordance of the edit drawer; they
    /// must never be persisted.
    pub fn is_placeholder(&self) -> bool {
        self.people.is_empty() && self.amount.is_zero()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: String,
    pub reason: String,
    /// The person who fronted the money.
    pub payer: String,
    pub date: DateTime<Utc>,
    /// `None` is serialized as the upstream "None" sentinel.
    #[serde(with = "occasion_ref")]
    #[schema(value_type = String)]
    pub occasion: Option<String>,
    #[schema(value_type = String)]
    pub tax: Money,
    #[schema(value_type = String)]
    pub tip: Money,
    /// Per-person ordered lists of individually consumed amounts.
    #[schema(value_type = Object)]
    pub individual_items: BTreeMap<String, Vec<Money>>,
    pub shared_items: Vec<SharedItem>,
    /// tax + tip + all individual and shared amounts.
    #[schema(value_type = String)]
    pub total: Money,
}

impl Transaction {
    /// Sum of all individual and shared amounts, excluding tax and tip.
    pub fn subtotal(&self) -> Money {
        let individual: Money = self
            .individual_items
            .values()
            .flat_map(|amounts| amounts.iter().copied())
            .sum();
        let shared: Money = self.shared_items.iter().map(|item| item.amount).sum();
        individual + shared
    }

    /// Everyone referenced by an individual or shared allocation.
    pub fn participants(&self) -> BTreeSet<String> {
        let mut people = BTreeSet::new();
        for (person, amounts) in &self.individual_items {
            if !amounts.is_empty() {
                people.insert(person.clone());
            }
        }
        for item in &self.shared_items {
            for person in &item.people {
                people.insert(person.clone());
            }
        }
        people
    }
}

/// Editable transaction fields as submitted by the host editor. The id and
/// the canonical total are assigned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionDraft {
    pub reason: String,
    pub payer: String,
    pub date: DateTime<Utc>,
    #[serde(with = "occasion_ref", default)]
    #[schema(value_type = String)]
    pub occasion: Option<String>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub tax: Money,
    #[serde(default)]
    #[schema(value_type = String)]
    pub tip: Money,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub individual_items: BTreeMap<String, Vec<Money>>,
    #[serde(default)]
    pub shared_items: Vec<SharedItem>,
    /// Total as the editor displayed it; verified against the recomputed
    /// total when present.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub total: Option<Money>,
}

/// Maps the upstream "None" occasion sentinel to `Option::None`.
pub(crate) mod occasion_ref {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::constants::NO_OCCASION;

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(id) => serializer.serialize_str(id),
            None => serializer.serialize_str(NO_OCCASION),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == NO_OCCASION || raw.is_empty() {
            Ok(None)
        } else {
            Ok(Some(raw))
        }
    }
}
