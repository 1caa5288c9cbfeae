use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where an occasion's window sits relative to "now". Derived on demand,
/// never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeState {
    Upcoming,
    Active,
    Past,
}

/// A named, time-bounded grouping of transactions among a subset of the
/// roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Occasion {
    pub id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub included_people: Vec<String>,
}

impl Occasion {
    pub fn time_state(&self, now: DateTime<Utc>) -> TimeState {
        if now < self.start_date {
            TimeState::Upcoming
        } else if now > self.end_date {
            TimeState::Past
        } else {
            TimeState::Active
        }
    }

    pub fn includes(&self, person_id: &str) -> bool {
        self.included_people.iter().any(|id| id == person_id)
    }
}
