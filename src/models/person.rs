use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Roster reference data. People are looked up by id and are not owned by
/// any transaction or occasion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Person {
    pub id: String,
    pub name: String,
    /// Display color key used by the host UI for avatars.
    pub color: String,
}
