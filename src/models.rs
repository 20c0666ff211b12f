use serde::{Deserialize, Serialize};

/// A Pokémon record as stored in Redis and returned by the API
///
/// Field names on the wire are `name`, `type`, `xp`, `power` and `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Pokemon {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "xp")]
    pub experience: i64,
    pub power: String,
    pub level: i64,
}
