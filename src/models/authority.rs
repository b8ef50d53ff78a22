use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Authority in charge of a location, referenced by route stops
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationAuthority {
    pub id: i64,
    pub location: String,
    pub authority: String,
    pub address: String,
}

#[derive(Debug, Default)]
pub struct AuthorityUpdate {
    pub location: Option<String>,
    pub authority: Option<String>,
    pub address: Option<String>,
}
