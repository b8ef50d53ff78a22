use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lorry master data referenced by booking letters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LorryDetails {
    pub id: i64,
    pub capacity: String,
    pub carrier_size: String,
    pub number_of_wheels: Option<i64>,
    pub remarks: String,
}

#[derive(Debug, Default)]
pub struct LorryUpdate {
    pub capacity: Option<String>,
    pub carrier_size: Option<String>,
    pub number_of_wheels: Option<i64>,
    pub remarks: Option<String>,
}
