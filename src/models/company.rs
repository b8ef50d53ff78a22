use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Customer company that agreements and booking letters reference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Per-field partial update; `None` leaves the stored value unchanged
#[derive(Debug, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
