use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Freight rate agreement (LOA) for a company.
///
/// `is_active` marks the agreement new bookings are billed against; the
/// schema guarantees at most one active row per activation scope.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Agreement {
    pub id: i64,
    pub company_id: i64,
    pub loa_number: String,
    pub total_mt_km: f64,
    pub rate_per_mt_km: f64,
    pub is_active: bool,
}

/// Agreement row joined with its company name for API listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AgreementDto {
    pub id: i64,
    pub company_id: i64,
    pub company_name: Option<String>,
    pub loa_number: String,
    pub total_mt_km: f64,
    pub rate_per_mt_km: f64,
    pub is_active: bool,
}

#[derive(Debug, Default)]
pub struct AgreementUpdate {
    pub company_id: Option<i64>,
    pub loa_number: Option<String>,
    pub total_mt_km: Option<f64>,
    pub rate_per_mt_km: Option<f64>,
}
