use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How a material row is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingType {
    /// Each row carries its own quantity, rate and amount
    Unit,
    /// Row belongs to a group; the group's total_amount is the lump sum
    GroupedDetail,
}

impl FromStr for PricingType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNIT" => Ok(Self::Unit),
            "GROUPED_DETAIL" => Ok(Self::GroupedDetail),
            _ => Err(()),
        }
    }
}

/// Lump-sum list of material rows sharing one total amount
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaterialGroup {
    pub id: i64,
    pub letter_id: i64,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub total_amount: f64,
}

/// Material line item on a letter
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaterialItem {
    pub id: i64,
    pub letter_id: i64,
    pub group_id: Option<i64>,
    pub sl_no: Option<i64>,
    pub description: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
    pub pricing_type: PricingType,
    pub remarks: Option<String>,
}

#[derive(Debug, Default)]
pub struct GroupUpdate {
    pub total_amount: Option<f64>,
    pub quantity: Option<f64>,
    pub unit: Option<Option<String>>,
}

#[derive(Debug, Default)]
pub struct ItemUpdate {
    pub description: Option<String>,
    pub pricing_type: Option<PricingType>,
    pub group_id: Option<i64>,
    pub quantity: Option<f64>,
    pub unit: Option<Option<String>>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
}

/// Resolve the amount of a UNIT-priced row: an explicit amount wins,
/// otherwise quantity x rate when both are present.
pub fn resolve_unit_amount(
    quantity: Option<f64>,
    rate: Option<f64>,
    explicit_amount: Option<f64>,
) -> Option<f64> {
    explicit_amount.or_else(|| match (quantity, rate) {
        (Some(quantity), Some(rate)) => Some(quantity * rate),
        _ => None,
    })
}
