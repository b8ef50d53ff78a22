use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Workflow state of a booking letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LetterState {
    Draft,
    Proposal,
    Approved,
    Cancelled,
}

impl FromStr for LetterState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PROPOSAL" => Ok(Self::Proposal),
            "APPROVED" => Ok(Self::Approved),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(()),
        }
    }
}

/// What the lorry does at the far end of the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FarEndAction {
    Load,
    Unload,
}

impl FromStr for FarEndAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "load" => Ok(Self::Load),
            "unload" => Ok(Self::Unload),
            _ => Err(()),
        }
    }
}

/// Booking letter. `booking_serial` counts per agreement; `letter_number`
/// is the globally unique display identifier derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LetterRecord {
    pub id: i64,
    pub letter_number: String,
    pub date: NaiveDate,
    pub state: LetterState,
    pub booking_serial: i64,
    pub company_id: i64,
    pub lorry_id: i64,
    pub route_id: i64,
    pub agreement_id: Option<i64>,
    pub placement_date: Option<NaiveDate>,
    pub is_for_home_depot: bool,
    pub loading_at_home_depot: bool,
    pub far_end_action: Option<FarEndAction>,
    pub remarks: Option<String>,
}

/// Fields for a new letter; serial, number, state and date are derived
#[derive(Debug)]
pub struct NewLetter {
    pub lorry_id: i64,
    pub route_id: i64,
    pub is_for_home_depot: bool,
    pub loading_at_home_depot: bool,
    pub far_end_action: Option<FarEndAction>,
    pub placement_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

/// Partial update for a letter. Outer `None` skips the field; the double
/// options clear the stored value when the inner value is `None`.
/// Booking serial and letter number are never updated.
#[derive(Debug, Default)]
pub struct LetterUpdate {
    pub lorry_id: Option<i64>,
    pub route_id: Option<i64>,
    pub is_for_home_depot: Option<bool>,
    pub loading_at_home_depot: Option<bool>,
    pub far_end_action: Option<Option<FarEndAction>>,
    pub placement_date: Option<Option<NaiveDate>>,
    pub remarks: Option<Option<String>>,
    pub state: Option<LetterState>,
}

/// Build the human-friendly letter number for an agreement and serial.
/// Falls back to `AG<id>` when the LOA number is blank.
/// Example: `LOA-1234-0007`
pub fn make_letter_number(loa_number: &str, agreement_id: i64, serial: i64) -> String {
    let trimmed = loa_number.trim();
    if trimmed.is_empty() {
        format!("AG{}-{:04}", agreement_id, serial)
    } else {
        format!("{}-{:04}", trimmed, serial)
    }
}
