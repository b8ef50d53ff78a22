use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Position of a stop within a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    From,
    Intermediate,
    To,
}

impl FromStr for StopType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "from" => Ok(Self::From),
            "intermediate" => Ok(Self::Intermediate),
            "to" => Ok(Self::To),
            _ => Err(()),
        }
    }
}

/// Named multi-stop route
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: i64,
    pub name: String,
    pub total_km: Option<i64>,
}

/// Stop on a route. `stop_order` is an explicit caller-assigned position;
/// nothing enforces contiguity or a single from/to pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RouteStop {
    pub id: i64,
    pub route_id: i64,
    pub location: String,
    pub stop_type: StopType,
    pub stop_order: i64,
    pub authority_id: Option<i64>,
}

/// Route with its ordered stops, used by the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct RouteWithStops {
    #[serde(flatten)]
    pub route: Route,
    pub stops: Vec<RouteStop>,
}

#[derive(Debug, Default)]
pub struct RouteUpdate {
    pub name: Option<String>,
    pub total_km: Option<i64>,
}

/// `authority_id: Some(None)` clears the authority reference
#[derive(Debug, Default)]
pub struct StopUpdate {
    pub location: Option<String>,
    pub stop_type: Option<StopType>,
    pub stop_order: Option<i64>,
    pub authority_id: Option<Option<i64>>,
}
