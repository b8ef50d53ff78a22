use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    db::{authority_store::AuthorityStore, route_store::RouteStore},
    error::Result,
    handlers::{AppState, number_field, redirect_to_tab, text_field},
    models::route::{RouteUpdate, StopType, StopUpdate},
};

#[derive(Debug, Deserialize)]
pub struct RouteForm {
    pub name: Option<String>,
    pub total_km: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StopForm {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub stop_type: Option<String>,
    pub order: Option<String>,
    pub authority_id: Option<String>,
}

/// Create route handler. Stops are appended separately via
/// /route/{id}/stop/add, which keeps this endpoint reusable for the
/// booking flow as well.
pub async fn add_route(
    State(state): State<AppState>,
    Form(form): Form<RouteForm>,
) -> Result<impl IntoResponse> {
    let store = RouteStore::new(state.pool);

    let Some(name) = text_field(&form.name) else {
        return Ok(redirect_to_tab("#route"));
    };

    store.insert(&name, number_field(&form.total_km)).await?;
    Ok(redirect_to_tab("#route"))
}

/// Partial route update (name / total_km)
pub async fn edit_route(
    State(state): State<AppState>,
    Path(route_id): Path<i64>,
    Form(form): Form<RouteForm>,
) -> Result<impl IntoResponse> {
    let store = RouteStore::new(state.pool);

    let update = RouteUpdate {
        name: text_field(&form.name),
        total_km: number_field(&form.total_km),
    };

    store.update(route_id, update).await?;
    Ok(redirect_to_tab("#route"))
}

/// Append a stop to a route; the caller assigns the order explicitly
pub async fn add_route_stop(
    State(state): State<AppState>,
    Path(route_id): Path<i64>,
    Form(form): Form<StopForm>,
) -> Result<impl IntoResponse> {
    let authorities = AuthorityStore::new(state.pool.clone());
    let store = RouteStore::new(state.pool);

    store.get_by_id(route_id).await?;

    let (Some(location), Some(stop_type), Some(order)) = (
        text_field(&form.location),
        text_field(&form.stop_type).and_then(|raw| raw.parse::<StopType>().ok()),
        number_field::<i64>(&form.order),
    ) else {
        return Ok(redirect_to_tab("#route"));
    };

    // Keep the reference only when the authority actually exists
    let mut authority_id = number_field::<i64>(&form.authority_id).filter(|id| *id != 0);
    if let Some(id) = authority_id {
        if authorities.find_by_id(id).await?.is_none() {
            authority_id = None;
        }
    }

    store
        .add_stop(route_id, &location, stop_type, order, authority_id)
        .await?;
    Ok(redirect_to_tab("#route"))
}

/// Partial stop update; authority_id=0 clears the authority reference
pub async fn edit_route_stop(
    State(state): State<AppState>,
    Path(stop_id): Path<i64>,
    Form(form): Form<StopForm>,
) -> Result<impl IntoResponse> {
    let authorities = AuthorityStore::new(state.pool.clone());
    let store = RouteStore::new(state.pool);

    let authority_id = match number_field::<i64>(&form.authority_id) {
        Some(0) => Some(None),
        Some(id) => {
            if authorities.find_by_id(id).await?.is_some() {
                Some(Some(id))
            } else {
                None
            }
        }
        None => None,
    };

    let update = StopUpdate {
        location: text_field(&form.location),
        stop_type: text_field(&form.stop_type).and_then(|raw| raw.parse().ok()),
        stop_order: number_field(&form.order),
        authority_id,
    };

    store.update_stop(stop_id, update).await?;
    Ok(redirect_to_tab("#route"))
}

/// GET /admin/api/routes
pub async fn api_routes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let store = RouteStore::new(state.pool);
    let routes = store.get_all().await?;

    let out: Vec<_> = routes
        .iter()
        .map(|r| json!({ "id": r.id, "name": r.name }))
        .collect();
    Ok(Json(out))
}
