use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    db::lorry_store::LorryStore,
    error::Result,
    handlers::{AppState, number_field, redirect_to_tab, text_field},
    models::lorry::LorryUpdate,
};

#[derive(Debug, Deserialize)]
pub struct LorryForm {
    pub capacity: Option<String>,
    pub carrier_size: Option<String>,
    pub number_of_wheels: Option<String>,
    pub remarks: Option<String>,
}

/// Create lorry handler
pub async fn add_lorry(
    State(state): State<AppState>,
    Form(form): Form<LorryForm>,
) -> Result<impl IntoResponse> {
    let store = LorryStore::new(state.pool);

    let (Some(capacity), Some(carrier_size)) =
        (text_field(&form.capacity), text_field(&form.carrier_size))
    else {
        return Ok(redirect_to_tab("#lorry"));
    };

    let number_of_wheels = number_field::<i64>(&form.number_of_wheels);
    let remarks = text_field(&form.remarks).unwrap_or_default();

    store
        .insert(&capacity, &carrier_size, number_of_wheels, &remarks)
        .await?;
    Ok(redirect_to_tab("#lorry"))
}

/// Partial lorry update
pub async fn edit_lorry(
    State(state): State<AppState>,
    Path(lorry_id): Path<i64>,
    Form(form): Form<LorryForm>,
) -> Result<impl IntoResponse> {
    let store = LorryStore::new(state.pool);

    let update = LorryUpdate {
        capacity: text_field(&form.capacity),
        carrier_size: text_field(&form.carrier_size),
        number_of_wheels: number_field(&form.number_of_wheels),
        remarks: form.remarks.as_deref().map(|s| s.trim().to_string()),
    };

    store.update(lorry_id, update).await?;
    Ok(redirect_to_tab("#lorry"))
}

/// GET /admin/api/lorries
pub async fn api_lorries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let store = LorryStore::new(state.pool);
    let lorries = store.get_all().await?;
    Ok(Json(json!({ "lorries": lorries })))
}
