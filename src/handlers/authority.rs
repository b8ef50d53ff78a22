use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    db::authority_store::AuthorityStore,
    error::Result,
    handlers::{AppState, redirect_to_tab, text_field},
    models::authority::AuthorityUpdate,
};

#[derive(Debug, Deserialize)]
pub struct AuthorityForm {
    pub location: Option<String>,
    pub authority: Option<String>,
    pub address: Option<String>,
}

/// Create authority handler
pub async fn add_authority(
    State(state): State<AppState>,
    Form(form): Form<AuthorityForm>,
) -> Result<impl IntoResponse> {
    let store = AuthorityStore::new(state.pool);

    let (Some(location), Some(authority)) =
        (text_field(&form.location), text_field(&form.authority))
    else {
        return Ok(redirect_to_tab("#authority"));
    };

    let address = text_field(&form.address).unwrap_or_default();

    store.insert(&location, &authority, &address).await?;
    Ok(redirect_to_tab("#authority"))
}

/// Partial authority update; address follows the form verbatim
pub async fn edit_authority(
    State(state): State<AppState>,
    Path(authority_id): Path<i64>,
    Form(form): Form<AuthorityForm>,
) -> Result<impl IntoResponse> {
    let store = AuthorityStore::new(state.pool);

    let update = AuthorityUpdate {
        location: text_field(&form.location),
        authority: text_field(&form.authority),
        address: form.address.as_deref().map(|s| s.trim().to_string()),
    };

    store.update(authority_id, update).await?;
    Ok(redirect_to_tab("#authority"))
}

/// GET /admin/api/authorities
///
/// Bare array shape; the dashboard's authority.js autofill relies on it.
pub async fn api_authorities(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let store = AuthorityStore::new(state.pool);
    let authorities = store.get_all().await?;
    Ok(Json(authorities))
}
