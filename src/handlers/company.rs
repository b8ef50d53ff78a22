use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    db::company_store::CompanyStore,
    error::Result,
    handlers::{AppState, redirect_to_tab, text_field},
    models::company::CompanyUpdate,
};

#[derive(Debug, Deserialize)]
pub struct CompanyForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Create company handler; missing required fields bounce back silently
pub async fn add_company(
    State(state): State<AppState>,
    Form(form): Form<CompanyForm>,
) -> Result<impl IntoResponse> {
    let store = CompanyStore::new(state.pool);

    let (Some(name), Some(address)) = (text_field(&form.name), text_field(&form.address)) else {
        // minimal guard; UI already requires these
        return Ok(redirect_to_tab("#company"));
    };

    let phone = text_field(&form.phone).unwrap_or_default();
    let email = text_field(&form.email).unwrap_or_default();

    store.insert(&name, &address, &phone, &email).await?;
    Ok(redirect_to_tab("#company"))
}

/// Partial company update; blank fields leave stored values unchanged,
/// except phone and email which follow the form verbatim
pub async fn edit_company(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
    Form(form): Form<CompanyForm>,
) -> Result<impl IntoResponse> {
    let store = CompanyStore::new(state.pool);

    let update = CompanyUpdate {
        name: text_field(&form.name),
        address: text_field(&form.address),
        phone: form.phone.as_deref().map(|s| s.trim().to_string()),
        email: form.email.as_deref().map(|s| s.trim().to_string()),
    };

    store.update(company_id, update).await?;
    Ok(redirect_to_tab("#company"))
}

/// Delete company handler; 409 while agreements or letters reference it
pub async fn delete_company(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let store = CompanyStore::new(state.pool);
    store.delete(company_id).await?;
    Ok(redirect_to_tab("#company"))
}

/// GET /admin/api/companies
pub async fn api_companies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let store = CompanyStore::new(state.pool);
    let companies = store.get_all().await?;
    Ok(Json(json!({ "companies": companies })))
}
