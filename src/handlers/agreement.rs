use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    db::{agreement_store::AgreementStore, company_store::CompanyStore},
    error::Result,
    handlers::{AppState, number_field, redirect_to_tab, text_field},
    models::agreement::AgreementUpdate,
};

#[derive(Debug, Deserialize)]
pub struct AgreementForm {
    pub company_id: Option<String>,
    pub loa_number: Option<String>,
    pub total_mt_km: Option<String>,
    pub rate_per_mt_km: Option<String>,
}

/// Create agreement handler; the new agreement starts inactive
pub async fn add_agreement(
    State(state): State<AppState>,
    Form(form): Form<AgreementForm>,
) -> Result<impl IntoResponse> {
    let companies = CompanyStore::new(state.pool.clone());
    let store = AgreementStore::new(state.pool);

    let (Some(company_id), Some(loa_number), Some(total_mt_km), Some(rate_per_mt_km)) = (
        number_field::<i64>(&form.company_id),
        text_field(&form.loa_number),
        number_field::<f64>(&form.total_mt_km),
        number_field::<f64>(&form.rate_per_mt_km),
    ) else {
        return Ok(redirect_to_tab("#agreement"));
    };

    // Ensure company exists
    if companies.find_by_id(company_id).await?.is_none() {
        return Ok(redirect_to_tab("#agreement"));
    }

    store
        .insert(company_id, &loa_number, total_mt_km, rate_per_mt_km)
        .await?;
    Ok(redirect_to_tab("#agreement"))
}

/// Partial agreement update; a company change is only applied when the
/// target company exists
pub async fn edit_agreement(
    State(state): State<AppState>,
    Path(agreement_id): Path<i64>,
    Form(form): Form<AgreementForm>,
) -> Result<impl IntoResponse> {
    let companies = CompanyStore::new(state.pool.clone());
    let store = AgreementStore::new(state.pool);

    let mut company_id = number_field::<i64>(&form.company_id);
    if let Some(id) = company_id {
        if companies.find_by_id(id).await?.is_none() {
            company_id = None;
        }
    }

    let update = AgreementUpdate {
        company_id,
        loa_number: text_field(&form.loa_number),
        total_mt_km: number_field(&form.total_mt_km),
        rate_per_mt_km: number_field(&form.rate_per_mt_km),
    };

    store.update(agreement_id, update).await?;
    Ok(redirect_to_tab("#agreement"))
}

/// Activate an agreement, deactivating all others in the configured scope
pub async fn set_active_agreement(
    State(state): State<AppState>,
    Path(agreement_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let store = AgreementStore::new(state.pool);
    store.set_active(agreement_id, state.activation_scope).await?;
    Ok(redirect_to_tab("#agreement"))
}

/// GET /admin/api/agreements
pub async fn api_agreements(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let store = AgreementStore::new(state.pool);
    let agreements = store.get_all().await?;
    Ok(Json(json!({ "agreements": agreements })))
}
