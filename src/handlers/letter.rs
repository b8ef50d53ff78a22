use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    config::ActivationScope,
    db::{
        agreement_store::AgreementStore, letter_store::LetterStore, lorry_store::LorryStore,
        route_store::RouteStore,
    },
    error::{AppError, Result},
    handlers::{AppState, number_field, parse_form_date, redirect_to_tab, text_field},
    models::{
        agreement::Agreement,
        letter::{LetterUpdate, NewLetter},
    },
};

#[derive(Debug, Deserialize)]
pub struct LetterForm {
    pub lorry_id: Option<String>,
    pub route_id: Option<String>,
    pub company_id: Option<String>,
    pub is_home_depot: Option<String>,
    pub load_at_home: Option<String>,
    pub far_end_action: Option<String>,
    pub placement_date: Option<String>,
    pub remarks: Option<String>,
    pub state: Option<String>,
}

/// Resolve the agreement new letters bill against. In global scope that is
/// the single active agreement; in per-company scope the form's company_id
/// selects which company's active agreement applies.
async fn active_agreement(
    agreements: &AgreementStore,
    scope: ActivationScope,
    company_id: Option<i64>,
) -> Result<Agreement> {
    let found = match scope {
        ActivationScope::Global => agreements.find_active().await?,
        ActivationScope::PerCompany => {
            let company_id = company_id.ok_or_else(|| {
                AppError::BadRequest(
                    "company_id is required when agreements are activated per company".into(),
                )
            })?;
            agreements.find_active_for_company(company_id).await?
        }
    };

    found.ok_or_else(|| AppError::BadRequest("No active agreement".into()))
}

/// Create a booking letter under the active agreement. Serial and letter
/// number are derived inside the insert transaction.
pub async fn add_letter(
    State(state): State<AppState>,
    Form(form): Form<LetterForm>,
) -> Result<impl IntoResponse> {
    let lorries = LorryStore::new(state.pool.clone());
    let routes = RouteStore::new(state.pool.clone());
    let agreements = AgreementStore::new(state.pool.clone());
    let letters = LetterStore::new(state.pool);

    let (Some(lorry_id), Some(route_id)) = (
        number_field::<i64>(&form.lorry_id),
        number_field::<i64>(&form.route_id),
    ) else {
        return Ok(redirect_to_tab("#letter").into_response());
    };

    if lorries.find_by_id(lorry_id).await?.is_none()
        || routes.find_by_id(route_id).await?.is_none()
    {
        return Ok(redirect_to_tab("#letter").into_response());
    }

    // Active agreement is mandatory for booking serial / letter number
    let agreement = active_agreement(
        &agreements,
        state.activation_scope,
        number_field(&form.company_id),
    )
    .await?;

    let new = NewLetter {
        lorry_id,
        route_id,
        is_for_home_depot: form
            .is_home_depot
            .as_deref()
            .map(|v| v.trim() == "1")
            .unwrap_or(true),
        loading_at_home_depot: form
            .load_at_home
            .as_deref()
            .map(|v| v.trim() == "1")
            .unwrap_or(true),
        far_end_action: form
            .far_end_action
            .as_deref()
            .and_then(|raw| raw.parse().ok()),
        placement_date: form.placement_date.as_deref().and_then(parse_form_date),
        remarks: text_field(&form.remarks),
    };

    letters.create(&agreement, new).await?;
    Ok(redirect_to_tab("#letter").into_response())
}

/// Partial letter update; booking serial and letter number never change.
/// Fields present in the form with a blank value are cleared where the
/// column is nullable.
pub async fn edit_letter(
    State(state): State<AppState>,
    Path(letter_id): Path<i64>,
    Form(form): Form<LetterForm>,
) -> Result<impl IntoResponse> {
    let lorries = LorryStore::new(state.pool.clone());
    let routes = RouteStore::new(state.pool.clone());
    let letters = LetterStore::new(state.pool);

    let mut lorry_id = number_field::<i64>(&form.lorry_id);
    if let Some(id) = lorry_id {
        if lorries.find_by_id(id).await?.is_none() {
            lorry_id = None;
        }
    }

    let mut route_id = number_field::<i64>(&form.route_id);
    if let Some(id) = route_id {
        if routes.find_by_id(id).await?.is_none() {
            route_id = None;
        }
    }

    let update = LetterUpdate {
        lorry_id,
        route_id,
        is_for_home_depot: form.is_home_depot.as_deref().map(|v| v.trim() == "1"),
        loading_at_home_depot: form.load_at_home.as_deref().map(|v| v.trim() == "1"),
        far_end_action: form
            .far_end_action
            .as_deref()
            .map(|raw| raw.parse().ok()),
        placement_date: form
            .placement_date
            .as_deref()
            .map(|raw| parse_form_date(raw)),
        remarks: form
            .remarks
            .as_deref()
            .map(|raw| Some(raw.trim().to_string()).filter(|s| !s.is_empty())),
        state: form.state.as_deref().and_then(|raw| raw.parse().ok()),
    };

    letters.update(letter_id, update).await?;
    Ok(redirect_to_tab("#letter"))
}

/// GET /admin/api/letters
pub async fn api_letters(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let store = LetterStore::new(state.pool);
    let letters = store.get_all().await?;
    Ok(Json(letters))
}
