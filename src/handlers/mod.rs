use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::ActivationScope;
use crate::db::DbPool;

pub mod agreement;
pub mod authority;
pub mod company;
pub mod dashboard;
pub mod letter;
pub mod lorry;
pub mod material;
pub mod route;

/// Shared state for all admin handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub activation_scope: ActivationScope,
}

/// Build the admin router with every CRUD and API endpoint
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/", get(dashboard::view_dashboard))
        .route("/admin/company/add", post(company::add_company))
        .route("/admin/company/edit/{company_id}", post(company::edit_company))
        .route("/admin/company/delete/{company_id}", post(company::delete_company))
        .route("/admin/api/companies", get(company::api_companies))
        .route("/admin/agreement/add", post(agreement::add_agreement))
        .route("/admin/agreement/edit/{agreement_id}", post(agreement::edit_agreement))
        .route(
            "/admin/agreement/set_active/{agreement_id}",
            post(agreement::set_active_agreement),
        )
        .route("/admin/api/agreements", get(agreement::api_agreements))
        .route("/admin/lorry/add", post(lorry::add_lorry))
        .route("/admin/lorry/edit/{lorry_id}", post(lorry::edit_lorry))
        .route("/admin/api/lorries", get(lorry::api_lorries))
        .route("/admin/authority/add", post(authority::add_authority))
        .route("/admin/authority/edit/{authority_id}", post(authority::edit_authority))
        .route("/admin/api/authorities", get(authority::api_authorities))
        .route("/admin/route/add", post(route::add_route))
        .route("/admin/route/edit/{route_id}", post(route::edit_route))
        .route("/admin/route/{route_id}/stop/add", post(route::add_route_stop))
        .route("/admin/route/stop/edit/{stop_id}", post(route::edit_route_stop))
        .route("/admin/api/routes", get(route::api_routes))
        .route("/admin/letter/add", post(letter::add_letter))
        .route("/admin/letter/edit/{letter_id}", post(letter::edit_letter))
        .route("/admin/api/letters", get(letter::api_letters))
        .route("/admin/material-group/add", post(material::add_material_group))
        .route("/admin/material-group/edit/{group_id}", post(material::edit_material_group))
        .route("/admin/material-item/add", post(material::add_material_item))
        .route("/admin/material-item/edit/{item_id}", post(material::edit_material_item))
        .route(
            "/admin/api/letter/{letter_id}/materials",
            get(material::api_letter_materials),
        )
        .with_state(state)
}

/// Redirect back to the admin dashboard on a given tab (e.g. '#letter')
pub(crate) fn redirect_to_tab(tab_hash: &str) -> Redirect {
    Redirect::to(&format!("/admin/{}", tab_hash))
}

/// Trimmed form value; blank or missing counts as absent
pub(crate) fn text_field(raw: &Option<String>) -> Option<String> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse a form value; blank, missing or unparsable counts as absent
pub(crate) fn number_field<T: std::str::FromStr>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

/// Parse a yyyy-mm-dd string, also accepting a full ISO datetime (the date
/// part is kept). Invalid input counts as absent.
pub(crate) fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|dt| dt.date())
}
