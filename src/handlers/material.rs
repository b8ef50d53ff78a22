use axum::{
    Json,
    extract::{Form, Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    db::{letter_store::LetterStore, material_store::MaterialStore},
    error::{AppError, Result},
    handlers::{AppState, number_field, text_field},
    models::material::{GroupUpdate, ItemUpdate},
};

#[derive(Debug, Deserialize)]
pub struct GroupForm {
    pub letter_id: Option<String>,
    pub total_amount: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub letter_id: Option<String>,
    pub group_id: Option<String>,
    pub sl_no: Option<String>,
    pub description: Option<String>,
    pub pricing_type: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub rate: Option<String>,
    pub amount: Option<String>,
}

/// Create a lump-sum material group on a letter
pub async fn add_material_group(
    State(state): State<AppState>,
    Form(form): Form<GroupForm>,
) -> Result<impl IntoResponse> {
    let letters = LetterStore::new(state.pool.clone());
    let store = MaterialStore::new(state.pool);

    let (Some(letter_id), Some(total_amount)) = (
        number_field::<i64>(&form.letter_id),
        number_field::<f64>(&form.total_amount),
    ) else {
        return Err(AppError::BadRequest(
            "letter_id and total_amount are required".into(),
        ));
    };

    letters.get_by_id(letter_id).await?;

    let group = store
        .insert_group(
            letter_id,
            total_amount,
            number_field(&form.quantity),
            text_field(&form.unit),
        )
        .await?;

    Ok(Json(json!({ "ok": true, "group_id": group.id })))
}

/// Partial material group update
pub async fn edit_material_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Form(form): Form<GroupForm>,
) -> Result<impl IntoResponse> {
    let store = MaterialStore::new(state.pool);

    let update = GroupUpdate {
        total_amount: number_field(&form.total_amount),
        quantity: number_field(&form.quantity),
        unit: form.unit.as_deref().map(|raw| {
            Some(raw.trim().to_string()).filter(|s| !s.is_empty())
        }),
    };

    store.update_group(group_id, update).await?;
    Ok(Json(json!({ "ok": true })))
}

/// Create a material item. With a group_id the row becomes a
/// GROUPED_DETAIL detail line; otherwise it is UNIT priced and a missing
/// amount is derived from quantity x rate.
pub async fn add_material_item(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<impl IntoResponse> {
    let letters = LetterStore::new(state.pool.clone());
    let store = MaterialStore::new(state.pool);

    let Some(letter_id) = number_field::<i64>(&form.letter_id) else {
        return Err(AppError::BadRequest("letter_id is required".into()));
    };
    let Some(description) = text_field(&form.description) else {
        return Err(AppError::BadRequest("description is required".into()));
    };

    letters.get_by_id(letter_id).await?;

    let sl_no = number_field::<i64>(&form.sl_no);
    let quantity = number_field::<f64>(&form.quantity);
    let unit = text_field(&form.unit);

    let item = match number_field::<i64>(&form.group_id) {
        Some(group_id) => {
            store.get_group_by_id(group_id).await?;
            store
                .insert_grouped_item(letter_id, group_id, sl_no, &description, quantity, unit)
                .await?
        }
        None => {
            store
                .insert_unit_item(
                    letter_id,
                    sl_no,
                    &description,
                    quantity,
                    unit,
                    number_field(&form.rate),
                    number_field(&form.amount),
                )
                .await?
        }
    };

    Ok(Json(json!({ "ok": true, "item_id": item.id })))
}

/// Partial material item update; switching to GROUPED_DETAIL clears the
/// independent rate and amount
pub async fn edit_material_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> Result<impl IntoResponse> {
    let store = MaterialStore::new(state.pool);

    let update = ItemUpdate {
        description: text_field(&form.description),
        pricing_type: form.pricing_type.as_deref().and_then(|raw| raw.parse().ok()),
        group_id: number_field(&form.group_id),
        quantity: number_field(&form.quantity),
        unit: form.unit.as_deref().map(|raw| {
            Some(raw.trim().to_string()).filter(|s| !s.is_empty())
        }),
        rate: number_field(&form.rate),
        amount: number_field(&form.amount),
    };

    store.update_item(item_id, update).await?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /admin/api/letter/{id}/materials
pub async fn api_letter_materials(
    State(state): State<AppState>,
    Path(letter_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let letters = LetterStore::new(state.pool.clone());
    let store = MaterialStore::new(state.pool);

    let letter = letters.get_by_id(letter_id).await?;
    let groups = store.groups_for_letter(letter.id).await?;
    let items = store.items_for_letter(letter.id).await?;

    Ok(Json(json!({
        "letter_id": letter.id,
        "groups": groups,
        "items": items,
    })))
}
