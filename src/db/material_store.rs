use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::material::{
        GroupUpdate, ItemUpdate, MaterialGroup, MaterialItem, PricingType, resolve_unit_amount,
    },
};

/// Material group and item store for database operations
pub struct MaterialStore {
    pool: DbPool,
}

impl MaterialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_group_by_id(&self, id: i64) -> Result<MaterialGroup> {
        sqlx::query_as::<_, MaterialGroup>("SELECT * FROM material_group WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("material group"))
    }

    pub async fn get_item_by_id(&self, id: i64) -> Result<MaterialItem> {
        sqlx::query_as::<_, MaterialItem>("SELECT * FROM material_item WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("material item"))
    }

    pub async fn groups_for_letter(&self, letter_id: i64) -> Result<Vec<MaterialGroup>> {
        let groups =
            sqlx::query_as::<_, MaterialGroup>("SELECT * FROM material_group WHERE letter_id = ?")
                .bind(letter_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(groups)
    }

    pub async fn items_for_letter(&self, letter_id: i64) -> Result<Vec<MaterialItem>> {
        let items =
            sqlx::query_as::<_, MaterialItem>("SELECT * FROM material_item WHERE letter_id = ?")
                .bind(letter_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(items)
    }

    pub async fn insert_group(
        &self,
        letter_id: i64,
        total_amount: f64,
        quantity: Option<f64>,
        unit: Option<String>,
    ) -> Result<MaterialGroup> {
        let id = sqlx::query(
            r#"
            INSERT INTO material_group (letter_id, quantity, unit, total_amount)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(letter_id)
        .bind(quantity)
        .bind(unit)
        .bind(total_amount)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_group_by_id(id).await
    }

    pub async fn update_group(&self, id: i64, update: GroupUpdate) -> Result<MaterialGroup> {
        let mut group = self.get_group_by_id(id).await?;

        if let Some(total_amount) = update.total_amount {
            group.total_amount = total_amount;
        }
        if let Some(quantity) = update.quantity {
            group.quantity = Some(quantity);
        }
        if let Some(unit) = update.unit {
            group.unit = unit;
        }

        sqlx::query(
            "UPDATE material_group SET quantity = ?, unit = ?, total_amount = ? WHERE id = ?",
        )
        .bind(group.quantity)
        .bind(&group.unit)
        .bind(group.total_amount)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(group)
    }

    /// Insert a row belonging to a lump-sum group; such rows never carry an
    /// independent rate or amount.
    pub async fn insert_grouped_item(
        &self,
        letter_id: i64,
        group_id: i64,
        sl_no: Option<i64>,
        description: &str,
        quantity: Option<f64>,
        unit: Option<String>,
    ) -> Result<MaterialItem> {
        let id = sqlx::query(
            r#"
            INSERT INTO material_item
                (letter_id, group_id, sl_no, description, quantity, unit, pricing_type)
            VALUES (?, ?, ?, ?, ?, ?, 'GROUPED_DETAIL')
            "#,
        )
        .bind(letter_id)
        .bind(group_id)
        .bind(sl_no)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_item_by_id(id).await
    }

    /// Insert an independently priced row; a missing amount is derived from
    /// quantity x rate when both are present.
    pub async fn insert_unit_item(
        &self,
        letter_id: i64,
        sl_no: Option<i64>,
        description: &str,
        quantity: Option<f64>,
        unit: Option<String>,
        rate: Option<f64>,
        amount: Option<f64>,
    ) -> Result<MaterialItem> {
        let amount = resolve_unit_amount(quantity, rate, amount);

        let id = sqlx::query(
            r#"
            INSERT INTO material_item
                (letter_id, group_id, sl_no, description, quantity, unit, rate, amount, pricing_type)
            VALUES (?, NULL, ?, ?, ?, ?, ?, ?, 'UNIT')
            "#,
        )
        .bind(letter_id)
        .bind(sl_no)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(rate)
        .bind(amount)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_item_by_id(id).await
    }

    /// Partial item update. Switching to GROUPED_DETAIL clears rate and
    /// amount; ungrouped UNIT rows re-derive a missing amount.
    pub async fn update_item(&self, id: i64, update: ItemUpdate) -> Result<MaterialItem> {
        let mut item = self.get_item_by_id(id).await?;

        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(pricing_type) = update.pricing_type {
            item.pricing_type = pricing_type;
            if pricing_type == PricingType::GroupedDetail {
                item.rate = None;
                item.amount = None;
            }
        }
        if let Some(group_id) = update.group_id {
            item.group_id = Some(group_id);
        }
        if let Some(quantity) = update.quantity {
            item.quantity = Some(quantity);
        }
        if let Some(unit) = update.unit {
            item.unit = unit;
        }

        if item.pricing_type == PricingType::Unit && item.group_id.is_none() {
            if let Some(rate) = update.rate {
                item.rate = Some(rate);
            }
            if let Some(amount) = resolve_unit_amount(item.quantity, item.rate, update.amount) {
                item.amount = Some(amount);
            }
        }

        sqlx::query(
            r#"
            UPDATE material_item
            SET group_id = ?, description = ?, quantity = ?, unit = ?,
                rate = ?, amount = ?, pricing_type = ?
            WHERE id = ?
            "#,
        )
        .bind(item.group_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.rate)
        .bind(item.amount)
        .bind(item.pricing_type)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }
}
