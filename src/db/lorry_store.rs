use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::lorry::{LorryDetails, LorryUpdate},
};

/// Lorry store for database operations
pub struct LorryStore {
    pool: DbPool,
}

impl LorryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<LorryDetails>> {
        let lorries =
            sqlx::query_as::<_, LorryDetails>("SELECT * FROM lorry_details ORDER BY id DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(lorries)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<LorryDetails>> {
        let lorry = sqlx::query_as::<_, LorryDetails>("SELECT * FROM lorry_details WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lorry)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<LorryDetails> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("lorry"))
    }

    pub async fn insert(
        &self,
        capacity: &str,
        carrier_size: &str,
        number_of_wheels: Option<i64>,
        remarks: &str,
    ) -> Result<LorryDetails> {
        let id = sqlx::query(
            r#"
            INSERT INTO lorry_details (capacity, carrier_size, number_of_wheels, remarks)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(capacity)
        .bind(carrier_size)
        .bind(number_of_wheels)
        .bind(remarks)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, update: LorryUpdate) -> Result<LorryDetails> {
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE lorry_details
            SET capacity = COALESCE(?, capacity),
                carrier_size = COALESCE(?, carrier_size),
                number_of_wheels = COALESCE(?, number_of_wheels),
                remarks = COALESCE(?, remarks)
            WHERE id = ?
            "#,
        )
        .bind(update.capacity)
        .bind(update.carrier_size)
        .bind(update.number_of_wheels)
        .bind(update.remarks)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }
}
