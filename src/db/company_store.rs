use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::company::{Company, CompanyUpdate},
};

/// Company store for database operations
pub struct CompanyStore {
    pool: DbPool,
}

impl CompanyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>("SELECT * FROM company ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(companies)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Company> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("company"))
    }

    pub async fn insert(&self, name: &str, address: &str, phone: &str, email: &str) -> Result<Company> {
        let id = sqlx::query(
            "INSERT INTO company (name, address, phone, email) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(email)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id).await
    }

    /// Apply a partial update; absent fields keep their stored value
    pub async fn update(&self, id: i64, update: CompanyUpdate) -> Result<Company> {
        // Ensure the row exists so an unknown id surfaces as 404
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE company
            SET name = COALESCE(?, name),
                address = COALESCE(?, address),
                phone = COALESCE(?, phone),
                email = COALESCE(?, email)
            WHERE id = ?
            "#,
        )
        .bind(update.name)
        .bind(update.address)
        .bind(update.phone)
        .bind(update.email)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Number of agreements and letters still referencing the company
    pub async fn dependent_count(&self, id: i64) -> Result<i64> {
        let (agreements,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM agreement WHERE company_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        let (letters,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM letter_record WHERE company_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(agreements + letters)
    }

    /// Delete a company; refused while agreements or letters reference it
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        if self.dependent_count(id).await? > 0 {
            return Err(AppError::Conflict(
                "Cannot delete company with dependent Agreements or Letters.".into(),
            ));
        }

        sqlx::query("DELETE FROM company WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
