use crate::{
    config::ActivationScope,
    db::DbPool,
    error::{AppError, Result},
    models::agreement::{Agreement, AgreementDto, AgreementUpdate},
};

/// Agreement store for database operations
pub struct AgreementStore {
    pool: DbPool,
}

impl AgreementStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<AgreementDto>> {
        let agreements = sqlx::query_as::<_, AgreementDto>(
            r#"
            SELECT a.id, a.company_id, c.name AS company_name,
                   a.loa_number, a.total_mt_km, a.rate_per_mt_km, a.is_active
            FROM agreement a
            LEFT JOIN company c ON c.id = a.company_id
            ORDER BY a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(agreements)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Agreement>> {
        let agreement = sqlx::query_as::<_, Agreement>("SELECT * FROM agreement WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(agreement)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Agreement> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("agreement"))
    }

    /// New agreements start out inactive
    pub async fn insert(
        &self,
        company_id: i64,
        loa_number: &str,
        total_mt_km: f64,
        rate_per_mt_km: f64,
    ) -> Result<Agreement> {
        let id = sqlx::query(
            r#"
            INSERT INTO agreement (company_id, loa_number, total_mt_km, rate_per_mt_km, is_active)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(company_id)
        .bind(loa_number)
        .bind(total_mt_km)
        .bind(rate_per_mt_km)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, update: AgreementUpdate) -> Result<Agreement> {
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE agreement
            SET company_id = COALESCE(?, company_id),
                loa_number = COALESCE(?, loa_number),
                total_mt_km = COALESCE(?, total_mt_km),
                rate_per_mt_km = COALESCE(?, rate_per_mt_km)
            WHERE id = ?
            "#,
        )
        .bind(update.company_id)
        .bind(update.loa_number)
        .bind(update.total_mt_km)
        .bind(update.rate_per_mt_km)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Activate one agreement and deactivate every other one in scope.
    /// Runs in a single transaction; the partial unique index on active
    /// rows rejects any state that would leave two active agreements.
    pub async fn set_active(&self, id: i64, scope: ActivationScope) -> Result<Agreement> {
        let agreement = self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;

        match scope {
            ActivationScope::Global => {
                sqlx::query("UPDATE agreement SET is_active = 0 WHERE id != ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            ActivationScope::PerCompany => {
                sqlx::query("UPDATE agreement SET is_active = 0 WHERE company_id = ? AND id != ?")
                    .bind(agreement.company_id)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        sqlx::query("UPDATE agreement SET is_active = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// The single globally active agreement, if any
    pub async fn find_active(&self) -> Result<Option<Agreement>> {
        let agreement =
            sqlx::query_as::<_, Agreement>("SELECT * FROM agreement WHERE is_active = 1 LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        Ok(agreement)
    }

    /// The active agreement of one company, if any
    pub async fn find_active_for_company(&self, company_id: i64) -> Result<Option<Agreement>> {
        let agreement = sqlx::query_as::<_, Agreement>(
            "SELECT * FROM agreement WHERE company_id = ? AND is_active = 1 LIMIT 1",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agreement)
    }
}
