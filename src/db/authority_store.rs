use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::authority::{AuthorityUpdate, LocationAuthority},
};

/// Location authority store for database operations
pub struct AuthorityStore {
    pool: DbPool,
}

impl AuthorityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<LocationAuthority>> {
        let authorities = sqlx::query_as::<_, LocationAuthority>(
            "SELECT * FROM location_authority ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authorities)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<LocationAuthority>> {
        let authority =
            sqlx::query_as::<_, LocationAuthority>("SELECT * FROM location_authority WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(authority)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<LocationAuthority> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("authority"))
    }

    pub async fn insert(
        &self,
        location: &str,
        authority: &str,
        address: &str,
    ) -> Result<LocationAuthority> {
        let id = sqlx::query(
            "INSERT INTO location_authority (location, authority, address) VALUES (?, ?, ?)",
        )
        .bind(location)
        .bind(authority)
        .bind(address)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, update: AuthorityUpdate) -> Result<LocationAuthority> {
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE location_authority
            SET location = COALESCE(?, location),
                authority = COALESCE(?, authority),
                address = COALESCE(?, address)
            WHERE id = ?
            "#,
        )
        .bind(update.location)
        .bind(update.authority)
        .bind(update.address)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }
}
