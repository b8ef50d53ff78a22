use chrono::Utc;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::{
        agreement::Agreement,
        letter::{LetterRecord, LetterUpdate, NewLetter, make_letter_number},
    },
};

/// Booking letter store for database operations
pub struct LetterStore {
    pool: DbPool,
}

impl LetterStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<LetterRecord>> {
        let letters =
            sqlx::query_as::<_, LetterRecord>("SELECT * FROM letter_record ORDER BY id DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(letters)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<LetterRecord>> {
        let letter = sqlx::query_as::<_, LetterRecord>("SELECT * FROM letter_record WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(letter)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<LetterRecord> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("letter"))
    }

    /// Next booking serial for an agreement: max existing serial plus one,
    /// starting at 1. Pure read; does not reserve the serial.
    pub async fn next_booking_serial(&self, agreement_id: i64) -> Result<i64> {
        let max: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(booking_serial) FROM letter_record WHERE agreement_id = ?",
        )
        .bind(agreement_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max.unwrap_or(0) + 1)
    }

    /// Create a letter under the given agreement. The serial lookup and the
    /// insert run in one transaction so concurrent bookings for the same
    /// agreement cannot both observe the same max serial; the
    /// UNIQUE(agreement_id, booking_serial) constraint backstops the rest.
    pub async fn create(&self, agreement: &Agreement, new: NewLetter) -> Result<LetterRecord> {
        let mut tx = self.pool.begin().await?;

        let max: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(booking_serial) FROM letter_record WHERE agreement_id = ?",
        )
        .bind(agreement.id)
        .fetch_one(&mut *tx)
        .await?;

        let serial = max.unwrap_or(0) + 1;
        let letter_number = make_letter_number(&agreement.loa_number, agreement.id, serial);

        let id = sqlx::query(
            r#"
            INSERT INTO letter_record
                (letter_number, date, state, booking_serial, company_id, lorry_id, route_id,
                 agreement_id, placement_date, is_for_home_depot, loading_at_home_depot,
                 far_end_action, remarks)
            VALUES (?, ?, 'DRAFT', ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&letter_number)
        .bind(Utc::now().date_naive())
        .bind(serial)
        .bind(agreement.company_id)
        .bind(new.lorry_id)
        .bind(new.route_id)
        .bind(agreement.id)
        .bind(new.placement_date)
        .bind(new.is_for_home_depot)
        .bind(new.loading_at_home_depot)
        .bind(new.far_end_action)
        .bind(new.remarks)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Partial update of a letter; booking serial and letter number are
    /// immutable once assigned.
    pub async fn update(&self, id: i64, update: LetterUpdate) -> Result<LetterRecord> {
        let mut letter = self.get_by_id(id).await?;

        if let Some(lorry_id) = update.lorry_id {
            letter.lorry_id = lorry_id;
        }
        if let Some(route_id) = update.route_id {
            letter.route_id = route_id;
        }
        if let Some(flag) = update.is_for_home_depot {
            letter.is_for_home_depot = flag;
        }
        if let Some(flag) = update.loading_at_home_depot {
            letter.loading_at_home_depot = flag;
        }
        if let Some(action) = update.far_end_action {
            letter.far_end_action = action;
        }
        if let Some(date) = update.placement_date {
            letter.placement_date = date;
        }
        if let Some(remarks) = update.remarks {
            letter.remarks = remarks;
        }
        if let Some(state) = update.state {
            letter.state = state;
        }

        sqlx::query(
            r#"
            UPDATE letter_record
            SET lorry_id = ?, route_id = ?, is_for_home_depot = ?, loading_at_home_depot = ?,
                far_end_action = ?, placement_date = ?, remarks = ?, state = ?
            WHERE id = ?
            "#,
        )
        .bind(letter.lorry_id)
        .bind(letter.route_id)
        .bind(letter.is_for_home_depot)
        .bind(letter.loading_at_home_depot)
        .bind(letter.far_end_action)
        .bind(letter.placement_date)
        .bind(&letter.remarks)
        .bind(letter.state)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(letter)
    }
}
