use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::config::ActivationScope;

pub mod agreement_store;
pub mod authority_store;
pub mod company_store;
pub mod letter_store;
pub mod lorry_store;
pub mod material_store;
pub mod route_store;

pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool and create the schema
pub async fn init_db_pool(database_url: &str, scope: ActivationScope) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await?;

    setup_database(&pool, scope).await?;

    Ok(pool)
}

/// Set up the database schema
pub async fn setup_database(pool: &DbPool, scope: ActivationScope) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS company (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS agreement (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company_id INTEGER NOT NULL REFERENCES company(id),
            loa_number TEXT NOT NULL,
            total_mt_km REAL NOT NULL,
            rate_per_mt_km REAL NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lorry_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            capacity TEXT NOT NULL,
            carrier_size TEXT NOT NULL,
            number_of_wheels INTEGER,
            remarks TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS location_authority (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            location TEXT NOT NULL,
            authority TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS route (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            total_km INTEGER
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS route_stop (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            route_id INTEGER NOT NULL REFERENCES route(id) ON DELETE CASCADE,
            location TEXT NOT NULL,
            stop_type TEXT NOT NULL CHECK (stop_type IN ('from', 'intermediate', 'to')),
            stop_order INTEGER NOT NULL,
            authority_id INTEGER REFERENCES location_authority(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS letter_record (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            letter_number TEXT NOT NULL UNIQUE,
            date TEXT NOT NULL,
            state TEXT NOT NULL DEFAULT 'DRAFT'
                CHECK (state IN ('DRAFT', 'PROPOSAL', 'APPROVED', 'CANCELLED')),
            booking_serial INTEGER NOT NULL,
            company_id INTEGER NOT NULL REFERENCES company(id),
            lorry_id INTEGER NOT NULL REFERENCES lorry_details(id),
            route_id INTEGER NOT NULL REFERENCES route(id),
            agreement_id INTEGER REFERENCES agreement(id),
            placement_date TEXT,
            is_for_home_depot INTEGER NOT NULL DEFAULT 1,
            loading_at_home_depot INTEGER NOT NULL DEFAULT 1,
            far_end_action TEXT CHECK (far_end_action IN ('load', 'unload')),
            remarks TEXT,
            UNIQUE (agreement_id, booking_serial)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS material_group (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            letter_id INTEGER NOT NULL REFERENCES letter_record(id) ON DELETE CASCADE,
            quantity REAL,
            unit TEXT,
            total_amount REAL NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS material_item (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            letter_id INTEGER NOT NULL REFERENCES letter_record(id) ON DELETE CASCADE,
            group_id INTEGER REFERENCES material_group(id) ON DELETE CASCADE,
            sl_no INTEGER,
            description TEXT NOT NULL,
            quantity REAL,
            unit TEXT,
            rate REAL,
            amount REAL,
            pricing_type TEXT NOT NULL DEFAULT 'UNIT'
                CHECK (pricing_type IN ('UNIT', 'GROUPED_DETAIL')),
            remarks TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    setup_activation_index(pool, scope).await?;

    Ok(())
}

/// Create the partial unique index that enforces "at most one active
/// agreement" for the configured scope. Both variants are dropped first so
/// a scope change between runs does not leave a stale constraint behind.
async fn setup_activation_index(pool: &DbPool, scope: ActivationScope) -> Result<()> {
    sqlx::query("DROP INDEX IF EXISTS uq_agreement_active_global")
        .execute(pool)
        .await?;
    sqlx::query("DROP INDEX IF EXISTS uq_agreement_active_company")
        .execute(pool)
        .await?;

    let create = match scope {
        ActivationScope::Global => {
            "CREATE UNIQUE INDEX uq_agreement_active_global
             ON agreement (is_active) WHERE is_active = 1"
        }
        ActivationScope::PerCompany => {
            "CREATE UNIQUE INDEX uq_agreement_active_company
             ON agreement (company_id) WHERE is_active = 1"
        }
    };
    sqlx::query(create).execute(pool).await.context(
        "existing active agreements violate the configured activation scope; \
         deactivate the surplus agreements before changing AGREEMENT_ACTIVATION_SCOPE",
    )?;

    Ok(())
}
