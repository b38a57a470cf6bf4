//! PostgreSQL pool, migrations and NUMERIC conversions

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

fn pool_options(database: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(database.min_connections)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(database.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(database.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Connect a pool using the `[database]` config section
pub async fn create_pool(database: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&database.url)
        .context("Invalid database.url")?
        .application_name("fitness-tracker");

    let pool = pool_options(database)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!(
        max = database.max_connections,
        min = database.min_connections,
        "Database pool created"
    );
    Ok(pool)
}

/// Apply the embedded migrations under `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Readiness check query
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        warn!(error = %e, "Database health check failed");
        anyhow::Error::from(e)
    })?;
    Ok(())
}

/// NUMERIC column to `f64`
///
/// Stored values are bounded by validation; `NaN` marks a value that does
/// not fit, which the aggregator then ignores.
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// `f64` to a NUMERIC bind parameter
pub fn f64_to_decimal(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| anyhow::anyhow!("{} cannot be stored as NUMERIC", value))
}
