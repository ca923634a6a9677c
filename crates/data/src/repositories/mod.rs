//! Repository implementations for database persistence.
//!
//! One repository per raw time series. All writes go through
//! upsert-by-natural-key queries, so re-ingesting a timestamp replaces the
//! value columns instead of duplicating rows.

mod balance_repository;
mod price_repository;
mod report_repository;
mod total_supply_repository;

pub use balance_repository::{BalanceRecord, BalanceRepository};
pub use price_repository::{PriceRecord, PriceRepository};
pub use report_repository::{ReportRecord, ReportRepository};
pub use total_supply_repository::{TotalSupplyRecord, TotalSupplyRepository};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use std::sync::Arc;

/// Database connection wrapper for repositories.
#[derive(Clone)]
pub struct Database {
    pool: Arc<PgPool>,
}

impl Database {
    /// Creates a new Database wrapper from a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Creates a new database connection from a connection string.
    ///
    /// # Errors
    /// Returns an error if the connection fails.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates a BalanceRepository instance.
    #[must_use]
    pub fn balances(&self) -> BalanceRepository {
        BalanceRepository::new(self.pool.clone())
    }

    /// Creates a PriceRepository instance.
    #[must_use]
    pub fn prices(&self) -> PriceRepository {
        PriceRepository::new(self.pool.clone())
    }

    /// Creates a TotalSupplyRepository instance.
    #[must_use]
    pub fn total_supplies(&self) -> TotalSupplyRepository {
        TotalSupplyRepository::new(self.pool.clone())
    }

    /// Creates a ReportRepository instance.
    #[must_use]
    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone())
    }

    /// Runs database migrations.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(include_str!("../../migrations/001_initial_schema.sql"))
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}

/// Base-unit integers are stored as NUMERIC(78, 0); decode back into i128.
pub(crate) fn decimal_to_i128(value: Decimal, column: &str) -> Result<i128, sqlx::Error> {
    value
        .to_i128()
        .ok_or_else(|| sqlx::Error::Decode(format!("column {column} does not fit i128").into()))
}

pub(crate) fn i128_to_decimal(value: i128) -> Result<Decimal, sqlx::Error> {
    Decimal::try_from_i128_with_scale(value, 0)
        .map_err(|error| sqlx::Error::Encode(error.to_string().into()))
}
