//! Resolved per-asset report repository.
//!
//! Reports are produced upstream by combining balances with prices: one row
//! per (chain, asset, timestamp) carrying the aggregated asset amount and its
//! USD value. The chart endpoints read from here.

use crate::boundaries::AssetRecord;
use crate::repositories::{decimal_to_i128, i128_to_decimal};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tvl_domain::value_objects::{AssetId, ChainId, UnixTime};

/// Database record for a resolved asset report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    /// Hour-aligned observation time.
    pub timestamp: UnixTime,
    /// Asset identity.
    pub asset_id: AssetId,
    /// Chain the holdings live on.
    pub chain_id: ChainId,
    /// Aggregated asset amount in base units.
    pub amount: i128,
    /// USD value of the amount, in cents.
    pub usd_value: i128,
}

impl ReportRecord {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let amount: Decimal = row.try_get("amount")?;
        let usd_value: Decimal = row.try_get("usd_value")?;
        Ok(Self {
            timestamp: UnixTime::new(row.try_get::<i64, _>("unix_timestamp")?),
            asset_id: AssetId::new(row.try_get::<String, _>("asset_id")?),
            chain_id: ChainId::new(row.try_get::<i64, _>("chain_id")? as u64),
            amount: decimal_to_i128(amount, "amount")?,
            usd_value: decimal_to_i128(usd_value, "usd_value")?,
        })
    }
}

impl AssetRecord for ReportRecord {
    fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }
    fn timestamp(&self) -> UnixTime {
        self.timestamp
    }
}

/// Repository for resolved report rows.
#[derive(Clone)]
pub struct ReportRepository {
    pool: Arc<PgPool>,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Inserts records, replacing the value columns of any row that already
    /// exists under the same (chain, asset, timestamp) key.
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn add_or_update_many(&self, records: &[ReportRecord]) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }
        tracing::info!(rows = records.len(), "upserting report records");
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO reports (chain_id, asset_id, unix_timestamp, amount, usd_value)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (chain_id, asset_id, unix_timestamp) DO UPDATE SET
                    amount = EXCLUDED.amount,
                    usd_value = EXCLUDED.usd_value
                "#,
            )
            .bind(record.chain_id.value() as i64)
            .bind(record.asset_id.as_str())
            .bind(record.timestamp.as_seconds())
            .bind(i128_to_decimal(record.amount)?)
            .bind(i128_to_decimal(record.usd_value)?)
            .execute(self.pool.as_ref())
            .await?;
        }
        Ok(records.len() as u64)
    }

    /// One asset's report history on one chain, ordered by timestamp
    /// ascending. The natural key guarantees one row per timestamp, which the
    /// chart assembler relies on.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_by_chain_and_asset(
        &self,
        chain_id: ChainId,
        asset_id: &AssetId,
    ) -> Result<Vec<ReportRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM reports
            WHERE chain_id = $1 AND asset_id = $2
            ORDER BY unix_timestamp ASC
            "#,
        )
        .bind(chain_id.value() as i64)
        .bind(asset_id.as_str())
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(ReportRecord::from_row).collect()
    }

    /// Exact-timestamp lookup across all assets.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_by_timestamp(
        &self,
        timestamp: UnixTime,
    ) -> Result<Vec<ReportRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM reports WHERE unix_timestamp = $1")
            .bind(timestamp.as_seconds())
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(ReportRecord::from_row).collect()
    }

    /// Full scan ordered by timestamp ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_all(&self) -> Result<Vec<ReportRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM reports ORDER BY unix_timestamp ASC")
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(ReportRecord::from_row).collect()
    }

    /// Deletes every row.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports")
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes rows older than a timestamp.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_before(&self, before: UnixTime) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE unix_timestamp < $1")
            .bind(before.as_seconds())
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
