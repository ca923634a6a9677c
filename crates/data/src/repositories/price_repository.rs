//! USD price repository.

use crate::boundaries::{
    AssetRecord, DataBoundary, find_data_boundaries, find_latest_by_asset_between,
};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;
use tvl_domain::value_objects::{AssetId, UnixTime};

/// Database record for an asset price observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    /// Hour-aligned observation time.
    pub timestamp: UnixTime,
    /// Asset identity.
    pub asset_id: AssetId,
    /// Resolved USD price.
    pub price_usd: Decimal,
}

impl PriceRecord {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            timestamp: UnixTime::new(row.try_get::<i64, _>("unix_timestamp")?),
            asset_id: AssetId::new(row.try_get::<String, _>("asset_id")?),
            price_usd: row.try_get("price_usd")?,
        })
    }
}

impl AssetRecord for PriceRecord {
    fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }
    fn timestamp(&self) -> UnixTime {
        self.timestamp
    }
}

/// Repository for price rows.
#[derive(Clone)]
pub struct PriceRepository {
    pool: Arc<PgPool>,
}

impl PriceRepository {
    /// Creates a new PriceRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Inserts records, replacing the price of any row that already exists
    /// under the same (asset, timestamp) key.
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn add_or_update_many(&self, records: &[PriceRecord]) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }
        tracing::info!(rows = records.len(), "upserting price records");
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO prices (asset_id, unix_timestamp, price_usd)
                VALUES ($1, $2, $3)
                ON CONFLICT (asset_id, unix_timestamp) DO UPDATE SET
                    price_usd = EXCLUDED.price_usd
                "#,
            )
            .bind(record.asset_id.as_str())
            .bind(record.timestamp.as_seconds())
            .bind(record.price_usd)
            .execute(self.pool.as_ref())
            .await?;
        }
        Ok(records.len() as u64)
    }

    /// Exact-timestamp lookup across all assets.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_by_timestamp(
        &self,
        timestamp: UnixTime,
    ) -> Result<Vec<PriceRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM prices WHERE unix_timestamp = $1")
            .bind(timestamp.as_seconds())
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(PriceRecord::from_row).collect()
    }

    /// One asset's price history ordered by timestamp ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_by_asset(&self, asset_id: &AssetId) -> Result<Vec<PriceRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM prices
            WHERE asset_id = $1
            ORDER BY unix_timestamp ASC
            "#,
        )
        .bind(asset_id.as_str())
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(PriceRecord::from_row).collect()
    }

    /// Full scan ordered by timestamp ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_all(&self) -> Result<Vec<PriceRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM prices ORDER BY unix_timestamp ASC")
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(PriceRecord::from_row).collect()
    }

    /// Per-asset earliest/latest observed timestamps.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_data_boundaries(
        &self,
    ) -> Result<HashMap<AssetId, DataBoundary>, sqlx::Error> {
        let records = self.get_all().await?;
        Ok(find_data_boundaries(&records))
    }

    /// Per-asset latest timestamp inside `[from, to]`.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_latest_by_asset_between(
        &self,
        from: UnixTime,
        to: UnixTime,
    ) -> Result<HashMap<AssetId, UnixTime>, sqlx::Error> {
        let records = self.get_all().await?;
        Ok(find_latest_by_asset_between(&records, from, to))
    }

    /// Deletes every row.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prices")
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes rows older than a timestamp.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_before(&self, before: UnixTime) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prices WHERE unix_timestamp < $1")
            .bind(before.as_seconds())
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
