//! Token total supply repository.

use crate::boundaries::{
    AssetRecord, DataBoundary, find_data_boundaries, find_latest_by_asset_between,
};
use crate::repositories::{decimal_to_i128, i128_to_decimal};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;
use tvl_domain::value_objects::{AssetId, ChainId, UnixTime};

/// Database record for an observed token total supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalSupplyRecord {
    /// Hour-aligned observation time.
    pub timestamp: UnixTime,
    /// Asset identity.
    pub asset_id: AssetId,
    /// Chain the token contract lives on.
    pub chain_id: ChainId,
    /// Total supply in base units.
    pub total_supply: i128,
}

impl TotalSupplyRecord {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let total_supply: Decimal = row.try_get("total_supply")?;
        Ok(Self {
            timestamp: UnixTime::new(row.try_get::<i64, _>("unix_timestamp")?),
            asset_id: AssetId::new(row.try_get::<String, _>("asset_id")?),
            chain_id: ChainId::new(row.try_get::<i64, _>("chain_id")? as u64),
            total_supply: decimal_to_i128(total_supply, "total_supply")?,
        })
    }
}

impl AssetRecord for TotalSupplyRecord {
    fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }
    fn timestamp(&self) -> UnixTime {
        self.timestamp
    }
}

/// Repository for total supply rows.
#[derive(Clone)]
pub struct TotalSupplyRepository {
    pool: Arc<PgPool>,
}

impl TotalSupplyRepository {
    /// Creates a new TotalSupplyRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Inserts records, replacing the supply of any row that already exists
    /// under the same (chain, asset, timestamp) key.
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn add_or_update_many(
        &self,
        records: &[TotalSupplyRecord],
    ) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }
        tracing::info!(rows = records.len(), "upserting total supply records");
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO total_supplies (chain_id, asset_id, unix_timestamp, total_supply)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (chain_id, asset_id, unix_timestamp) DO UPDATE SET
                    total_supply = EXCLUDED.total_supply
                "#,
            )
            .bind(record.chain_id.value() as i64)
            .bind(record.asset_id.as_str())
            .bind(record.timestamp.as_seconds())
            .bind(i128_to_decimal(record.total_supply)?)
            .execute(self.pool.as_ref())
            .await?;
        }
        Ok(records.len() as u64)
    }

    /// Exact-timestamp lookup scoped to one chain.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_by_timestamp(
        &self,
        chain_id: ChainId,
        timestamp: UnixTime,
    ) -> Result<Vec<TotalSupplyRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM total_supplies
            WHERE chain_id = $1 AND unix_timestamp = $2
            "#,
        )
        .bind(chain_id.value() as i64)
        .bind(timestamp.as_seconds())
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(TotalSupplyRecord::from_row).collect()
    }

    /// Full scan ordered by timestamp ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_all(&self) -> Result<Vec<TotalSupplyRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM total_supplies ORDER BY unix_timestamp ASC")
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(TotalSupplyRecord::from_row).collect()
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
        let result = sqlx::query("DELETE FROM total_supplies")
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes rows older than a timestamp.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_before(&self, before: UnixTime) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM total_supplies WHERE unix_timestamp < $1")
            .bind(before.as_seconds())
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
