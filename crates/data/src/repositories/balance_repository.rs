//! Raw per-holder balance repository.

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

/// Database record for an observed holder balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRecord {
    /// Hour-aligned observation time.
    pub timestamp: UnixTime,
    /// Address whose balance was observed.
    pub holder_address: String,
    /// Asset identity.
    pub asset_id: AssetId,
    /// Chain the balance lives on.
    pub chain_id: ChainId,
    /// Balance in base units.
    pub balance: i128,
}

impl BalanceRecord {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let balance: Decimal = row.try_get("balance")?;
        Ok(Self {
            timestamp: UnixTime::new(row.try_get::<i64, _>("unix_timestamp")?),
            holder_address: row.try_get("holder_address")?,
            asset_id: AssetId::new(row.try_get::<String, _>("asset_id")?),
            chain_id: ChainId::new(row.try_get::<i64, _>("chain_id")? as u64),
            balance: decimal_to_i128(balance, "balance")?,
        })
    }
}

impl AssetRecord for BalanceRecord {
    fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }
    fn timestamp(&self) -> UnixTime {
        self.timestamp
    }
}

/// Repository for holder balance rows.
#[derive(Clone)]
pub struct BalanceRepository {
    pool: Arc<PgPool>,
}

impl BalanceRepository {
    /// Creates a new BalanceRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Inserts records, replacing the balance of any row that already exists
    /// under the same (chain, timestamp, holder, asset) key.
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn add_or_update_many(&self, records: &[BalanceRecord]) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }
        tracing::info!(rows = records.len(), "upserting balance records");
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO balances (chain_id, unix_timestamp, holder_address, asset_id, balance)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (chain_id, unix_timestamp, holder_address, asset_id) DO UPDATE SET
                    balance = EXCLUDED.balance
                "#,
            )
            .bind(record.chain_id.value() as i64)
            .bind(record.timestamp.as_seconds())
            .bind(&record.holder_address)
            .bind(record.asset_id.as_str())
            .bind(i128_to_decimal(record.balance)?)
            .execute(self.pool.as_ref())
            .await?;
        }
        Ok(records.len() as u64)
    }

    /// Exact-timestamp lookup scoped to one chain.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_by_chain_and_timestamp(
        &self,
        chain_id: ChainId,
        timestamp: UnixTime,
    ) -> Result<Vec<BalanceRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM balances
            WHERE chain_id = $1 AND unix_timestamp = $2
            "#,
        )
        .bind(chain_id.value() as i64)
        .bind(timestamp.as_seconds())
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(BalanceRecord::from_row).collect()
    }

    /// Exact-timestamp lookup across all chains.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_by_timestamp(
        &self,
        timestamp: UnixTime,
    ) -> Result<Vec<BalanceRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM balances WHERE unix_timestamp = $1")
            .bind(timestamp.as_seconds())
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(BalanceRecord::from_row).collect()
    }

    /// Full scan ordered by timestamp ascending.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_all(&self) -> Result<Vec<BalanceRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM balances ORDER BY unix_timestamp ASC")
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(BalanceRecord::from_row).collect()
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
        let result = sqlx::query("DELETE FROM balances")
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes rows older than a timestamp. Used by the external retention
    /// job when downsampling old data.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_before(&self, before: UnixTime) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM balances WHERE unix_timestamp < $1")
            .bind(before.as_seconds())
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
