//! Storage layer for the on-chain value charting backend.
//!
//! This crate provides Postgres repositories for the raw time series the
//! dashboard is built from (balances, prices, total supplies, and the
//! resolved per-asset reports), plus the pure boundary-discovery functions
//! the ingestion scheduler relies on.

/// Boundary and latest-between discovery over record sets.
pub mod boundaries;
/// Repository implementations for database persistence.
pub mod repositories;

pub use boundaries::{AssetRecord, DataBoundary, find_data_boundaries, find_latest_by_asset_between};
pub use repositories::{
    BalanceRecord, BalanceRepository, Database, PriceRecord, PriceRepository, ReportRecord,
    ReportRepository, TotalSupplyRecord, TotalSupplyRepository,
};
