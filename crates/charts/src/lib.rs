//! Chart series construction for the on-chain value dashboard.
//!
//! This crate turns sparse per-timestamp records into dense, evenly-spaced
//! series ready for plotting:
//! - Assembling raw ledger-precision integers into display-number points
//! - Gap filling by carrying the last known value forward
//! - Array serialization of chart points

/// Prelude module for convenient imports.
pub mod prelude;

/// Point assembly from raw records.
pub mod assemble;
/// Dense-series gap filling.
pub mod gap_fill;
/// Chart point types and serialization.
pub mod point;

pub use assemble::{AssetBalance, assemble_token_points, assemble_value_points};
pub use gap_fill::{chart_points, fill_missing_hours};
pub use point::{ChartPoint, TokenChartPoint};
