//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use tvl_charts::prelude::*;
//! ```

pub use crate::assemble::{AssetBalance, assemble_token_points, assemble_value_points};
pub use crate::gap_fill::{chart_points, fill_missing_hours};
pub use crate::point::{ChartPoint, TokenChartPoint};

pub use tvl_domain::error::ConversionError;
pub use tvl_domain::value_objects::{USD_DECIMALS, UnixTime, as_display_number};
