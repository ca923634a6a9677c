//! Core domain types for the on-chain value charting backend.

pub mod entities;
pub mod error;
pub mod value_objects;

pub use error::ConversionError;
