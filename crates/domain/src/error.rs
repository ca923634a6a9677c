use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("decimal places must be non-negative, got {0}")]
    InvalidDecimals(i32),
    #[error("value {raw} with {decimals} decimal places has no exact decimal representation")]
    ValueOutOfRange { raw: i128, decimals: i32 },
}
