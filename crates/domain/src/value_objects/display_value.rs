use crate::error::ConversionError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Currency-denominated raw values carry two implied fractional digits.
pub const USD_DECIMALS: i32 = 2;

/// Converts an integer count of an asset's smallest denomination into a
/// chart-ready display number.
///
/// The division by `10^decimals` happens in exact decimal arithmetic
/// (integer mantissa plus scale); the value only becomes a binary float at
/// the very end, so raw magnitudes beyond the exact range of `f64` do not
/// drift before the final rounding.
///
/// # Errors
/// Returns `ConversionError::InvalidDecimals` for a negative decimal count
/// and `ConversionError::ValueOutOfRange` when the exact decimal form cannot
/// hold the value.
pub fn as_display_number(raw: i128, decimals: i32) -> Result<f64, ConversionError> {
    if decimals < 0 {
        return Err(ConversionError::InvalidDecimals(decimals));
    }
    let exact = Decimal::try_from_i128_with_scale(raw, decimals as u32)
        .map_err(|_| ConversionError::ValueOutOfRange { raw, decimals })?;
    exact
        .to_f64()
        .ok_or(ConversionError::ValueOutOfRange { raw, decimals })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_multiples_convert_exactly() {
        // raw = k * 10^d must come back as exactly k.
        assert_eq!(as_display_number(5_000_000, 6).unwrap(), 5.0);
        assert_eq!(as_display_number(123, 0).unwrap(), 123.0);
        assert_eq!(
            as_display_number(123 * 10i128.pow(18), 18).unwrap(),
            123.0
        );
        assert_eq!(as_display_number(0, 18).unwrap(), 0.0);
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(as_display_number(314, USD_DECIMALS).unwrap(), 3.14);
        assert_eq!(as_display_number(1_500_000_000_000_000_000, 18).unwrap(), 1.5);
        assert_eq!(as_display_number(1, 2).unwrap(), 0.01);
    }

    #[test]
    fn test_sign_is_preserved() {
        assert_eq!(as_display_number(-150, 2).unwrap(), -1.5);
        assert_eq!(as_display_number(-1, 0).unwrap(), -1.0);
    }

    #[test]
    fn test_large_magnitude_divides_before_float() {
        // 2^53 * 10^18 raw units: the raw value is far outside the exact f64
        // integer range, but dividing first lands on an exactly representable
        // number.
        let raw = 9_007_199_254_740_992i128 * 10i128.pow(10);
        assert_eq!(as_display_number(raw, 10).unwrap(), 9_007_199_254_740_992.0);
    }

    #[test]
    fn test_negative_decimals_rejected() {
        assert_eq!(
            as_display_number(100, -1),
            Err(ConversionError::InvalidDecimals(-1))
        );
    }

    #[test]
    fn test_unrepresentable_scale_rejected() {
        // Decimal caps the scale at 28 fractional digits.
        assert!(matches!(
            as_display_number(1, 40),
            Err(ConversionError::ValueOutOfRange { .. })
        ));
    }
}
