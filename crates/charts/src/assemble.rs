use crate::point::{ChartPoint, TokenChartPoint};
use tvl_domain::error::ConversionError;
use tvl_domain::value_objects::{USD_DECIMALS, UnixTime, as_display_number};

/// One resolved balance observation for a single asset identity: the asset
/// amount in base units and its USD value in cents, both ledger-precision
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetBalance {
    pub timestamp: UnixTime,
    pub asset: i128,
    pub usd: i128,
}

/// Maps raw balance entries onto display-number chart points, one per entry.
///
/// The input must already be sorted ascending by timestamp with one entry per
/// timestamp (the store guarantees both); no sorting, deduplication, or gap
/// filling happens here. `usd_first` only relabels the two slots.
///
/// # Errors
/// Returns an error if a value cannot be converted (see [`as_display_number`]).
pub fn assemble_token_points(
    balances: &[AssetBalance],
    decimals: i32,
    usd_first: bool,
) -> Result<Vec<TokenChartPoint>, ConversionError> {
    balances
        .iter()
        .map(|balance| {
            let usd = as_display_number(balance.usd, USD_DECIMALS)?;
            let asset = as_display_number(balance.asset, decimals)?;
            let values = if usd_first { [usd, asset] } else { [asset, usd] };
            Ok(ChartPoint::new(balance.timestamp, values))
        })
        .collect()
}

/// N-metric variant for breakdown series where every slot is a currency
/// value (e.g. one slot per chain).
///
/// # Errors
/// Returns an error if a value cannot be converted.
pub fn assemble_value_points<const N: usize>(
    rows: &[(UnixTime, [i128; N])],
) -> Result<Vec<ChartPoint<N>>, ConversionError> {
    rows.iter()
        .map(|(timestamp, raw)| {
            let mut values = [0.0; N];
            for (slot, raw_value) in values.iter_mut().zip(raw) {
                *slot = as_display_number(*raw_value, USD_DECIMALS)?;
            }
            Ok(ChartPoint::new(*timestamp, values))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(hour: i64, asset: i128, usd: i128) -> AssetBalance {
        AssetBalance {
            timestamp: UnixTime::from_hours(hour),
            asset,
            usd,
        }
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let points = assemble_token_points(&[], 18, false).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_length_and_order_preserved() {
        let balances = [
            balance(0, 1_000_000, 500),
            balance(1, 2_000_000, 1000),
            balance(5, 3_000_000, 1500),
        ];
        let points = assemble_token_points(&balances, 6, false).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].timestamp, UnixTime::from_hours(0));
        assert_eq!(points[2].timestamp, UnixTime::from_hours(5));
        assert_eq!(points[1].values, [2.0, 10.0]);
    }

    #[test]
    fn test_usd_first_relabels_slots() {
        let balances = [balance(0, 1_500_000, 12345)];

        let asset_first = assemble_token_points(&balances, 6, false).unwrap();
        assert_eq!(asset_first[0].values, [1.5, 123.45]);

        let usd_first = assemble_token_points(&balances, 6, true).unwrap();
        assert_eq!(usd_first[0].values, [123.45, 1.5]);
    }

    #[test]
    fn test_invalid_decimals_propagates() {
        let balances = [balance(0, 1, 1)];
        assert_eq!(
            assemble_token_points(&balances, -2, false),
            Err(ConversionError::InvalidDecimals(-2))
        );
    }

    #[test]
    fn test_value_points_convert_every_slot_as_currency() {
        let rows = [(UnixTime::from_hours(0), [100i128, 200, 300])];
        let points = assemble_value_points(&rows).unwrap();
        assert_eq!(points[0].values, [1.0, 2.0, 3.0]);
    }
}
