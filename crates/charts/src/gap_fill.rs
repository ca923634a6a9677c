use crate::assemble::{AssetBalance, assemble_token_points};
use crate::point::{ChartPoint, TokenChartPoint};
use std::collections::HashMap;
use tvl_domain::error::ConversionError;
use tvl_domain::value_objects::UnixTime;

/// Expands a sparse series into a dense one covering every `step_hours` slot
/// between the first and last timestamp, inclusive. Slots without an exact
/// match repeat the previously emitted tuple, so the forward-fill chains
/// through synthesized gaps.
///
/// Invariants the caller upholds (checked in debug builds only):
/// - `step_hours` is positive
/// - `points` is strictly ascending by timestamp, so the first element holds
///   the minimum timestamp and the first emitted slot always comes from real
///   data
///
/// Empty input yields an empty series. The output holds
/// `(max - min) / step + 1` points; with sparse input this is expected to be
/// far larger than the input.
pub fn fill_missing_hours<const N: usize>(
    points: &[ChartPoint<N>],
    step_hours: u64,
) -> Vec<ChartPoint<N>> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    debug_assert!(step_hours > 0, "step must be positive");
    debug_assert!(
        points.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
        "points must be strictly ascending by timestamp"
    );

    let index: HashMap<UnixTime, [f64; N]> =
        points.iter().map(|p| (p.timestamp, p.values)).collect();

    let span_seconds = last.timestamp.as_seconds() - first.timestamp.as_seconds();
    let mut filled = Vec::with_capacity((span_seconds / (step_hours as i64 * 3600) + 1) as usize);

    let mut last_known = first.values;
    let mut timestamp = first.timestamp;
    while timestamp <= last.timestamp {
        if let Some(values) = index.get(&timestamp) {
            last_known = *values;
        }
        filled.push(ChartPoint::new(timestamp, last_known));
        timestamp = timestamp.add_hours(step_hours as i64);
    }
    filled
}

/// Builds the dense chart series for one asset identity: assembles display
/// points from the raw balances and fills every missing `step_hours` slot.
/// This is the entry point the serving layer calls per chart request.
///
/// # Errors
/// Returns an error if a raw value cannot be converted.
pub fn chart_points(
    balances: &[AssetBalance],
    step_hours: u64,
    decimals: i32,
    usd_first: bool,
) -> Result<Vec<TokenChartPoint>, ConversionError> {
    let assembled = assemble_token_points(balances, decimals, usd_first)?;
    Ok(fill_missing_hours(&assembled, step_hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(hour: i64, values: [f64; 2]) -> TokenChartPoint {
        ChartPoint::new(UnixTime::from_hours(hour), values)
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert_eq!(fill_missing_hours::<2>(&[], 1), vec![]);
    }

    #[test]
    fn test_single_point_is_returned_unchanged() {
        let input = vec![point(5, [1.0, 2.0])];
        assert_eq!(fill_missing_hours(&input, 1), input);
    }

    #[test]
    fn test_gap_is_filled_with_previous_values() {
        // The concrete dashboard scenario: two observations three hours
        // apart, charted at a one hour step.
        let input = [point(0, [100.0, 200.0]), point(3, [150.0, 300.0])];
        let expected = vec![
            point(0, [100.0, 200.0]),
            point(1, [100.0, 200.0]),
            point(2, [100.0, 200.0]),
            point(3, [150.0, 300.0]),
        ];
        assert_eq!(fill_missing_hours(&input, 1), expected);
    }

    #[test]
    fn test_forward_fill_chains_through_synthesized_points() {
        let input = [
            point(0, [1.0, 10.0]),
            point(2, [2.0, 20.0]),
            point(6, [3.0, 30.0]),
        ];
        let filled = fill_missing_hours(&input, 1);

        assert_eq!(filled.len(), 7);
        // Hours 3..=5 all repeat the hour-2 tuple, each copied from the
        // previously emitted (synthesized) point.
        for hour in 3..6 {
            assert_eq!(filled[hour].values, [2.0, 20.0]);
        }
        assert_eq!(filled[6].values, [3.0, 30.0]);
    }

    #[test]
    fn test_density_and_exact_step() {
        let input = [point(4, [1.0, 1.0]), point(34, [2.0, 2.0])];
        let filled = fill_missing_hours(&input, 6);

        // floor((34 - 4) / 6) + 1 points, each exactly six hours apart.
        assert_eq!(filled.len(), 6);
        for (i, p) in filled.iter().enumerate() {
            assert_eq!(p.timestamp, UnixTime::from_hours(4 + 6 * i as i64));
        }
        assert_eq!(filled.last().unwrap().values, [2.0, 2.0]);
    }

    #[test]
    fn test_dense_input_is_returned_unchanged() {
        let input: Vec<_> = (0..5).map(|h| point(h, [h as f64, 0.0])).collect();
        assert_eq!(fill_missing_hours(&input, 1), input);
    }

    #[test]
    fn test_matching_timestamps_pass_through_exactly() {
        let input = [
            point(0, [0.1, 0.2]),
            point(5, [123.456, 789.012]),
            point(9, [0.3, 0.4]),
        ];
        let filled = fill_missing_hours(&input, 1);
        assert_eq!(filled[0].values, [0.1, 0.2]);
        assert_eq!(filled[5].values, [123.456, 789.012]);
        assert_eq!(filled[9].values, [0.3, 0.4]);
    }

    #[test]
    fn test_wide_tuples_fill_every_slot() {
        let input = [
            ChartPoint::new(UnixTime::from_hours(0), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
            ChartPoint::new(UnixTime::from_hours(2), [7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]),
        ];
        let filled = fill_missing_hours(&input, 1);

        assert_eq!(filled.len(), 3);
        assert_eq!(filled[1].values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(filled[2].values, [7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_chart_points_composes_assembly_and_fill() {
        let balances = [
            AssetBalance {
                timestamp: UnixTime::from_hours(0),
                asset: 100_000_000,
                usd: 20_000,
            },
            AssetBalance {
                timestamp: UnixTime::from_hours(3),
                asset: 150_000_000,
                usd: 30_000,
            },
        ];
        let series = chart_points(&balances, 1, 6, false).unwrap();

        let expected = vec![
            point(0, [100.0, 200.0]),
            point(1, [100.0, 200.0]),
            point(2, [100.0, 200.0]),
            point(3, [150.0, 300.0]),
        ];
        assert_eq!(series, expected);
    }
}
