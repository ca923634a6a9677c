//! Per-asset boundary discovery over in-memory record sets.
//!
//! The ingestion scheduler uses these to decide which timestamps still need
//! syncing: the observed min/max per asset, and the freshest record inside a
//! window. Both operate on whatever record type the repositories return.

use serde::Serialize;
use std::collections::HashMap;
use tvl_domain::value_objects::{AssetId, UnixTime};

/// Any stored row keyed by an asset identity and an hour-aligned timestamp.
pub trait AssetRecord {
    fn asset_id(&self) -> &AssetId;
    fn timestamp(&self) -> UnixTime;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataBoundary {
    pub earliest: UnixTime,
    pub latest: UnixTime,
}

/// Returns the earliest and latest observed timestamp per asset. Assets with
/// no records are absent from the result, never present with sentinel bounds.
pub fn find_data_boundaries<R: AssetRecord>(records: &[R]) -> HashMap<AssetId, DataBoundary> {
    let mut boundaries: HashMap<AssetId, DataBoundary> = HashMap::new();
    for record in records {
        let timestamp = record.timestamp();
        boundaries
            .entry(record.asset_id().clone())
            .and_modify(|boundary| {
                boundary.earliest = boundary.earliest.min(timestamp);
                boundary.latest = boundary.latest.max(timestamp);
            })
            .or_insert(DataBoundary {
                earliest: timestamp,
                latest: timestamp,
            });
    }
    boundaries
}

/// Returns, per asset, the latest timestamp `t` with `from <= t <= to` (both
/// bounds inclusive). Assets with no record in the window are absent.
pub fn find_latest_by_asset_between<R: AssetRecord>(
    records: &[R],
    from: UnixTime,
    to: UnixTime,
) -> HashMap<AssetId, UnixTime> {
    let mut latest: HashMap<AssetId, UnixTime> = HashMap::new();
    for record in records {
        let timestamp = record.timestamp();
        if timestamp < from || timestamp > to {
            continue;
        }
        latest
            .entry(record.asset_id().clone())
            .and_modify(|known| *known = (*known).max(timestamp))
            .or_insert(timestamp);
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        asset_id: AssetId,
        timestamp: UnixTime,
    }

    impl AssetRecord for Row {
        fn asset_id(&self) -> &AssetId {
            &self.asset_id
        }
        fn timestamp(&self) -> UnixTime {
            self.timestamp
        }
    }

    fn row(asset: &str, hour: i64) -> Row {
        Row {
            asset_id: AssetId::new(asset),
            timestamp: UnixTime::from_hours(hour),
        }
    }

    #[test]
    fn test_boundaries_of_single_and_multi_row_assets() {
        let records = [row("eth", 1), row("eth", 2), row("dai", 3)];
        let result = find_data_boundaries(&records);

        assert_eq!(result.len(), 2);
        assert_eq!(
            result[&AssetId::new("eth")],
            DataBoundary {
                earliest: UnixTime::from_hours(1),
                latest: UnixTime::from_hours(2),
            }
        );
        assert_eq!(
            result[&AssetId::new("dai")],
            DataBoundary {
                earliest: UnixTime::from_hours(3),
                latest: UnixTime::from_hours(3),
            }
        );
    }

    #[test]
    fn test_boundaries_ignore_record_order() {
        let records = [row("eth", 9), row("eth", 2), row("eth", 5)];
        let result = find_data_boundaries(&records);
        let boundary = result[&AssetId::new("eth")];
        assert_eq!(boundary.earliest, UnixTime::from_hours(2));
        assert_eq!(boundary.latest, UnixTime::from_hours(9));
    }

    #[test]
    fn test_boundaries_of_empty_set() {
        let records: [Row; 0] = [];
        assert!(find_data_boundaries(&records).is_empty());
    }

    #[test]
    fn test_latest_between_excludes_out_of_range() {
        // eth has records at hours 1 and 5; only hour 1 falls inside [0, 3].
        let records = [row("eth", 1), row("eth", 5)];
        let result =
            find_latest_by_asset_between(&records, UnixTime::from_hours(0), UnixTime::from_hours(3));

        assert_eq!(result.len(), 1);
        assert_eq!(result[&AssetId::new("eth")], UnixTime::from_hours(1));
    }

    #[test]
    fn test_latest_between_bounds_are_inclusive() {
        let records = [row("eth", 2), row("dai", 7), row("eth", 4)];
        let result =
            find_latest_by_asset_between(&records, UnixTime::from_hours(2), UnixTime::from_hours(7));

        assert_eq!(result[&AssetId::new("eth")], UnixTime::from_hours(4));
        assert_eq!(result[&AssetId::new("dai")], UnixTime::from_hours(7));
    }

    #[test]
    fn test_latest_between_on_empty_set() {
        let records: [Row; 0] = [];
        let result =
            find_latest_by_asset_between(&records, UnixTime::from_hours(0), UnixTime::from_hours(9));
        assert!(result.is_empty());
    }
}
