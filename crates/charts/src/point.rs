use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};
use tvl_domain::value_objects::UnixTime;

/// One point of a chart series: a timestamp plus a fixed number of metric
/// slots. Slot `i` refers to the same logical metric across a whole series;
/// the slot meaning is chosen at assembly time and documented by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint<const N: usize> {
    pub timestamp: UnixTime,
    pub values: [f64; N],
}

/// Token series point: one slot for the asset amount, one for the USD value.
/// Which comes first is selected when the series is assembled.
pub type TokenChartPoint = ChartPoint<2>;

impl<const N: usize> ChartPoint<N> {
    pub fn new(timestamp: UnixTime, values: [f64; N]) -> Self {
        Self { timestamp, values }
    }
}

/// Serializes as the flat array `[timestamp, v1, ..., vN]` so a series maps
/// directly onto the array-of-arrays format charts consume.
impl<const N: usize> Serialize for ChartPoint<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(N + 1))?;
        seq.serialize_element(&self.timestamp)?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_flat_array() {
        let point = ChartPoint::new(UnixTime::from_hours(2), [1.5, 300.0]);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, "[7200,1.5,300.0]");
    }

    #[test]
    fn test_wide_point_keeps_slot_order() {
        let point = ChartPoint::new(UnixTime::new(0), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, "[0,1.0,2.0,3.0,4.0,5.0,6.0,7.0]");
    }
}
