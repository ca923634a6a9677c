use serde::{Deserialize, Serialize};
use tvl_charts::point::TokenChartPoint;

/// Chart payload: a schema header naming each tuple slot, then the dense
/// series as array-of-arrays with the timestamp in slot 0.
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub types: Vec<&'static str>,
    pub data: Vec<TokenChartPoint>,
}

impl ChartResponse {
    pub fn token_series(data: Vec<TokenChartPoint>, usd_first: bool) -> Self {
        let types = if usd_first {
            vec!["timestamp", "usd", "asset"]
        } else {
            vec!["timestamp", "asset", "usd"]
        };
        Self { types, data }
    }
}

/// Query parameters of the chart endpoint.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Step size in hours between consecutive points.
    #[serde(default = "default_hours")]
    pub hours: u64,
    /// Put the USD slot before the asset slot.
    #[serde(default)]
    pub usd_first: bool,
}

fn default_hours() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvl_charts::point::ChartPoint;
    use tvl_domain::value_objects::UnixTime;

    #[test]
    fn test_chart_response_shape() {
        let response = ChartResponse::token_series(
            vec![
                ChartPoint::new(UnixTime::from_hours(1), [1.5, 300.0]),
                ChartPoint::new(UnixTime::from_hours(2), [2.5, 500.0]),
            ],
            false,
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "types": ["timestamp", "asset", "usd"],
                "data": [[3600, 1.5, 300.0], [7200, 2.5, 500.0]],
            })
        );
    }

    #[test]
    fn test_usd_first_renames_slots() {
        let response = ChartResponse::token_series(vec![], true);
        assert_eq!(response.types, ["timestamp", "usd", "asset"]);
    }
}
