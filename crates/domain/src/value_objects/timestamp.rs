use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const HOUR_SECONDS: i64 = 3600;

/// A point in time expressed as unix seconds, truncated to hour boundaries
/// everywhere chart data is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTime(i64);

impl UnixTime {
    pub fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    pub fn from_hours(hours: i64) -> Self {
        Self(hours * HOUR_SECONDS)
    }

    pub fn as_seconds(&self) -> i64 {
        self.0
    }

    pub fn add_hours(&self, hours: i64) -> Self {
        Self(self.0 + hours * HOUR_SECONDS)
    }

    /// Truncates down to the enclosing hour boundary.
    pub fn start_of_hour(&self) -> Self {
        Self(self.0.div_euclid(HOUR_SECONDS) * HOUR_SECONDS)
    }

    pub fn is_hour_aligned(&self) -> bool {
        self.0.rem_euclid(HOUR_SECONDS) == 0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

impl From<DateTime<Utc>> for UnixTime {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp())
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().format("%Y-%m-%d %H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_arithmetic() {
        let t = UnixTime::from_hours(100);
        assert_eq!(t.as_seconds(), 360_000);
        assert_eq!(t.add_hours(3), UnixTime::from_hours(103));
        assert_eq!(t.add_hours(-1), UnixTime::from_hours(99));
    }

    #[test]
    fn test_start_of_hour() {
        let t = UnixTime::new(360_125);
        assert!(!t.is_hour_aligned());
        assert_eq!(t.start_of_hour(), UnixTime::from_hours(100));
        assert!(t.start_of_hour().is_hour_aligned());

        // Negative timestamps truncate towards the earlier hour.
        let before_epoch = UnixTime::new(-1);
        assert_eq!(before_epoch.start_of_hour(), UnixTime::from_hours(-1));
    }

    #[test]
    fn test_display_is_utc() {
        let t = UnixTime::new(0);
        assert_eq!(t.to_string(), "1970-01-01 00:00");
    }
}
