//! Time value types.
//!
//! Issue age is derived, never stored: it is recomputed from the creation
//! timestamp and the evaluation instant every time a run classifies an issue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_WEEK: i64 = 7;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 / ISO 8601 string such as `2024-01-29T12:00:00Z`.
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds since the Unix epoch, sub-second precision truncated.
    pub fn unix_seconds(self) -> i64 {
        self.0.timestamp()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

/// Number of whole weeks an issue has been open.
///
/// Truncated twice: elapsed seconds down to whole days, then whole days down
/// to whole weeks. An issue is one week old only after a full `7 * 86400`
/// seconds have elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeksOld(u32);

impl WeeksOld {
    /// Creates a [`WeeksOld`] from a raw week count.
    pub fn new(weeks: u32) -> Self {
        Self(weeks)
    }

    /// Computes the age of something created at `created_at`, evaluated at `now`.
    ///
    /// A creation time after `now` yields zero weeks.
    pub fn between(created_at: Timestamp, now: Timestamp) -> Self {
        let elapsed = now.unix_seconds() - created_at.unix_seconds();
        let days = elapsed.div_euclid(SECONDS_PER_DAY);
        let weeks = days.div_euclid(DAYS_PER_WEEK);
        Self(u32::try_from(weeks.max(0)).unwrap_or(u32::MAX))
    }

    /// Returns the underlying week count.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for WeeksOld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> Timestamp {
        Timestamp::parse_rfc3339("2024-01-29T12:00:00Z").unwrap()
    }

    fn ago(duration: Duration) -> Timestamp {
        Timestamp::from_utc(now().as_datetime() - duration)
    }

    #[test]
    fn truncates_to_whole_weeks() {
        assert_eq!(WeeksOld::between(ago(Duration::days(3)), now()).as_u32(), 0);
        assert_eq!(WeeksOld::between(ago(Duration::days(13)), now()).as_u32(), 1);
        assert_eq!(WeeksOld::between(ago(Duration::weeks(5)), now()).as_u32(), 5);
    }

    #[test]
    fn one_second_short_of_a_week_is_zero_weeks() {
        let created = ago(Duration::weeks(1) - Duration::seconds(1));
        assert_eq!(WeeksOld::between(created, now()).as_u32(), 0);

        let created = ago(Duration::weeks(1));
        assert_eq!(WeeksOld::between(created, now()).as_u32(), 1);
    }

    #[test]
    fn future_creation_time_is_zero_weeks() {
        let created = Timestamp::from_utc(now().as_datetime() + Duration::days(30));
        assert_eq!(WeeksOld::between(created, now()), WeeksOld::new(0));
    }

    #[test]
    fn sub_second_precision_is_ignored() {
        let created = Timestamp::parse_rfc3339("2024-01-22T12:00:00.900Z").unwrap();
        let now = Timestamp::parse_rfc3339("2024-01-29T12:00:00.100Z").unwrap();
        assert_eq!(WeeksOld::between(created, now).as_u32(), 1);
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        assert!(Timestamp::parse_rfc3339("last tuesday").is_none());
    }
}
