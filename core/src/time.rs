//! Time related utils.

use chrono::Utc;

/// The timestamp type used across the workspace.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Seconds since the Unix epoch, the wire value of `oauth_timestamp`.
pub fn unix_timestamp(t: DateTime) -> u64 {
    t.timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_unix_timestamp() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(unix_timestamp(t), 1704067200);
    }
}
