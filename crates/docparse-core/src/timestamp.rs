//! ISO-8601 timestamp and date handling.
//!
//! Wire timestamps are accepted with an explicit offset (RFC 3339) or without
//! one, in which case UTC is assumed. Dumping always writes RFC 3339 with the
//! stored offset (`Z` for UTC).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_round_trips_with_z_suffix() {
        let ts = parse_timestamp("2024-05-01T12:30:00Z").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T12:30:00Z");
    }

    #[test]
    fn offset_is_preserved() {
        let ts = parse_timestamp("2024-05-01T12:30:00.250+02:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T12:30:00.250+02:00");
    }

    #[test]
    fn naive_timestamp_is_utc() {
        let ts = parse_timestamp("2024-05-01T12:30:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T12:30:00Z");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_date("2024-13-01").is_none());
    }
}
