//! Time parsing for Frab event fields.
//!
//! Frab publishes each event's start as a local timestamp carrying its UTC
//! offset (`2024-03-01T10:00:00+01:00`) and its length as `HH:MM`. The
//! offset is kept on the parsed value so wall-clock strings can be rendered
//! in the conference's own local time.

use chrono::{DateTime, Duration, FixedOffset};

use crate::error::{ScheduleError, ScheduleResult};

/// Fallback layouts tried after RFC 3339.
const START_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Parses an event start timestamp, keeping its UTC offset.
///
/// Accepts RFC 3339 and a few close variants (space separator, `+0100`
/// offsets, missing seconds). A timestamp without an offset is rejected:
/// there is no implicit local zone.
pub fn parse_start(text: &str) -> ScheduleResult<DateTime<FixedOffset>> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    START_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ScheduleError::unparsable("date", text))
}

/// Parses an `HH:MM` duration.
///
/// Exactly two colon-separated non-negative integers are required; minutes
/// are not capped at 59.
pub fn parse_duration(text: &str) -> ScheduleResult<Duration> {
    let invalid = || ScheduleError::unparsable("duration", text);

    let mut parts = text.trim().split(':');
    let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;

    Ok(Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes)))
}

/// Formats the wall-clock time of `dt` in its own offset as `HH:MM`.
pub fn wall_clock(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleErrorKind;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_start("2024-03-01T10:00:00+01:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 3600);
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_zulu_and_fraction() {
        let dt = parse_start("2024-03-01T10:00:00.750Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.timestamp(), 1_709_287_200);
    }

    #[test]
    fn parses_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        for input in [
            "2024-03-01 10:00:00+01:00",
            "2024-03-01T10:00:00+0100",
            "2024-03-01T10:00+01:00",
            "  2024-03-01T10:00:00+01:00\n",
        ] {
            let dt = parse_start(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(dt.with_timezone(&Utc), expected, "{input}");
        }
    }

    #[test]
    fn rejects_naive_and_garbage() {
        for input in ["2024-03-01T10:00:00", "tomorrow", ""] {
            let err = parse_start(input).unwrap_err();
            assert_eq!(err.kind(), ScheduleErrorKind::UnparsableValue, "{input}");
        }
    }

    #[test]
    fn duration_hours_and_minutes() {
        assert_eq!(parse_duration("01:30").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("0:05").unwrap(), Duration::minutes(5));
        assert_eq!(parse_duration("00:00").unwrap(), Duration::zero());
        assert_eq!(parse_duration(" 02:00 ").unwrap(), Duration::hours(2));
        assert_eq!(parse_duration("00:90").unwrap(), Duration::minutes(90));
    }

    #[test]
    fn duration_rejects_bad_grammar() {
        for input in ["90", "1:2:3", "aa:bb", "-1:00", "", ":30"] {
            let err = parse_duration(input).unwrap_err();
            assert_eq!(err.kind(), ScheduleErrorKind::UnparsableValue, "{input}");
        }
    }

    #[test]
    fn wall_clock_uses_source_offset() {
        let dt = parse_start("2024-03-01T23:05:00-05:00").unwrap();
        assert_eq!(wall_clock(&dt), "23:05");
        assert_eq!(wall_clock(&(dt + Duration::minutes(70))), "00:15");
    }
}
