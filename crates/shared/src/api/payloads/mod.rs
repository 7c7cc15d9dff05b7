use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub mod exercises;
pub mod logs;
pub mod users;

/// Reads a calendar day from either `YYYY-MM-DD` or an RFC 3339 timestamp.
/// Timestamps are taken as the UTC day they fall on.
///
/// Days are stored and compared as `YYYY-MM-DD` text, so only four digit
/// years are accepted
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .filter(|day| (0..=9999).contains(&day.year()))
}

/// Query strings and forms send empty strings for fields left blank
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_plain_days() {
        assert_eq!(parse_day("2024-01-05"), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(parse_day(" 2024-12-31 "), NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn parses_timestamps_as_utc_days() {
        assert_eq!(
            parse_day("2024-01-05T23:30:00-02:00"),
            NaiveDate::from_ymd_opt(2024, 1, 6)
        );
        assert_eq!(
            parse_day("2024-01-05T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "yesterday", "2024-13-01", "2024-02-30", "05/01/2024"] {
            assert_eq!(parse_day(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        for raw in ["+10000-01-01", "-0001-01-01", "10000-01-01"] {
            assert_eq!(parse_day(raw), None, "{raw:?}");
        }
        assert_eq!(parse_day("0000-01-01"), NaiveDate::from_ymd_opt(0, 1, 1));
        assert_eq!(parse_day("9999-12-31"), NaiveDate::from_ymd_opt(9999, 12, 31));
    }
}
