// Validation utilities module
// Entry-date parsing and canonical formatting for mood entries

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};

/// Canonical storage/display format for entry dates, second precision.
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a client-supplied entry date.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`, any offset, converted to UTC),
/// the canonical `YYYY-MM-DD HH:MM:SS` form, the same with a `T` separator,
/// and a bare `YYYY-MM-DD` date (midnight). Sub-second precision is dropped.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc().trunc_subsecs(0));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, ENTRY_DATE_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

/// Formats an entry date in the canonical `YYYY-MM-DD HH:MM:SS` form.
pub fn format_entry_date(entry_date: &NaiveDateTime) -> String {
    entry_date.format(ENTRY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_utc() {
        let dt = parse_entry_date("2024-01-01T10:00:00Z").unwrap();
        assert_eq!(format_entry_date(&dt), "2024-01-01 10:00:00");
    }

    #[test]
    fn parses_rfc3339_with_offset_and_converts_to_utc() {
        let dt = parse_entry_date("2024-01-01T10:00:00+02:00").unwrap();
        assert_eq!(format_entry_date(&dt), "2024-01-01 08:00:00");
    }

    #[test]
    fn drops_subsecond_precision() {
        let dt = parse_entry_date("2024-01-01T10:00:00.789Z").unwrap();
        assert_eq!(format_entry_date(&dt), "2024-01-01 10:00:00");
    }

    #[test]
    fn parses_canonical_form() {
        let dt = parse_entry_date("2024-06-15 23:59:59").unwrap();
        assert_eq!(format_entry_date(&dt), "2024-06-15 23:59:59");
    }

    #[test]
    fn parses_t_separated_form_without_offset() {
        let dt = parse_entry_date("2024-06-15T08:30:00").unwrap();
        assert_eq!(format_entry_date(&dt), "2024-06-15 08:30:00");
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_entry_date("2024-02-29").unwrap();
        assert_eq!(format_entry_date(&dt), "2024-02-29 00:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_entry_date("not-a-date").is_none());
        assert!(parse_entry_date("").is_none());
        assert!(parse_entry_date("2024-13-01").is_none());
        assert!(parse_entry_date("2024-02-30 10:00:00").is_none());
    }

    #[test]
    fn canonical_form_round_trips() {
        let dt = parse_entry_date("2024-01-01T10:00:00Z").unwrap();
        let formatted = format_entry_date(&dt);
        let reparsed = parse_entry_date(&formatted).unwrap();
        assert_eq!(dt, reparsed);
    }
}
