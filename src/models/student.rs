//! Check-in records and their wire representation.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A visitor check-in as held by the UI.
///
/// Created by the backend; the kiosk only ever holds read-only copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Server-generated timestamp, ISO-8601 without guaranteed offset.
    pub check_in_time: String,
    /// Generated welcome letter; absent when generation failed upstream.
    pub personalized_letter: Option<String>,
}

/// Record shape as returned by `/students` and `/checkin`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentWire {
    pub id: Value,
    pub name: String,
    pub email: String,
    pub check_in_time: String,
    #[serde(default)]
    pub letter: Option<String>,
}

/// Body of a `/checkin` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInRequest {
    pub name: String,
    pub email: String,
}

impl From<StudentWire> for StudentRecord {
    fn from(wire: StudentWire) -> Self {
        let id = match wire.id {
            Value::String(s) => s,
            other => other.to_string(),
        };

        Self {
            id,
            name: wire.name,
            email: wire.email,
            check_in_time: wire.check_in_time,
            personalized_letter: wire.letter,
        }
    }
}

impl StudentRecord {
    /// Check-in day in local time, for list display.
    pub fn check_in_date(&self) -> Option<NaiveDate> {
        parse_timestamp(&self.check_in_time).map(|dt| dt.date())
    }

    /// Check-in day formatted for display, falling back to the raw timestamp.
    pub fn display_date(&self) -> String {
        self.check_in_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.check_in_time.clone())
    }

    /// Case-insensitive substring match against name or email.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }
}

/// Parse a backend timestamp into local wall-clock time.
///
/// Offset-carrying values are converted to local time; naive values are taken as-is.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, email: &str) -> StudentRecord {
        StudentRecord {
            id: "1".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            check_in_time: "2026-01-05T10:00:00".to_string(),
            personalized_letter: None,
        }
    }

    #[test]
    fn test_wire_numeric_id_becomes_string() {
        let json = r#"{"id":7,"name":"Alice","email":"a@x.com","check_in_time":"2026-01-05T10:00:00Z","letter":"Hi"}"#;
        let wire: StudentWire = serde_json::from_str(json).unwrap();
        let record = StudentRecord::from(wire);

        assert_eq!(record.id, "7");
        assert_eq!(record.name, "Alice");
        assert_eq!(record.check_in_time, "2026-01-05T10:00:00Z");
        assert_eq!(record.personalized_letter.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_wire_string_id_kept_verbatim() {
        let json = r#"{"id":"7","name":"Alice","email":"a@x.com","check_in_time":"2026-01-05T10:00:00Z","letter":null}"#;
        let record = StudentRecord::from(serde_json::from_str::<StudentWire>(json).unwrap());

        assert_eq!(record.id, "7");
        assert!(record.personalized_letter.is_none());
    }

    #[test]
    fn test_wire_missing_letter() {
        let json = r#"{"id":3,"name":"Bob","email":"b@x.com","check_in_time":"2026-01-05T10:00:00"}"#;
        let record = StudentRecord::from(serde_json::from_str::<StudentWire>(json).unwrap());

        assert!(record.personalized_letter.is_none());
    }

    #[test]
    fn test_display_date_naive_timestamp() {
        let mut r = record("Alice", "a@x.com");
        r.check_in_time = "2026-01-05T10:00:00.123456".to_string();
        assert_eq!(r.display_date(), "2026-01-05");
    }

    #[test]
    fn test_display_date_unparsable_falls_back() {
        let mut r = record("Alice", "a@x.com");
        r.check_in_time = "yesterday".to_string();
        assert_eq!(r.display_date(), "yesterday");
    }

    #[test]
    fn test_matches_name_or_email_case_insensitive() {
        let r = record("Alice Wang", "alice@Example.com");

        assert!(r.matches("alice"));
        assert!(r.matches("WANG"));
        assert!(r.matches("example.COM"));
        assert!(r.matches(""));
        assert!(!r.matches("bob"));
    }
}
