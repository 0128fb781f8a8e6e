use chrono::{DateTime, SecondsFormat, Utc};

/// Returns the current instant in UTC.
///
/// Every timestamp the ledger stores (record timestamps, `lastUpdated`,
/// `exportDate`) comes from here, in a machine-readable form. Locale
/// formatting is left to whoever renders it.
pub fn current_time() -> DateTime<Utc> {
    Utc::now()
}

/// Formats an instant as RFC 3339 / ISO-8601 with millisecond precision.
pub fn to_iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_time_survives_formatting() {
        let now = current_time();
        let formatted = to_iso8601(&now);
        assert!(formatted.ends_with('Z'));

        let parsed = DateTime::parse_from_rfc3339(&formatted)
            .unwrap()
            .with_timezone(&Utc);
        let drift = now - parsed;
        assert!(drift >= chrono::Duration::zero());
        assert!(drift < chrono::Duration::milliseconds(1));
    }

    #[test]
    fn test_iso8601_is_utc() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T12:30:45.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(to_iso8601(&at), "2024-03-01T12:30:45.123Z");
    }
}
