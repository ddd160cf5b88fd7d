use chrono::{DateTime, ParseError, Utc};

/// Format an RFC 3339 timestamp as a short date such as `Jan 5, 2024`.
pub fn format_date(timestamp: &str) -> Result<String, ParseError> {
    let parsed = DateTime::parse_from_rfc3339(timestamp)?;
    Ok(format_timestamp(&parsed.with_timezone(&Utc)))
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_provider_timestamps() {
        assert_eq!(format_date("2024-01-05T12:30:00Z").unwrap(), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-25T00:00:00Z").unwrap(), "Dec 25, 2023");
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        assert_eq!(format_date("2024-03-01T01:00:00+02:00").unwrap(), "Feb 29, 2024");
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(format_date("yesterday").is_err());
        assert!(format_date("").is_err());
    }
}
