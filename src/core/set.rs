//! Card sets (editions)

use crate::core::SetCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A card set, identified by its abbreviation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    pub name: String,
    pub abbreviation: SetCode,
    /// Release date as epoch milliseconds (UTC midnight), `None` if unknown
    pub released_at: Option<i64>,
}

impl CardSet {
    pub fn new(name: impl Into<String>, abbreviation: SetCode, released_at: Option<&str>) -> Self {
        CardSet {
            name: name.into(),
            abbreviation,
            released_at: released_at.and_then(parse_release_date),
        }
    }
}

/// Parse a catalog release date into epoch milliseconds
///
/// Accepts "YYYY-MM-DD" and full RFC 3339 timestamps. Anything else is
/// treated as an unknown date.
pub fn parse_release_date(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        // 2014-11-07T00:00:00Z
        assert_eq!(parse_release_date("2014-11-07"), Some(1_415_318_400_000));
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(
            parse_release_date("2014-11-07T00:00:00Z"),
            Some(1_415_318_400_000)
        );
    }

    #[test]
    fn test_unparseable_date_is_unknown() {
        assert_eq!(parse_release_date("soon"), None);
        assert_eq!(parse_release_date(""), None);

        let set = CardSet::new("Theros", SetCode::new("THS"), Some("n/a"));
        assert_eq!(set.released_at, None);
    }
}
