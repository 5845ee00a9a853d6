//! Navitia date and time encodings
//!
//! Navitia exchanges date-times as local, zone-less `YYYYMMDDTHHMMSS`
//! strings and dates as `YYYYMMDD`. Empty strings mean "absent".

use chrono::NaiveDateTime;

/// Format of Navitia date-times (`20170915T120312`)
pub const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Format of Navitia dates (`20170915`)
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Format a date-time the way the API expects it in query parameters
#[must_use]
pub fn format_date_time(value: &NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Parse a Navitia date-time
///
/// # Errors
///
/// Returns a chrono parse error if the string is not `YYYYMMDDTHHMMSS`.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT)
}

/// serde adapter for optional `YYYYMMDDTHHMMSS` fields
pub(crate) mod date_time_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_TIME_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(DATE_TIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid date-time `{s}`: {e}"))),
        }
    }
}

/// serde adapter for optional `YYYYMMDD` fields
pub(crate) mod date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid date `{s}`: {e}"))),
        }
    }
}

/// serde adapter for durations expressed in whole seconds
pub(crate) mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs.unwrap_or(0)))
    }
}
