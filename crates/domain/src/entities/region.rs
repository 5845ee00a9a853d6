//! Coverage regions

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::value_objects::{Coordinates, Id, MultiPolygon, date_opt, date_time_opt, wkt_opt};

/// A geographical region covered by the API, with its data set status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    /// Data set status, `running` when the region is served
    #[serde(default)]
    pub status: String,
    /// Outline of the region
    #[serde(default, with = "wkt_opt", skip_serializing_if = "Option::is_none")]
    pub shape: Option<MultiPolygon>,
    #[serde(
        default,
        rename = "dataset_created_at",
        with = "date_time_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub dataset_created: Option<NaiveDateTime>,
    #[serde(
        default,
        rename = "last_load_at",
        with = "date_time_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_loaded: Option<NaiveDateTime>,
    #[serde(
        default,
        rename = "start_production_date",
        with = "date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub production_start: Option<NaiveDate>,
    #[serde(
        default,
        rename = "end_production_date",
        with = "date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub production_end: Option<NaiveDate>,
    /// Data set error reported by the API
    #[serde(
        default,
        deserialize_with = "region_error",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl Region {
    /// Whether the region is currently served
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }

    /// Whether the date falls inside the production period
    ///
    /// Unknown bounds are treated as open.
    #[must_use]
    pub fn is_in_production(&self, date: NaiveDate) -> bool {
        self.production_start.is_none_or(|start| start <= date)
            && self.production_end.is_none_or(|end| date <= end)
    }

    /// Whether the region's shape contains the position
    #[must_use]
    pub fn contains(&self, coords: &Coordinates) -> bool {
        self.shape.as_ref().is_some_and(|shape| shape.contains(coords))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Error: {}", self.error.as_deref().unwrap_or(""))
    }
}

/// The region error is either a string or `{"code": …, "value": …}`
fn region_error<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawError {
        Text(String),
        Object {
            #[serde(default)]
            code: String,
            #[serde(default)]
            value: String,
        },
    }

    let message = match Option::<RawError>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawError::Text(text)) => text,
        Some(RawError::Object { code, value }) => {
            if value.is_empty() {
                code
            } else {
                value
            }
        },
    };
    Ok(Some(message).filter(|m| !m.trim().is_empty()))
}
