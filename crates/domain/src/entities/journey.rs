//! Journeys computed by the routing engine

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::place::Container;
use super::section::Section;
use crate::value_objects::{date_time_opt, seconds};

/// CO2 emission estimate of a journey
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Co2Emission {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

/// A complete journey from origin to destination, made of sections
///
/// `from` and `to` are not guaranteed to be filled; the API tends to omit
/// them when sections are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Container>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Container>,
    #[serde(default, with = "seconds")]
    pub duration: Duration,
    #[serde(default, rename = "nb_transfers")]
    pub transfers: u32,
    #[serde(
        default,
        rename = "departure_date_time",
        with = "date_time_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub departure: Option<NaiveDateTime>,
    #[serde(
        default,
        rename = "arrival_date_time",
        with = "date_time_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub arrival: Option<NaiveDateTime>,
    #[serde(
        default,
        rename = "requested_date_time",
        with = "date_time_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub requested: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emission: Option<Co2Emission>,
    /// Disruption status, empty when undisturbed
    #[serde(default)]
    pub status: String,
    /// Qualification of the journey (`best`, `rapid`, `comfort`…)
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Journey {
    /// Total travel duration in minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> u64 {
        self.duration.as_secs() / 60
    }

    /// Sections ridden in a public transport vehicle
    pub fn public_transport_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_public_transport())
    }

    /// Name of the origin, from the journey or its first section
    #[must_use]
    pub fn origin_name(&self) -> Option<&str> {
        self.from
            .as_ref()
            .or_else(|| self.sections.first().and_then(|s| s.from.as_ref()))
            .map(|c| c.name.as_str())
    }

    /// Name of the destination, from the journey or its last section
    #[must_use]
    pub fn destination_name(&self) -> Option<&str> {
        self.to
            .as_ref()
            .or_else(|| self.sections.last().and_then(|s| s.to.as_ref()))
            .map(|c| c.name.as_str())
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        let (Some(departure), Some(arrival)) = (self.departure, self.arrival) else {
            return String::from("No journey data");
        };

        let dep = departure.format("%H:%M");
        let arr = arrival.format("%H:%M");
        let dur = self.duration_minutes();
        let transfers = self.transfers;
        let from = self.origin_name().unwrap_or("?");
        let to = self.destination_name().unwrap_or("?");

        let lines: Vec<&str> = self
            .public_transport_sections()
            .filter_map(|s| s.display.as_ref().map(|d| d.short_label()))
            .filter(|label| !label.is_empty())
            .collect();
        let route = lines.join(" → ");

        format!("{from} {dep} → {to} {arr} ({dur}min, {transfers} transfers) {route}")
            .trim_end()
            .to_string()
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())?;
        for section in &self.sections {
            write!(f, "\n  - {section}")?;
        }
        Ok(())
    }
}
