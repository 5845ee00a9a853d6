//! Journey sections and stop times

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::display::DisplayInformation;
use super::mode::Mode;
use super::place::{Container, StopPoint};
use crate::value_objects::{Id, LineString, date_time_opt, seconds};

/// The kind of a journey section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    PublicTransport,
    StreetNetwork,
    Waiting,
    StayIn,
    Transfer,
    CrowFly,
    OnDemandTransport,
    BikeShareRent,
    BikeSharePutBack,
    Boarding,
    Landing,
    /// A section kind this library does not know about
    Other(String),
}

impl SectionType {
    /// API name of the section type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PublicTransport => "public_transport",
            Self::StreetNetwork => "street_network",
            Self::Waiting => "waiting",
            Self::StayIn => "stay_in",
            Self::Transfer => "transfer",
            Self::CrowFly => "crow_fly",
            Self::OnDemandTransport => "on_demand_transport",
            Self::BikeShareRent => "bss_rent",
            Self::BikeSharePutBack => "bss_put_back",
            Self::Boarding => "boarding",
            Self::Landing => "landing",
            Self::Other(name) => name,
        }
    }

    /// What the section represents
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PublicTransport => "Public transport section",
            Self::StreetNetwork => "Street section",
            Self::Waiting => "Waiting section between transport",
            Self::StayIn => "Stay in the vehicle while it changes routing",
            Self::Transfer => "Transfer section",
            Self::CrowFly => "Teleportation to or from a city or stop area; carries no path",
            Self::OnDemandTransport => "On-demand vehicle: call the agency to confirm the journey",
            Self::BikeShareRent => "Taking a bike from a bike sharing system",
            Self::BikeSharePutBack => "Putting back a bike into a bike sharing system",
            Self::Boarding => "Boarding a plane",
            Self::Landing => "Landing off a plane",
            Self::Other(_) => "Unknown section type",
        }
    }
}

impl From<String> for SectionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "public_transport" => Self::PublicTransport,
            "street_network" => Self::StreetNetwork,
            "waiting" => Self::Waiting,
            "stay_in" => Self::StayIn,
            "transfer" => Self::Transfer,
            "crow_fly" => Self::CrowFly,
            "on_demand_transport" => Self::OnDemandTransport,
            "bss_rent" => Self::BikeShareRent,
            "bss_put_back" => Self::BikeSharePutBack,
            "boarding" => Self::Boarding,
            "landing" => Self::Landing,
            _ => Self::Other(value),
        }
    }
}

impl From<SectionType> for String {
    fn from(value: SectionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a public transport section is operated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PtMethod {
    /// Regular line with no estimated times and no on-demand stops
    Regular,
    /// Regular line with at least one estimated date-time
    DateTimeEstimated,
    /// On-demand transport with fixed stop times; requires a call
    OdtStopTime,
    /// On-demand transport with fixed stop points; requires a call
    OdtStopPoint,
    /// On-demand transport within a zone; requires a call
    OdtZone,
    /// A method this library does not know about
    Other(String),
}

impl PtMethod {
    /// API name of the method
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regular => "regular",
            Self::DateTimeEstimated => "had_date_time_estimated",
            Self::OdtStopTime => "odt_with_stop_time",
            Self::OdtStopPoint => "odt_with_stop_point",
            Self::OdtZone => "odt_with_zone",
            Self::Other(name) => name,
        }
    }

    /// Whether the traveller has to call ahead
    #[must_use]
    pub const fn is_on_demand(&self) -> bool {
        matches!(self, Self::OdtStopTime | Self::OdtStopPoint | Self::OdtZone)
    }
}

impl From<String> for PtMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "regular" => Self::Regular,
            "had_date_time_estimated" => Self::DateTimeEstimated,
            "odt_with_stop_time" => Self::OdtStopTime,
            "odt_with_stop_point" => Self::OdtStopPoint,
            "odt_with_zone" => Self::OdtZone,
            _ => Self::Other(value),
        }
    }
}

impl From<PtMethod> for String {
    fn from(value: PtMethod) -> Self {
        value.as_str().to_string()
    }
}

/// One step of a street network path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSegment {
    /// Length in meters
    pub length: u64,
    /// Street name
    pub name: String,
    #[serde(with = "seconds")]
    pub duration: Duration,
    /// Turn angle in degrees (0 is straight ahead)
    pub direction: i32,
}

/// A stop served by a vehicle, with its arrival and departure times
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopTime {
    #[serde(
        default,
        rename = "arrival_date_time",
        with = "date_time_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub arrival: Option<NaiveDateTime>,
    #[serde(
        default,
        rename = "departure_date_time",
        with = "date_time_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub departure: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_point: Option<StopPoint>,
}

/// A section of a journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: SectionType,
    #[serde(default)]
    pub id: Id,
    /// Street mode for street network and crow fly sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Container>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Container>,
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
    #[serde(default, with = "seconds")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    #[serde(default, rename = "geojson", skip_serializing_if = "Option::is_none")]
    pub geo: Option<LineString>,
    #[serde(default, rename = "stop_date_times", skip_serializing_if = "Vec::is_empty")]
    pub stop_times: Vec<StopTime>,
    #[serde(
        default,
        rename = "display_informations",
        skip_serializing_if = "Option::is_none"
    )]
    pub display: Option<DisplayInformation>,
    #[serde(
        default,
        rename = "additional_informations",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub additional: Vec<PtMethod>,
}

impl Section {
    /// The street mode of the section, when it is a known one
    #[must_use]
    pub fn street_mode(&self) -> Option<Mode> {
        self.mode.as_deref().and_then(|m| m.parse().ok())
    }

    /// Whether this section is ridden in a public transport vehicle
    #[must_use]
    pub fn is_public_transport(&self) -> bool {
        matches!(
            self.kind,
            SectionType::PublicTransport | SectionType::OnDemandTransport
        )
    }

    /// Whether the traveller has to call ahead for this section
    #[must_use]
    pub fn requires_booking(&self) -> bool {
        self.kind == SectionType::OnDemandTransport
            || self.additional.iter().any(PtMethod::is_on_demand)
    }

    /// Format the section as a single line
    #[must_use]
    pub fn format_detail(&self) -> String {
        let dep = self
            .departure
            .map(|d| d.format("%H:%M").to_string())
            .unwrap_or_default();
        let arr = self
            .arrival
            .map(|d| d.format("%H:%M").to_string())
            .unwrap_or_default();
        let from = self.from.as_ref().map_or("?", |c| c.name.as_str());
        let to = self.to.as_ref().map_or("?", |c| c.name.as_str());
        let minutes = self.duration.as_secs() / 60;

        let how = match (&self.display, &self.mode) {
            (Some(display), _) if self.is_public_transport() => display.to_string(),
            (_, Some(mode)) => mode.clone(),
            _ => self.kind.to_string(),
        };

        format!("{dep}–{arr} {how}: {from} → {to} ({minutes}min)")
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_detail())
    }
}
