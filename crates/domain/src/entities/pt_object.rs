//! Public transport objects reachable through the explore endpoints

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::mode::{CommercialMode, PhysicalMode};
use super::place::{Container, Poi, StopArea, StopPoint};
use crate::value_objects::{Color, Id, color_opt};

/// A transport network, e.g. RATP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

/// A transport company operating vehicles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

/// A public transport line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, with = "color_opt", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, with = "color_opt", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    /// First departure of the day, `HHMMSS`
    #[serde(default)]
    pub opening_time: String,
    /// Last arrival of the day, `HHMMSS`
    #[serde(default)]
    pub closing_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commercial_mode: Option<CommercialMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub physical_modes: Vec<PhysicalMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

/// A route: one direction of a line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    /// Whether the route runs on frequencies rather than timetables
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_frequence: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Container>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Box<Line>>,
}

/// The API sends `is_frequence` either as a boolean or as `"True"`/`"False"`
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    Ok(match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(b)) => b,
        Some(BoolOrString::String(s)) => s.eq_ignore_ascii_case("true"),
        None => false,
    })
}

/// An explorable collection of objects, named after its URL selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Lines,
    Routes,
    Networks,
    Companies,
    StopAreas,
    StopPoints,
    PhysicalModes,
    CommercialModes,
    Pois,
}

impl Collection {
    /// Every explorable collection
    pub const ALL: [Self; 9] = [
        Self::Lines,
        Self::Routes,
        Self::Networks,
        Self::Companies,
        Self::StopAreas,
        Self::StopPoints,
        Self::PhysicalModes,
        Self::CommercialModes,
        Self::Pois,
    ];

    /// URL selector and response key of the collection
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Routes => "routes",
            Self::Networks => "networks",
            Self::Companies => "companies",
            Self::StopAreas => "stop_areas",
            Self::StopPoints => "stop_points",
            Self::PhysicalModes => "physical_modes",
            Self::CommercialModes => "commercial_modes",
            Self::Pois => "pois",
        }
    }

    /// The identifier kind of objects in this collection
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Lines => "line",
            Self::Routes => "route",
            Self::Networks => "network",
            Self::Companies => "company",
            Self::StopAreas => "stop_area",
            Self::StopPoints => "stop_point",
            Self::PhysicalModes => "physical_mode",
            Self::CommercialModes => "commercial_mode",
            Self::Pois => "poi",
        }
    }

    /// The collection holding objects of the given identifier kind
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.kind() == kind)
    }

    /// The collection holding the object designated by `id`
    #[must_use]
    pub fn for_id(id: &Id) -> Option<Self> {
        id.kind().and_then(Self::from_kind)
    }

    /// Decode the JSON array listing this collection's objects
    ///
    /// # Errors
    ///
    /// Returns a serde error if the array does not hold objects of the
    /// collection's type.
    pub fn decode(self, value: serde_json::Value) -> Result<Vec<PtObject>, serde_json::Error> {
        match self {
            Self::Lines => decode_as(value, PtObject::Line),
            Self::Routes => decode_as(value, PtObject::Route),
            Self::Networks => decode_as(value, PtObject::Network),
            Self::Companies => decode_as(value, PtObject::Company),
            Self::StopAreas => decode_as(value, PtObject::StopArea),
            Self::StopPoints => decode_as(value, PtObject::StopPoint),
            Self::PhysicalModes => decode_as(value, PtObject::PhysicalMode),
            Self::CommercialModes => decode_as(value, PtObject::CommercialMode),
            Self::Pois => decode_as(value, PtObject::Poi),
        }
    }
}

fn decode_as<T: DeserializeOwned>(
    value: serde_json::Value,
    wrap: fn(T) -> PtObject,
) -> Result<Vec<PtObject>, serde_json::Error> {
    let items: Vec<T> = serde_json::from_value(value)?;
    Ok(items.into_iter().map(wrap).collect())
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An object decoded from an explore response
#[derive(Debug, Clone, PartialEq)]
pub enum PtObject {
    Line(Line),
    Route(Route),
    Network(Network),
    Company(Company),
    StopArea(StopArea),
    StopPoint(StopPoint),
    PhysicalMode(PhysicalMode),
    CommercialMode(CommercialMode),
    Poi(Poi),
}

impl PtObject {
    /// Identifier of the object
    #[must_use]
    pub const fn id(&self) -> &Id {
        match self {
            Self::Line(o) => &o.id,
            Self::Route(o) => &o.id,
            Self::Network(o) => &o.id,
            Self::Company(o) => &o.id,
            Self::StopArea(o) => &o.id,
            Self::StopPoint(o) => &o.id,
            Self::PhysicalMode(o) => &o.id,
            Self::CommercialMode(o) => &o.id,
            Self::Poi(o) => &o.id,
        }
    }

    /// Name of the object
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Line(o) => &o.name,
            Self::Route(o) => &o.name,
            Self::Network(o) => &o.name,
            Self::Company(o) => &o.name,
            Self::StopArea(o) => &o.name,
            Self::StopPoint(o) => &o.name,
            Self::PhysicalMode(o) => &o.name,
            Self::CommercialMode(o) => &o.name,
            Self::Poi(o) => &o.name,
        }
    }

    /// Collection the object belongs to
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Line(_) => Collection::Lines,
            Self::Route(_) => Collection::Routes,
            Self::Network(_) => Collection::Networks,
            Self::Company(_) => Collection::Companies,
            Self::StopArea(_) => Collection::StopAreas,
            Self::StopPoint(_) => Collection::StopPoints,
            Self::PhysicalMode(_) => Collection::PhysicalModes,
            Self::CommercialMode(_) => Collection::CommercialModes,
            Self::Poi(_) => Collection::Pois,
        }
    }
}

impl fmt::Display for PtObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.id())
    }
}
