//! Places and the container the API wraps them in
//!
//! Every place returned by the API (journey endpoints, autocomplete,
//! section ends) is wrapped in a container naming its embedded type and
//! carrying exactly one payload field. [`Container::place`] turns that
//! wrapper into the closed [`Place`] enum.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::display::Equipment;
use super::mode::{CommercialMode, PhysicalMode};
use crate::errors::DomainError;
use crate::value_objects::{Coordinates, Id, QueryValue};

/// A stop area: a group of stop points, e.g. a station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopArea {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinates>,
    /// IANA timezone of the area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub administrative_regions: Vec<AdministrativeRegion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop_points: Vec<StopPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub physical_modes: Vec<PhysicalMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commercial_modes: Vec<CommercialMode>,
}

/// A stop point: a precise place where a vehicle stops
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopPoint {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinates>,
    /// The stop area this point belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_area: Option<Box<StopArea>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub administrative_regions: Vec<AdministrativeRegion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipments: Vec<Equipment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub physical_modes: Vec<PhysicalMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commercial_modes: Vec<CommercialMode>,
}

/// A street address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinates>,
    #[serde(default)]
    pub house_number: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub administrative_regions: Vec<AdministrativeRegion>,
}

/// An administrative region: city, district, neighbourhood
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdministrativeRegion {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinates>,
    /// Administrative level (8 is a city in France)
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub insee: String,
}

/// Category of a point of interest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiType {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

/// A point of interest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poi_type: Option<PoiType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// The kind of place held by a [`Container`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedType {
    StopArea,
    StopPoint,
    Address,
    AdministrativeRegion,
    Poi,
    /// A kind this library does not decode
    #[serde(other)]
    Unknown,
}

impl EmbeddedType {
    /// API name of the type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StopArea => "stop_area",
            Self::StopPoint => "stop_point",
            Self::Address => "address",
            Self::AdministrativeRegion => "administrative_region",
            Self::Poi => "poi",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EmbeddedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The API's wrapper around a single place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    /// Relevance of the match (autocomplete only)
    #[serde(default)]
    pub quality: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_type: Option<EmbeddedType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_area: Option<StopArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_point: Option<StopPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_region: Option<AdministrativeRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poi: Option<Poi>,
}

impl Container {
    fn payload_count(&self) -> usize {
        [
            self.stop_area.is_some(),
            self.stop_point.is_some(),
            self.address.is_some(),
            self.administrative_region.is_some(),
            self.poi.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Whether the container holds neither an embedded type nor a payload
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.embedded_type.is_none() && self.payload_count() == 0
    }

    /// Check that the container is consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a payload is present without an embedded type,
    /// if several payloads are present, if the embedded type is unknown, or
    /// if the payload matching the embedded type is missing.
    pub fn check(&self) -> Result<(), DomainError> {
        self.place().map(|_| ())
    }

    /// Extract the embedded place
    ///
    /// An empty container yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// See [`Container::check`].
    pub fn place(&self) -> Result<Option<Place>, DomainError> {
        let payloads = self.payload_count();
        let Some(kind) = self.embedded_type else {
            return if payloads == 0 {
                Ok(None)
            } else {
                Err(DomainError::MissingEmbeddedType)
            };
        };
        if payloads > 1 {
            return Err(DomainError::ConflictingPlacePayload(payloads));
        }

        let missing = || DomainError::MissingPlacePayload(kind.as_str().to_string());
        let place = match kind {
            EmbeddedType::StopArea => self.stop_area.clone().map(Place::StopArea),
            EmbeddedType::StopPoint => self.stop_point.clone().map(Place::StopPoint),
            EmbeddedType::Address => self.address.clone().map(Place::Address),
            EmbeddedType::AdministrativeRegion => self
                .administrative_region
                .clone()
                .map(Place::AdministrativeRegion),
            EmbeddedType::Poi => self.poi.clone().map(Place::Poi),
            EmbeddedType::Unknown => return Err(DomainError::UnsupportedEmbeddedType),
        };
        place.map(Some).ok_or_else(missing)
    }
}

impl QueryValue for Container {
    fn query_value(&self) -> String {
        self.id.query_value()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.embedded_type {
            Some(kind) => write!(f, "{} ({kind})", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A place, as decoded from a [`Container`]
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    StopArea(StopArea),
    StopPoint(StopPoint),
    Address(Address),
    AdministrativeRegion(AdministrativeRegion),
    Poi(Poi),
}

impl Place {
    /// Identifier of the place
    #[must_use]
    pub const fn id(&self) -> &Id {
        match self {
            Self::StopArea(p) => &p.id,
            Self::StopPoint(p) => &p.id,
            Self::Address(p) => &p.id,
            Self::AdministrativeRegion(p) => &p.id,
            Self::Poi(p) => &p.id,
        }
    }

    /// Name of the place
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::StopArea(p) => &p.name,
            Self::StopPoint(p) => &p.name,
            Self::Address(p) => &p.name,
            Self::AdministrativeRegion(p) => &p.name,
            Self::Poi(p) => &p.name,
        }
    }

    /// Kind of the place
    #[must_use]
    pub const fn kind(&self) -> EmbeddedType {
        match self {
            Self::StopArea(_) => EmbeddedType::StopArea,
            Self::StopPoint(_) => EmbeddedType::StopPoint,
            Self::Address(_) => EmbeddedType::Address,
            Self::AdministrativeRegion(_) => EmbeddedType::AdministrativeRegion,
            Self::Poi(_) => EmbeddedType::Poi,
        }
    }

    /// Position of the place, when known
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::StopArea(p) => p.coord,
            Self::StopPoint(p) => p.coord,
            Self::Address(p) => p.coord,
            Self::AdministrativeRegion(p) => p.coord,
            Self::Poi(p) => p.coord,
        }
    }
}

impl QueryValue for Place {
    fn query_value(&self) -> String {
        self.id().query_value()
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name(), self.kind(), self.id())
    }
}
