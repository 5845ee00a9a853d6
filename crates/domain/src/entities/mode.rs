//! Transportation modes
//!
//! Street modes (walking, bike, car, bike sharing) are used to constrain
//! the first and last sections of a journey. Physical modes are the
//! normalised public transport modes; commercial modes are network
//! specific labels grouped under physical modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value_objects::Id;

/// A non public transport mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// On foot
    #[serde(rename = "walking")]
    Walking,
    /// Personal bike
    #[serde(rename = "bike")]
    Bike,
    /// Personal car
    #[serde(rename = "car")]
    Car,
    /// Bike sharing system (not used in sections)
    #[serde(rename = "bss")]
    BikeShare,
}

impl Mode {
    /// Parameter value for this mode
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Bike => "bike",
            Self::Car => "car",
            Self::BikeShare => "bss",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walking" => Ok(Self::Walking),
            "bike" => Ok(Self::Bike),
            "car" => Ok(Self::Car),
            "bss" => Ok(Self::BikeShare),
            other => Err(format!("unknown mode `{other}`")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commercial method of transportation
///
/// Commercial modes are not normalised; to query by mode, prefer
/// physical modes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialMode {
    /// Identifier, `commercial_mode:…`
    pub id: Id,
    /// Name of the commercial mode
    #[serde(default)]
    pub name: String,
    /// Physical modes of this commercial mode
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub physical_modes: Vec<PhysicalMode>,
}

/// A physical method of transportation (air, bus, metro, train…)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalMode {
    /// Identifier, e.g. `physical_mode:Tramway`
    pub id: Id,
    /// Name, e.g. `Tramway`
    #[serde(default)]
    pub name: String,
    /// Commercial modes of this physical mode
    #[serde(default, alias = "commercial_mode", skip_serializing_if = "Vec::is_empty")]
    pub commercial_modes: Vec<CommercialMode>,
}

impl PhysicalMode {
    /// The normalised mode designated by this object's id, if any
    #[must_use]
    pub fn normalized(&self) -> Option<NormalizedPhysicalMode> {
        NormalizedPhysicalMode::from_id(self.id.as_str())
    }
}

/// The normalised physical modes known to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedPhysicalMode {
    Air,
    Boat,
    Bus,
    BusRapidTransit,
    Coach,
    Ferry,
    Funicular,
    LocalTrain,
    LongDistanceTrain,
    Metro,
    RapidTransit,
    Shuttle,
    Taxi,
    Train,
    Tramway,
}

impl NormalizedPhysicalMode {
    /// Every normalised physical mode
    pub const ALL: [Self; 15] = [
        Self::Air,
        Self::Boat,
        Self::Bus,
        Self::BusRapidTransit,
        Self::Coach,
        Self::Ferry,
        Self::Funicular,
        Self::LocalTrain,
        Self::LongDistanceTrain,
        Self::Metro,
        Self::RapidTransit,
        Self::Shuttle,
        Self::Taxi,
        Self::Train,
        Self::Tramway,
    ];

    /// Identifier of the mode, e.g. `physical_mode:Tramway`
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Air => "physical_mode:Air",
            Self::Boat => "physical_mode:Boat",
            Self::Bus => "physical_mode:Bus",
            Self::BusRapidTransit => "physical_mode:BusRapidTransit",
            Self::Coach => "physical_mode:Coach",
            Self::Ferry => "physical_mode:Ferry",
            Self::Funicular => "physical_mode:Funicular",
            Self::LocalTrain => "physical_mode:LocalTrain",
            Self::LongDistanceTrain => "physical_mode:LongDistanceTrain",
            Self::Metro => "physical_mode:Metro",
            Self::RapidTransit => "physical_mode:RapidTransit",
            Self::Shuttle => "physical_mode:Shuttle",
            Self::Taxi => "physical_mode:Taxi",
            Self::Train => "physical_mode:Train",
            Self::Tramway => "physical_mode:Tramway",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Air => "Air",
            Self::Boat => "Boat",
            Self::Bus => "Bus",
            Self::BusRapidTransit => "Bus (Rapid Transit)",
            Self::Coach => "Coach",
            Self::Ferry => "Ferry",
            Self::Funicular => "Funicular",
            Self::LocalTrain => "Local Train",
            Self::LongDistanceTrain => "Long-distance Train",
            Self::Metro => "Metro",
            Self::RapidTransit => "Rapid Transit",
            Self::Shuttle => "Shuttle",
            Self::Taxi => "Taxi",
            Self::Train => "Train",
            Self::Tramway => "Tramway",
        }
    }

    /// Look up a normalised mode by identifier
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == id)
    }

    /// Identifier as an [`Id`]
    #[must_use]
    pub fn to_id(&self) -> Id {
        Id::new(self.id())
    }
}

impl fmt::Display for NormalizedPhysicalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
