//! Display information attached to public transport sections and lines

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Color, color_opt};

/// Equipment available on a vehicle or at a stop
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Equipment {
    WheelchairAccessibility,
    BikeAccepted,
    AirConditioned,
    VisualAnnouncement,
    AudibleAnnouncement,
    AppropriateEscort,
    AppropriateSignage,
    SchoolVehicle,
    WheelchairBoarding,
    Sheltered,
    Elevator,
    Escalator,
    BikeDepot,
    /// An equipment this library does not know about
    Other(String),
}

impl Equipment {
    /// API name of the equipment
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::WheelchairAccessibility => "has_wheelchair_accessibility",
            Self::BikeAccepted => "has_bike_accepted",
            Self::AirConditioned => "has_air_conditioned",
            Self::VisualAnnouncement => "has_visual_announcement",
            Self::AudibleAnnouncement => "has_audible_announcement",
            Self::AppropriateEscort => "has_appropriate_escort",
            Self::AppropriateSignage => "has_appropriate_signage",
            Self::SchoolVehicle => "has_school_vehicle",
            Self::WheelchairBoarding => "has_wheelchair_boarding",
            Self::Sheltered => "has_sheltered",
            Self::Elevator => "has_elevator",
            Self::Escalator => "has_escalator",
            Self::BikeDepot => "has_bike_depot",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Equipment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "has_wheelchair_accessibility" => Self::WheelchairAccessibility,
            "has_bike_accepted" => Self::BikeAccepted,
            "has_air_conditioned" => Self::AirConditioned,
            "has_visual_announcement" => Self::VisualAnnouncement,
            "has_audible_announcement" => Self::AudibleAnnouncement,
            "has_appropriate_escort" => Self::AppropriateEscort,
            "has_appropriate_signage" => Self::AppropriateSignage,
            "has_school_vehicle" => Self::SchoolVehicle,
            "has_wheelchair_boarding" => Self::WheelchairBoarding,
            "has_sheltered" => Self::Sheltered,
            "has_elevator" => Self::Elevator,
            "has_escalator" => Self::Escalator,
            "has_bike_depot" => Self::BikeDepot,
            _ => Self::Other(value),
        }
    }
}

impl From<Equipment> for String {
    fn from(value: Equipment) -> Self {
        value.as_str().to_string()
    }
}

/// Information useful to display a section or line (`display_informations`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayInformation {
    /// Headsign of the vehicle
    pub headsign: String,
    /// Name of the network
    pub network: String,
    /// Direction to take
    pub direction: String,
    /// Commercial mode name
    pub commercial_mode: String,
    /// Physical mode name
    pub physical_mode: String,
    /// Label of the object
    pub label: String,
    /// Line colour
    #[serde(with = "color_opt", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Text colour for this section
    #[serde(with = "color_opt", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    /// Code of the line
    pub code: String,
    /// Name of the line
    pub name: String,
    /// Free text description
    pub description: String,
    /// Equipment on the vehicle
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equipments: Vec<Equipment>,
}

impl DisplayInformation {
    /// Short label, falling back to the code and then the name
    #[must_use]
    pub fn short_label(&self) -> &str {
        [&self.label, &self.code, &self.name]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or("", String::as_str)
    }
}

impl fmt::Display for DisplayInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.commercial_mode, self.short_label())?;
        if !self.direction.is_empty() {
            write!(f, " → {}", self.direction)?;
        }
        Ok(())
    }
}
