//! Values that can be sent as request parameters

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinates, Id};

/// Something that can designate a place or object in a query parameter
///
/// The returned value is raw; URL encoding happens once, when the
/// request URL is assembled.
pub trait QueryValue {
    /// The parameter value designating `self`
    fn query_value(&self) -> String;
}

impl QueryValue for Id {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl QueryValue for Coordinates {
    fn query_value(&self) -> String {
        self.id().query_value()
    }
}

impl QueryValue for str {
    fn query_value(&self) -> String {
        self.to_string()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn query_value(&self) -> String {
        (**self).query_value()
    }
}

/// Traveller profile used to tune journey computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelerType {
    /// Default profile
    Standard,
    /// Walks slower than average
    SlowWalker,
    /// Walks faster than average
    FastWalker,
    /// Carries luggage
    Luggage,
    /// Needs wheelchair accessibility
    Wheelchair,
    /// Rides a bike
    Cyclist,
    /// Drives a car
    Motorist,
}

impl TravelerType {
    /// Parameter value for this profile
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::SlowWalker => "slow_walker",
            Self::FastWalker => "fast_walker",
            Self::Luggage => "luggage",
            Self::Wheelchair => "wheelchair",
            Self::Cyclist => "cyclist",
            Self::Motorist => "motorist",
        }
    }
}

impl fmt::Display for TravelerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Freshness of the data used to compute journeys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFreshness {
    /// Theoretical timetable only
    BaseSchedule,
    /// Timetable including planned disruptions
    AdaptedSchedule,
    /// Real-time data
    Realtime,
}

impl DataFreshness {
    /// Parameter value for this freshness
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BaseSchedule => "base_schedule",
            Self::AdaptedSchedule => "adapted_schedule",
            Self::Realtime => "realtime",
        }
    }
}

impl fmt::Display for DataFreshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
