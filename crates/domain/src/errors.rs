//! Domain-level errors

use thiserror::Error;

/// Errors that can occur while building or interpreting domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Coordinates outside of the valid WGS84 range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Malformed hexadecimal colour
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// Malformed WKT or GeoJSON geometry
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A place container names an embedded type but carries no matching payload
    #[error("Place container declares `{0}` but carries no such payload")]
    MissingPlacePayload(String),

    /// A place container carries a payload but no embedded type
    #[error("Place container carries a payload but no embedded type")]
    MissingEmbeddedType,

    /// A place container carries more than one payload
    #[error("Place container carries {0} payloads, expected exactly one")]
    ConflictingPlacePayload(usize),

    /// The embedded type is not one this library knows how to decode
    #[error("Unsupported embedded type")]
    UnsupportedEmbeddedType,
}
