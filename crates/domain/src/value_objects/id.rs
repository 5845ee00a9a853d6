//! Navitia object identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a Navitia object
///
/// Most identifiers are prefixed with the kind of object they designate,
/// e.g. `stop_area:OIF:SA:8768600` or `physical_mode:Bus`. Coordinates
/// used as identifiers (`2.352222;48.856614`) carry no kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Wrap a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The kind prefix of the identifier (`stop_area` for `stop_area:XYZ`)
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.0
            .split_once(':')
            .map(|(kind, _)| kind)
            .filter(|kind| !kind.is_empty())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Id> for String {
    fn from(value: Id) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_the_prefix() {
        let id = Id::new("stop_area:OIF:SA:8768600");
        assert_eq!(id.kind(), Some("stop_area"));
    }

    #[test]
    fn coordinates_have_no_kind() {
        assert_eq!(Id::new("2.352222;48.856614").kind(), None);
        assert_eq!(Id::new(":weird").kind(), None);
        assert_eq!(Id::default().kind(), None);
    }

    #[test]
    fn deserializes_transparently() {
        let id: Id = serde_json::from_str(r#""line:RAT:M1""#).unwrap();
        assert_eq!(id.as_str(), "line:RAT:M1");
        assert_eq!(id.to_string(), "line:RAT:M1");
    }
}
