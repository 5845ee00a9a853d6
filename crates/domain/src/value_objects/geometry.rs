//! Geometries carried by API objects
//!
//! Region shapes arrive as WKT `MULTIPOLYGON` strings; section paths
//! arrive as GeoJSON `LineString` objects.

use std::fmt;
use std::str::FromStr;

use geo::{Contains, Point};
use serde::{Deserialize, Serialize};
use wkt::{ToWkt, TryFromWkt};

use super::Coordinates;
use crate::errors::DomainError;

/// A set of polygons, such as the shape of a coverage region
///
/// Decoded from WKT, including `Z`/`M` tagged and untagged XYZ forms; extra
/// dimensions are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon(geo::MultiPolygon<f64>);

impl Default for MultiPolygon {
    fn default() -> Self {
        Self(geo::MultiPolygon::new(Vec::new()))
    }
}

impl MultiPolygon {
    /// Polygons of the shape
    #[must_use]
    pub fn polygons(&self) -> &[geo::Polygon<f64>] {
        &self.0.0
    }

    /// Whether the shape has no polygon
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.0.is_empty()
    }

    /// Whether the point lies strictly inside the shape, outside any hole
    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        self.0
            .contains(&Point::new(point.longitude(), point.latitude()))
    }

    /// The underlying `geo` geometry
    #[must_use]
    pub const fn as_geo(&self) -> &geo::MultiPolygon<f64> {
        &self.0
    }
}

impl From<geo::MultiPolygon<f64>> for MultiPolygon {
    fn from(value: geo::MultiPolygon<f64>) -> Self {
        Self(value)
    }
}

impl FromStr for MultiPolygon {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        geo::MultiPolygon::<f64>::try_from_wkt_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::InvalidGeometry(e.to_string()))
    }
}

impl fmt::Display for MultiPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("MULTIPOLYGON EMPTY");
        }
        f.write_str(&self.0.wkt_string())
    }
}

/// serde adapter for optional WKT shapes where an empty string means "none"
pub(crate) mod wkt_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MultiPolygon;

    pub fn serialize<S>(value: &Option<MultiPolygon>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(shape) => serializer.collect_str(shape),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<MultiPolygon>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// A path as a sequence of positions (GeoJSON `LineString`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonLineString", into = "GeoJsonLineString")]
pub struct LineString(pub Vec<Coordinates>);

impl LineString {
    /// Positions along the path
    #[must_use]
    pub fn points(&self) -> &[Coordinates] {
        &self.0
    }

    /// Approximate length of the path in kilometers
    #[must_use]
    pub fn length_km(&self) -> f64 {
        self.0
            .windows(2)
            .map(|pair| pair[0].distance_km(&pair[1]))
            .sum()
    }
}

#[derive(Serialize, Deserialize)]
struct GeoJsonLineString {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}

impl TryFrom<GeoJsonLineString> for LineString {
    type Error = DomainError;

    fn try_from(raw: GeoJsonLineString) -> Result<Self, Self::Error> {
        if raw.kind != "LineString" {
            return Err(DomainError::InvalidGeometry(format!(
                "expected LineString, got {}",
                raw.kind
            )));
        }
        raw.coordinates
            .into_iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] => Ok(Coordinates::new_unchecked(*lon, *lat)),
                _ => Err(DomainError::InvalidGeometry(
                    "position needs at least two values".to_string(),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<LineString> for GeoJsonLineString {
    fn from(value: LineString) -> Self {
        Self {
            kind: "LineString".to_string(),
            coordinates: value
                .0
                .iter()
                .map(|c| vec![c.longitude(), c.latitude()])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "MULTIPOLYGON(((0 0,10 0,10 10,0 10,0 0),(4 4,6 4,6 6,4 6,4 4)))";

    #[test]
    fn parses_multipolygon_with_hole() {
        let shape: MultiPolygon = SQUARE.parse().unwrap();
        assert_eq!(shape.polygons().len(), 1);
        let polygon = &shape.polygons()[0];
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.interiors().len(), 1);
    }

    #[test]
    fn parses_whitespace_and_several_polygons() {
        let wkt = "MULTIPOLYGON ( ((2.1 48.7, 2.5 48.7, 2.5 49.0, 2.1 48.7)) , ((3 45, 4 45, 4 46, 3 45)) )";
        let shape: MultiPolygon = wkt.parse().unwrap();
        assert_eq!(shape.polygons().len(), 2);
        let first = shape.polygons()[0].exterior().0[0];
        assert!((first.x - 2.1).abs() < f64::EPSILON);
        assert!((first.y - 48.7).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_three_dimensional_shapes() {
        let tagged: MultiPolygon = "MULTIPOLYGON Z(((0 0 5,10 0 5,10 10 5,0 10 5,0 0 5)))"
            .parse()
            .unwrap();
        let untagged: MultiPolygon = "MULTIPOLYGON(((0 0 5,10 0 5,10 10 5,0 10 5,0 0 5)))"
            .parse()
            .unwrap();

        assert_eq!(tagged, untagged);
        assert!(tagged.contains(&Coordinates::new_unchecked(5.0, 5.0)));
        assert!(!tagged.contains(&Coordinates::new_unchecked(15.0, 5.0)));
    }

    #[test]
    fn empty_multipolygon() {
        let shape: MultiPolygon = "MULTIPOLYGON EMPTY".parse().unwrap();
        assert!(shape.is_empty());
        assert_eq!(shape.to_string(), "MULTIPOLYGON EMPTY");
    }

    #[test]
    fn rejects_malformed_wkt() {
        assert!("POLYGON((0 0,1 1,0 0))".parse::<MultiPolygon>().is_err());
        assert!("MULTIPOLYGON(((0 0,1 1,0 0))".parse::<MultiPolygon>().is_err());
        assert!("MULTIPOLYGON(((0 x,1 1,0 0)))".parse::<MultiPolygon>().is_err());
        assert!("MULTI".parse::<MultiPolygon>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let shape: MultiPolygon = SQUARE.parse().unwrap();
        let again: MultiPolygon = shape.to_string().parse().unwrap();
        assert_eq!(shape, again);
    }

    #[test]
    fn containment_respects_holes() {
        let shape: MultiPolygon = SQUARE.parse().unwrap();
        assert!(shape.contains(&Coordinates::new_unchecked(2.0, 2.0)));
        assert!(!shape.contains(&Coordinates::new_unchecked(5.0, 5.0)));
        assert!(!shape.contains(&Coordinates::new_unchecked(12.0, 5.0)));
    }

    #[test]
    fn decodes_geojson_line_string() {
        let json = r#"{"type": "LineString", "coordinates": [[2.35, 48.85], [2.36, 48.86]], "properties": [{"length": 1300}]}"#;
        let line: LineString = serde_json::from_str(json).unwrap();
        assert_eq!(line.points().len(), 2);
        assert!(line.length_km() > 1.0 && line.length_km() < 2.0);
    }

    #[test]
    fn rejects_other_geojson_types() {
        let json = r#"{"type": "Point", "coordinates": [[2.35, 48.85]]}"#;
        assert!(serde_json::from_str::<LineString>(json).is_err());

        let json = r#"{"type": "LineString", "coordinates": [[2.35]]}"#;
        assert!(serde_json::from_str::<LineString>(json).is_err());
    }
}
