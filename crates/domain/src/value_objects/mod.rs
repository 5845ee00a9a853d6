//! Value Objects - Immutable, identity-less domain primitives

mod color;
mod coordinates;
pub mod datetime;
mod geometry;
mod id;
mod query;

pub(crate) use color::color_opt;
pub use color::Color;
pub use coordinates::Coordinates;
pub(crate) use datetime::{date_opt, date_time_opt, seconds};
pub use geometry::{LineString, MultiPolygon};
pub(crate) use geometry::wkt_opt;
pub use id::Id;
pub use query::{DataFreshness, QueryValue, TravelerType};
