//! Navitia public transport API client
//!
//! Provides region discovery, journey planning, place search and
//! exploration of public transport objects against any
//! [Navitia](https://navitia.io) deployment (navitia.io, SNCF…).
//!
//! # Architecture
//!
//! A [`Session`] holds the HTTP client and API key. Every request type
//! implements [`Query`] and goes through the same pipeline: parameters
//! encoded once, basic authentication, bounded body read, cancellation and
//! JSON decoding into the `domain` entities. [`Scope`] narrows requests to a
//! coverage region; [`ObjectHandle`] explores around one object. The
//! [`TransitApi`] trait is the seam for callers that want to mock the API.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_navitia::{JourneyRequest, NavitiaConfig, Session};
//! use domain::value_objects::{Coordinates, Id};
//!
//! let session = Session::new(&NavitiaConfig::with_api_key("my-key"))?;
//!
//! let from = Coordinates::new(2.3749036, 48.8467927)?;
//! let to = Id::new("stop_area:OIF:SA:8768600");
//! let results = session
//!     .scope("fr-idf")
//!     .journeys(&JourneyRequest::between(&from, &to))
//!     .await?;
//! println!("{results}");
//! ```

mod cancel;
mod client;
mod config;
mod coverage;
mod error;
mod explore;
mod journeys;
mod places;
mod request;
mod results;
mod scope;
mod session;

pub use cancel::CancellationToken;
pub use client::{TransitApi, locate_region};
pub use config::NavitiaConfig;
pub use coverage::{RegionRequest, RegionResults};
pub use error::NavitiaError;
pub use explore::{ExploreRequest, ExploreResults};
pub use journeys::{JourneyRequest, JourneyResults};
pub use places::{PlacesRequest, PlacesResults};
pub use request::Query;
pub use results::{Paging, RequestInfo};
pub use scope::{ObjectHandle, Scope};
pub use session::{DEFAULT_MAX_RESPONSE_SIZE, NAVITIA_API_URL, SNCF_API_URL, Session};
