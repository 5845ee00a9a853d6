//! Place autocomplete

use domain::entities::{Container, EmbeddedType, Place};
use domain::value_objects::{Id, QueryValue};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::NavitiaError;
use crate::request::{Params, Query};
use crate::results::RequestInfo;
use crate::scope::Scope;
use crate::session::Session;

const PLACES: &str = "places";

/// Parameters of a place search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesRequest {
    /// Search text; must not be blank
    pub query: String,
    /// Restrict results to these kinds of place
    pub types: Vec<EmbeddedType>,
    /// Whether geometries are returned
    pub geo: bool,
    /// Maximum number of results (0 for the API default)
    pub count: u32,
    /// Restrict results to these administrative regions
    pub admin_uris: Vec<Id>,
    /// Favour results close to this position, as a query value
    pub around: Option<String>,
}

impl Default for PlacesRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            types: Vec::new(),
            geo: true,
            count: 0,
            admin_uris: Vec::new(),
            around: None,
        }
    }
}

impl PlacesRequest {
    /// A search for the given text
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Favour results close to the given place
    #[must_use]
    pub fn around(mut self, position: &impl QueryValue) -> Self {
        self.around = Some(position.query_value());
        self
    }
}

impl Query for PlacesRequest {
    fn to_params(&self) -> Result<Vec<(String, String)>, NavitiaError> {
        if self.query.trim().is_empty() {
            return Err(NavitiaError::InvalidRequest(
                "place search text must not be empty".to_string(),
            ));
        }
        if self.types.contains(&EmbeddedType::Unknown) {
            return Err(NavitiaError::InvalidRequest(
                "place types must be known embedded types".to_string(),
            ));
        }

        let mut params = Params::new();
        params.push("q", self.query.as_str());
        params.push_all("type[]", self.types.iter().map(EmbeddedType::as_str));
        params.push_flag("disable_geojson", !self.geo);
        params.push_uint("count", self.count);
        params.push_all("admin_uri[]", &self.admin_uris);
        params.push_opt("from", self.around.as_deref());
        Ok(params.into_vec())
    }
}

/// Places matching a search, best match first
#[derive(Debug, Clone)]
pub struct PlacesResults {
    pub places: Vec<Container>,
    pub info: RequestInfo,
}

#[derive(Debug, Deserialize)]
struct RawPlacesResults {
    #[serde(default)]
    places: Vec<Container>,
}

impl PlacesResults {
    /// Extract the place held by every non-empty container
    ///
    /// # Errors
    ///
    /// Returns `NavitiaError::Domain` on the first inconsistent container.
    pub fn into_places(self) -> Result<Vec<Place>, NavitiaError> {
        let mut places = Vec::with_capacity(self.places.len());
        for container in &self.places {
            if let Some(place) = container.place()? {
                places.push(place);
            }
        }
        Ok(places)
    }
}

async fn fetch_places(
    session: &Session,
    url: url::Url,
    request: &PlacesRequest,
) -> Result<PlacesResults, NavitiaError> {
    let (raw, info): (RawPlacesResults, _) = session.get(url, request).await?;

    if raw.places.is_empty() {
        warn!("No places found");
    }
    debug!(count = raw.places.len(), "Places found");

    Ok(PlacesResults {
        places: raw.places,
        info,
    })
}

impl Session {
    /// Search places across every region
    ///
    /// # Errors
    ///
    /// Returns `NavitiaError::InvalidRequest` if the search text is blank,
    /// or any request error.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn places(&self, request: &PlacesRequest) -> Result<PlacesResults, NavitiaError> {
        let url = self.endpoint(&[PLACES])?;
        fetch_places(self, url, request).await
    }
}

impl Scope {
    /// Search places within the region
    ///
    /// # Errors
    ///
    /// See [`Session::places`].
    #[instrument(skip(self, request), fields(region = %self.region(), query = %request.query))]
    pub async fn places(&self, request: &PlacesRequest) -> Result<PlacesResults, NavitiaError> {
        let url = self.endpoint(&[PLACES])?;
        fetch_places(self.session(), url, request).await
    }
}
