//! Exploration of public transport objects

use domain::entities::{Collection, PtObject};
use domain::value_objects::Id;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::error::NavitiaError;
use crate::request::{Params, Query};
use crate::results::{Paging, RequestInfo};
use crate::scope::{ObjectHandle, Scope};
use crate::session::Session;

/// Parameters of an exploration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreRequest {
    /// Objects per page (0 for the API default)
    pub count: u32,
    /// Depth of nested objects in the response (0 for the API default)
    pub depth: u32,
    /// Page to return, starting at 0
    pub start_page: u32,
    /// Objects to exclude
    pub forbidden: Vec<Id>,
    /// Whether geometries are returned
    pub geo: bool,
}

impl Default for ExploreRequest {
    fn default() -> Self {
        Self {
            count: 0,
            depth: 0,
            start_page: 0,
            forbidden: Vec::new(),
            geo: true,
        }
    }
}

impl ExploreRequest {
    /// The request for the page after `paging`
    #[must_use]
    pub fn next_page(&self, paging: &Paging) -> Option<Self> {
        paging.has_next().then(|| Self {
            start_page: paging.start_page.saturating_add(1),
            ..self.clone()
        })
    }
}

impl Query for ExploreRequest {
    fn to_params(&self) -> Result<Vec<(String, String)>, NavitiaError> {
        let mut params = Params::new();
        params.push_uint("count", self.count);
        params.push_uint("depth", self.depth);
        params.push_uint("start_page", self.start_page);
        params.push_all("forbidden_id[]", &self.forbidden);
        params.push_flag("disable_geojson", !self.geo);
        Ok(params.into_vec())
    }
}

/// Objects of one collection
#[derive(Debug, Clone)]
pub struct ExploreResults {
    pub collection: Collection,
    pub objects: Vec<PtObject>,
    pub paging: Paging,
    pub info: RequestInfo,
}

/// The objects are listed under the collection's name next to the paging block
#[derive(Debug, Deserialize)]
struct RawExploreResults {
    #[serde(default)]
    pagination: Paging,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl RawExploreResults {
    fn into_objects(mut self, collection: Collection) -> Result<Vec<PtObject>, NavitiaError> {
        let Some(items) = self.rest.remove(collection.as_str()) else {
            return Ok(Vec::new());
        };
        collection
            .decode(items)
            .map_err(|e| NavitiaError::ParseError(format!("{collection}: {e}")))
    }
}

async fn fetch_collection(
    session: &Session,
    url: url::Url,
    collection: Collection,
    request: &ExploreRequest,
) -> Result<ExploreResults, NavitiaError> {
    let (raw, info): (RawExploreResults, _) = session.get(url, request).await?;
    let paging = raw.pagination;
    let objects = raw.into_objects(collection)?;

    if objects.is_empty() {
        warn!(%collection, "No objects found");
    }
    debug!(%collection, count = objects.len(), "Objects found");

    Ok(ExploreResults {
        collection,
        objects,
        paging,
        info,
    })
}

impl Scope {
    /// List the objects of a collection in the region
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the objects cannot be decoded.
    #[instrument(skip(self, request), fields(region = %self.region()))]
    pub async fn explore(
        &self,
        collection: Collection,
        request: &ExploreRequest,
    ) -> Result<ExploreResults, NavitiaError> {
        let url = self.endpoint(&[collection.as_str()])?;
        fetch_collection(self.session(), url, collection, request).await
    }
}

impl ObjectHandle {
    /// List the objects of a collection related to this object, e.g. the
    /// lines serving a stop area
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the objects cannot be decoded.
    #[instrument(skip(self, request), fields(object = %self.id()))]
    pub async fn explore(
        &self,
        collection: Collection,
        request: &ExploreRequest,
    ) -> Result<ExploreResults, NavitiaError> {
        let url = self.endpoint(&[collection.as_str()])?;
        fetch_collection(self.session(), url, collection, request).await
    }
}
