//! Coverage endpoints: the regions served by the API

use std::fmt;

use domain::entities::Region;
use domain::value_objects::{Coordinates, Id};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::NavitiaError;
use crate::request::{Params, Query};
use crate::results::{Paging, RequestInfo};
use crate::session::Session;

const COVERAGE: &str = "coverage";

/// Parameters of a region listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRequest {
    /// Number of regions per page (0 for the API default)
    pub count: u32,
    /// Whether region shapes are returned
    pub geo: bool,
}

impl Default for RegionRequest {
    fn default() -> Self {
        Self {
            count: 0,
            geo: true,
        }
    }
}

impl Query for RegionRequest {
    fn to_params(&self) -> Result<Vec<(String, String)>, NavitiaError> {
        let mut params = Params::new();
        params.push_uint("count", self.count);
        params.push_flag("disable_geojson", !self.geo);
        Ok(params.into_vec())
    }
}

/// Regions returned by a coverage request
#[derive(Debug, Clone)]
pub struct RegionResults {
    pub regions: Vec<Region>,
    pub paging: Paging,
    pub info: RequestInfo,
}

#[derive(Debug, Deserialize)]
struct RawRegionResults {
    #[serde(default)]
    regions: Vec<Region>,
    #[serde(default)]
    pagination: Paging,
}

impl RegionResults {
    /// The first region, if any
    #[must_use]
    pub fn first(&self) -> Option<&Region> {
        self.regions.first()
    }

    /// Number of regions returned
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region was returned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl fmt::Display for RegionResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, region) in self.regions.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "{region}")?;
        }
        Ok(())
    }
}

impl Session {
    async fn coverage(
        &self,
        segments: &[&str],
        request: &RegionRequest,
    ) -> Result<RegionResults, NavitiaError> {
        let url = self.endpoint(segments)?;
        let (raw, info): (RawRegionResults, _) = self.get(url, request).await?;

        if raw.regions.is_empty() {
            warn!("No regions returned");
        }
        debug!(count = raw.regions.len(), "Regions found");

        Ok(RegionResults {
            regions: raw.regions,
            paging: raw.pagination,
            info,
        })
    }

    /// List the regions covered by the API
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[instrument(skip(self))]
    pub async fn regions(&self, request: &RegionRequest) -> Result<RegionResults, NavitiaError> {
        self.coverage(&[COVERAGE], request).await
    }

    /// Information about one region
    ///
    /// Results are cached when the configuration enables caching.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the id does not designate a region.
    #[instrument(skip(self), fields(region = %id))]
    pub async fn region_by_id(&self, id: &Id) -> Result<RegionResults, NavitiaError> {
        if let Some(cache) = self.region_cache() {
            if let Some(cached) = cache.get(id.as_str()).await {
                debug!("Region cache hit");
                return Ok(cached);
            }
        }

        let results = self
            .coverage(&[COVERAGE, id.as_str()], &RegionRequest::default())
            .await?;

        if let Some(cache) = self.region_cache() {
            cache.insert(id.to_string(), results.clone()).await;
        }
        Ok(results)
    }

    /// The region covering a position
    ///
    /// # Errors
    ///
    /// Returns a remote error if no region covers the position.
    #[instrument(skip(self), fields(position = %coords))]
    pub async fn region_by_pos(&self, coords: &Coordinates) -> Result<RegionResults, NavitiaError> {
        let id = coords.id();
        self.coverage(&[COVERAGE, id.as_str()], &RegionRequest::default())
            .await
    }
}
