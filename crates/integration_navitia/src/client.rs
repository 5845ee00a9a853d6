//! Trait seam over the Navitia session
//!
//! Callers that only need the top-level endpoints depend on [`TransitApi`]
//! so they can be tested against a mock.

use async_trait::async_trait;
use domain::entities::Region;
use domain::value_objects::{Coordinates, Id};
#[cfg(test)]
use mockall::automock;
use tracing::{debug, instrument};

use crate::coverage::{RegionRequest, RegionResults};
use crate::error::NavitiaError;
use crate::journeys::{JourneyRequest, JourneyResults};
use crate::places::{PlacesRequest, PlacesResults};
use crate::session::Session;

/// Trait for Navitia API clients
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitApi: Send + Sync {
    /// List the regions covered by the API
    async fn regions(&self, request: &RegionRequest) -> Result<RegionResults, NavitiaError>;

    /// Information about one region
    async fn region_by_id(&self, id: &Id) -> Result<RegionResults, NavitiaError>;

    /// The region covering a position
    async fn region_by_pos(&self, coords: &Coordinates) -> Result<RegionResults, NavitiaError>;

    /// Compute journeys
    async fn journeys(&self, request: &JourneyRequest) -> Result<JourneyResults, NavitiaError>;

    /// Search places
    async fn places(&self, request: &PlacesRequest) -> Result<PlacesResults, NavitiaError>;

    /// Check if the API is reachable and accepts the key
    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl TransitApi for Session {
    async fn regions(&self, request: &RegionRequest) -> Result<RegionResults, NavitiaError> {
        Self::regions(self, request).await
    }

    async fn region_by_id(&self, id: &Id) -> Result<RegionResults, NavitiaError> {
        Self::region_by_id(self, id).await
    }

    async fn region_by_pos(&self, coords: &Coordinates) -> Result<RegionResults, NavitiaError> {
        Self::region_by_pos(self, coords).await
    }

    async fn journeys(&self, request: &JourneyRequest) -> Result<JourneyResults, NavitiaError> {
        Self::journeys(self, request).await
    }

    async fn places(&self, request: &PlacesRequest) -> Result<PlacesResults, NavitiaError> {
        Self::places(self, request).await
    }

    async fn is_healthy(&self) -> bool {
        let request = RegionRequest {
            count: 1,
            geo: false,
        };
        Self::regions(self, &request).await.is_ok()
    }
}

/// The region covering a position
///
/// # Errors
///
/// Returns `NavitiaError::NotFound` when the API answers without a region,
/// or any request error.
#[instrument(skip(api), fields(position = %coords))]
pub async fn locate_region(
    api: &dyn TransitApi,
    coords: &Coordinates,
) -> Result<Region, NavitiaError> {
    let results = api.region_by_pos(coords).await?;
    let region = results
        .regions
        .into_iter()
        .next()
        .ok_or_else(|| NavitiaError::NotFound(format!("no region covers {coords}")))?;

    debug!(region = %region.id, "Region located");
    Ok(region)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use url::Url;

    use super::*;
    use crate::results::{Paging, RequestInfo};

    fn region_results(ids: &[&str]) -> RegionResults {
        RegionResults {
            regions: ids
                .iter()
                .map(|id| Region {
                    id: Id::new(*id),
                    name: id.to_uppercase(),
                    status: "running".to_string(),
                    ..Region::default()
                })
                .collect(),
            paging: Paging::default(),
            info: RequestInfo::new(
                Url::parse("https://api.navitia.io/v1/coverage/2.35;48.85").unwrap(),
                Utc::now(),
            ),
        }
    }

    #[tokio::test]
    async fn test_locate_region_returns_first() {
        let mut mock = MockTransitApi::new();
        mock.expect_region_by_pos()
            .times(1)
            .returning(|_| Ok(region_results(&["fr-idf", "fr-ne"])));

        let coords = Coordinates::new_unchecked(2.35, 48.85);
        let region = locate_region(&mock, &coords).await.unwrap();
        assert_eq!(region.id.as_str(), "fr-idf");
    }

    #[tokio::test]
    async fn test_locate_region_empty_is_not_found() {
        let mut mock = MockTransitApi::new();
        mock.expect_region_by_pos()
            .returning(|_| Ok(region_results(&[])));

        let coords = Coordinates::new_unchecked(-150.0, -60.0);
        let result = locate_region(&mock, &coords).await;
        assert!(matches!(result, Err(NavitiaError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_locate_region_propagates_errors() {
        let mut mock = MockTransitApi::new();
        mock.expect_region_by_pos().returning(|_| {
            Err(NavitiaError::Remote {
                status: 404,
                id: "unknown_object".to_string(),
                message: "no region".to_string(),
            })
        });

        let coords = Coordinates::new_unchecked(2.35, 48.85);
        let result = locate_region(&mock, &coords).await;
        assert!(matches!(result, Err(NavitiaError::Remote { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_mock_health() {
        let mut mock = MockTransitApi::new();
        mock.expect_is_healthy().returning(|| false);
        assert!(!mock.is_healthy().await);
    }
}
