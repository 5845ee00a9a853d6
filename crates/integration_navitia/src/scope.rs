//! Coverage-scoped handles

use domain::entities::{Collection, Container};
use domain::value_objects::Id;
use tracing::warn;
use url::Url;

use crate::error::NavitiaError;
use crate::session::Session;

/// A session scoped to one coverage region
///
/// Requests go to `{base}/coverage/{region}/…`.
#[derive(Debug, Clone)]
pub struct Scope {
    session: Session,
    region: Id,
}

impl Scope {
    pub(crate) fn new(session: Session, region: Id) -> Self {
        Self { session, region }
    }

    /// The region this scope is bound to
    #[must_use]
    pub const fn region(&self) -> &Id {
        &self.region
    }

    /// The session requests are sent through
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn endpoint(&self, tail: &[&str]) -> Result<Url, NavitiaError> {
        let mut segments = vec!["coverage", self.region.as_str()];
        segments.extend_from_slice(tail);
        self.session.endpoint(&segments)
    }

    /// Handles on the objects designated by the containers
    ///
    /// Containers whose identifier kind does not name an explorable
    /// collection are skipped.
    #[must_use]
    pub fn related(&self, containers: &[Container]) -> Vec<ObjectHandle> {
        containers
            .iter()
            .filter_map(|container| {
                let Some(collection) = Collection::for_id(&container.id) else {
                    warn!(id = %container.id, "Skipping container without an explorable kind");
                    return None;
                };
                Some(self.object(collection, container.id.clone()))
            })
            .collect()
    }

    /// Handle on a single object of the region
    #[must_use]
    pub fn object(&self, collection: Collection, id: Id) -> ObjectHandle {
        ObjectHandle {
            session: self.session.clone(),
            region: self.region.clone(),
            collection,
            id,
        }
    }
}

/// A single public transport object whose sub-collections can be explored
///
/// Rooted at `{base}/coverage/{region}/{collection}/{id}`.
#[derive(Debug, Clone)]
pub struct ObjectHandle {
    session: Session,
    region: Id,
    collection: Collection,
    id: Id,
}

impl ObjectHandle {
    /// Identifier of the object
    #[must_use]
    pub const fn id(&self) -> &Id {
        &self.id
    }

    /// Collection the object belongs to
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// URL of the object itself
    ///
    /// # Errors
    ///
    /// Returns `NavitiaError::ConfigurationError` if the session base URL
    /// cannot hold a path.
    pub fn url(&self) -> Result<Url, NavitiaError> {
        self.endpoint(&[])
    }

    pub(crate) fn endpoint(&self, tail: &[&str]) -> Result<Url, NavitiaError> {
        let mut segments = vec![
            "coverage",
            self.region.as_str(),
            self.collection.as_str(),
            self.id.as_str(),
        ];
        segments.extend_from_slice(tail);
        self.session.endpoint(&segments)
    }

    pub(crate) const fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavitiaConfig;

    fn scope() -> Scope {
        Session::new(&NavitiaConfig::for_testing())
            .unwrap()
            .scope("fr-idf")
    }

    fn container(id: &str) -> Container {
        Container {
            id: Id::new(id),
            ..Container::default()
        }
    }

    #[test]
    fn test_scope_endpoint() {
        let url = scope().endpoint(&["journeys"]).unwrap();
        assert_eq!(url.path(), "/v1/coverage/fr-idf/journeys");
    }

    #[test]
    fn test_related_maps_known_kinds() {
        let handles = scope().related(&[
            container("stop_area:OIF:SA:8768600"),
            container("admin:fr:75056"),
            container("2.35;48.85"),
            container("line:OIF:C01742"),
        ]);
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].collection(), Collection::StopAreas);
        assert_eq!(
            handles[0].url().unwrap().path(),
            "/v1/coverage/fr-idf/stop_areas/stop_area:OIF:SA:8768600"
        );
        assert_eq!(handles[1].collection(), Collection::Lines);
        assert_eq!(handles[1].id().as_str(), "line:OIF:C01742");
    }

    #[test]
    fn test_object_handle_sub_collection() {
        let handle = scope().object(Collection::StopAreas, Id::new("stop_area:X"));
        let url = handle.endpoint(&[Collection::Lines.as_str()]).unwrap();
        assert_eq!(url.path(), "/v1/coverage/fr-idf/stop_areas/stop_area:X/lines");
    }
}
