//! Metadata shared by every results type

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Timing and origin of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Endpoint that was queried, without its query string
    pub url: Url,
    /// When the request was issued
    pub created_at: DateTime<Utc>,
    /// Time spent sending the request and reading the body
    pub request_duration: Duration,
    /// Time spent decoding the body
    pub parse_duration: Duration,
}

impl RequestInfo {
    pub(crate) fn new(mut url: Url, created_at: DateTime<Utc>) -> Self {
        url.set_query(None);
        Self {
            url,
            created_at,
            request_duration: Duration::ZERO,
            parse_duration: Duration::ZERO,
        }
    }
}

/// Pagination block of list responses (`pagination`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub start_page: u32,
    #[serde(default)]
    pub items_on_page: u32,
    #[serde(default)]
    pub items_per_page: u32,
    #[serde(default, rename = "total_result")]
    pub total_results: u32,
}

impl Paging {
    /// Whether more items are available after this page
    #[must_use]
    pub const fn has_next(&self) -> bool {
        let seen = self
            .start_page
            .saturating_add(1)
            .saturating_mul(self.items_per_page);
        self.items_per_page > 0 && seen < self.total_results
    }
}
