//! Navitia session and request pipeline
//!
//! A [`Session`] owns the HTTP client, the API key and the region cache.
//! Every endpoint goes through [`Session::get`], which encodes the query,
//! authenticates, enforces the response size limit, honours cancellation
//! and decodes the JSON body.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use domain::value_objects::Id;
use moka::future::Cache;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::cancel::CancellationToken;
use crate::config::NavitiaConfig;
use crate::coverage::RegionResults;
use crate::error::NavitiaError;
use crate::request::Query;
use crate::results::RequestInfo;
use crate::scope::Scope;

/// The navitia.io API, the default base URL
pub const NAVITIA_API_URL: &str = "https://api.navitia.io/v1";

/// The SNCF (French national railway company) API
pub const SNCF_API_URL: &str = "https://api.sncf.com/v1";

/// Default maximum response size: 10 MB
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 10 * 1000 * 1000;

/// An authenticated session against a Navitia API
///
/// Cloning is cheap: clones share the HTTP client and the region cache.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
    cancel: Option<CancellationToken>,
}

#[derive(Debug)]
struct SessionInner {
    client: Client,
    config: NavitiaConfig,
    base_url: Url,
    region_cache: Option<Cache<String, RegionResults>>,
}

impl Session {
    /// Create a session with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns `NavitiaError::ConfigurationError` if the configuration is
    /// invalid (including a missing API key) or the HTTP client cannot be
    /// initialized.
    pub fn new(config: &NavitiaConfig) -> Result<Self, NavitiaError> {
        config.validate().map_err(NavitiaError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| NavitiaError::ConfigurationError(e.to_string()))?;

        Self::with_client(config, client)
    }

    /// Create a session around a caller-provided HTTP client
    ///
    /// The client's own timeout and user agent apply.
    ///
    /// # Errors
    ///
    /// Returns `NavitiaError::ConfigurationError` if the configuration is
    /// invalid.
    pub fn with_client(config: &NavitiaConfig, client: Client) -> Result<Self, NavitiaError> {
        config.validate().map_err(NavitiaError::ConfigurationError)?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| NavitiaError::ConfigurationError(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(NavitiaError::ConfigurationError(format!(
                "base_url cannot hold a path: {base_url}"
            )));
        }

        let region_cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(256)
                .time_to_live(Duration::from_secs(
                    u64::from(config.cache_ttl_minutes) * 60,
                ))
                .build()
        });

        debug!(base_url = %base_url, caching = config.caching_enabled(), "Navitia session created");

        Ok(Self {
            inner: Arc::new(SessionInner {
                client,
                config: config.clone(),
                base_url,
                region_cache,
            }),
            cancel: None,
        })
    }

    /// The configuration the session was built from
    #[must_use]
    pub fn config(&self) -> &NavitiaConfig {
        &self.inner.config
    }

    /// Base URL every endpoint is relative to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// A handle whose requests are scoped to a coverage region
    #[must_use]
    pub fn scope(&self, region: impl Into<Id>) -> Scope {
        Scope::new(self.clone(), region.into())
    }

    /// A session sharing this one's client whose requests abort once the
    /// token is cancelled
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    pub(crate) fn region_cache(&self) -> Option<&Cache<String, RegionResults>> {
        self.inner.region_cache.as_ref()
    }

    /// Append path segments to the base URL, encoding each one
    pub(crate) fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url, NavitiaError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                NavitiaError::ConfigurationError(format!(
                    "base_url cannot hold a path: {}",
                    self.inner.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments.iter().map(AsRef::as_ref));
        Ok(url)
    }

    /// Run a GET request against `url` and decode its JSON body
    pub(crate) async fn get<T, Q>(&self, mut url: Url, query: &Q) -> Result<(T, RequestInfo), NavitiaError>
    where
        T: DeserializeOwned,
        Q: Query + Sync + ?Sized,
    {
        let params = query.to_params()?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(&params);
        }

        let mut info = RequestInfo::new(url.clone(), Utc::now());
        debug!(url = %info.url, params = params.len(), "Sending Navitia request");

        let started = Instant::now();
        let body = self.guard(self.fetch(url)).await?;
        info.request_duration = started.elapsed();

        let started = Instant::now();
        let value = serde_json::from_slice(&body).map_err(|e| {
            warn!(url = %info.url, error = %e, "Failed to decode Navitia response");
            NavitiaError::ParseError(e.to_string())
        })?;
        info.parse_duration = started.elapsed();

        debug!(
            url = %info.url,
            bytes = body.len(),
            request_ms = info.request_duration.as_millis(),
            "Navitia response decoded"
        );
        Ok((value, info))
    }

    /// Race a request against the session's cancellation token
    async fn guard<T, F>(&self, request: F) -> Result<T, NavitiaError>
    where
        F: Future<Output = Result<T, NavitiaError>>,
    {
        let Some(token) = &self.cancel else {
            return request.await;
        };
        if token.is_cancelled() {
            return Err(NavitiaError::Cancelled);
        }

        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("Navitia request cancelled");
                Err(NavitiaError::Cancelled)
            },
            result = request => result,
        }
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>, NavitiaError> {
        let api_key = self.inner.config.api_key_str().unwrap_or_default();

        let response = self
            .inner
            .client
            .get(url)
            .basic_auth(api_key, Some(""))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NavitiaError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status != StatusCode::OK {
            let body = self.read_body(response).await.unwrap_or_default();
            warn!(%status, "Navitia returned an error");
            return Err(NavitiaError::from_response(status.as_u16(), &body));
        }

        self.read_body(response).await
    }

    /// Read the body chunk by chunk, refusing anything at or above the limit
    async fn read_body(&self, mut response: Response) -> Result<Vec<u8>, NavitiaError> {
        let mut buffer =
            BodyBuffer::new(self.inner.config.max_response_size, response.content_length())?;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.transport_error(&e))?
        {
            buffer.extend(&chunk)?;
        }

        Ok(buffer.into_bytes())
    }

    fn transport_error(&self, error: &reqwest::Error) -> NavitiaError {
        if error.is_timeout() {
            NavitiaError::Timeout {
                timeout_secs: self.inner.config.timeout_secs,
            }
        } else if error.is_body() || error.is_decode() {
            NavitiaError::RequestFailed(error.to_string())
        } else {
            NavitiaError::ConnectionFailed(error.to_string())
        }
    }
}

/// Response body accumulator bounded by the maximum response size
#[derive(Debug)]
struct BodyBuffer {
    limit: u64,
    bytes: Vec<u8>,
}

impl BodyBuffer {
    fn new(limit: u64, advertised: Option<u64>) -> Result<Self, NavitiaError> {
        if advertised.is_some_and(|len| len >= limit) {
            warn!(?advertised, limit, "Advertised response size over the limit");
            return Err(NavitiaError::ResponseTooLarge { limit });
        }

        let capacity = advertised
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or_default();
        Ok(Self {
            limit,
            bytes: Vec::with_capacity(capacity),
        })
    }

    fn extend(&mut self, chunk: &[u8]) -> Result<(), NavitiaError> {
        let total = self.bytes.len().saturating_add(chunk.len());
        if u64::try_from(total).map_or(true, |total| total >= self.limit) {
            warn!(limit = self.limit, "Response body reached the size limit");
            return Err(NavitiaError::ResponseTooLarge { limit: self.limit });
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
