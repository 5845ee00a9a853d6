//! Journey planning

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use domain::entities::{Journey, Mode};
use domain::value_objects::{DataFreshness, Id, QueryValue, TravelerType, datetime};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::NavitiaError;
use crate::request::{Params, Query};
use crate::results::RequestInfo;
use crate::scope::Scope;
use crate::session::Session;

const JOURNEYS: &str = "journeys";

/// Parameters of a journey computation
///
/// At least one of `from` and `to` must be set. With only one of them the
/// API answers with isochrone-like journeys that carry no sections. Zero
/// and empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JourneyRequest {
    /// Origin, as a query value (place id, coordinates…)
    pub from: Option<String>,
    /// Destination, as a query value
    pub to: Option<String>,

    /// Departure date-time, or arrival when `date_is_arrival` is set
    pub date: Option<NaiveDateTime>,
    pub date_is_arrival: bool,

    pub traveler: Option<TravelerType>,
    pub freshness: Option<DataFreshness>,

    /// Public transport objects the journeys must avoid
    pub forbidden: Vec<Id>,
    /// Public transport objects the journeys may use
    pub allowed: Vec<Id>,

    /// Modes allowed for the first section; inclusive
    pub first_section_modes: Vec<Mode>,
    /// Modes allowed for the last section; inclusive
    pub last_section_modes: Vec<Mode>,

    /// Maximum time to reach public transport
    pub max_duration_to_pt: Duration,

    /// Speeds in metres per second
    pub walking_speed: f64,
    pub bike_speed: f64,
    pub bike_share_speed: f64,
    pub car_speed: f64,

    pub min_journeys: u32,
    pub max_journeys: u32,
    /// Exact number of journeys; overrides the minimum and maximum
    pub count: u32,

    pub max_transfers: u32,
    pub max_duration: Duration,

    /// Restrict to accessible public transport
    pub wheelchair: bool,
}

impl JourneyRequest {
    /// A request between two places
    #[must_use]
    pub fn between(from: &impl QueryValue, to: &impl QueryValue) -> Self {
        Self::default().with_from(from).with_to(to)
    }

    /// Set the origin
    #[must_use]
    pub fn with_from(mut self, from: &impl QueryValue) -> Self {
        self.from = Some(from.query_value());
        self
    }

    /// Set the destination
    #[must_use]
    pub fn with_to(mut self, to: &impl QueryValue) -> Self {
        self.to = Some(to.query_value());
        self
    }

    /// Depart at the given date-time
    #[must_use]
    pub fn departing_at(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self.date_is_arrival = false;
        self
    }

    /// Arrive by the given date-time
    #[must_use]
    pub fn arriving_by(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self.date_is_arrival = true;
        self
    }
}

impl Query for JourneyRequest {
    fn to_params(&self) -> Result<Vec<(String, String)>, NavitiaError> {
        let blank = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());
        if blank(&self.from) && blank(&self.to) {
            return Err(NavitiaError::InvalidRequest(
                "a journey needs at least an origin or a destination".to_string(),
            ));
        }

        let mut params = Params::new();
        params.push_opt("from", self.from.as_deref().map(str::trim));
        params.push_opt("to", self.to.as_deref().map(str::trim));

        if let Some(date) = &self.date {
            params.push("datetime", datetime::format_date_time(date));
            if self.date_is_arrival {
                params.push("datetime_represents", "arrival");
            }
        }

        params.push_opt("traveler_type", self.traveler.map(|t| t.as_str()));
        params.push_opt("data_freshness", self.freshness.map(|f| f.as_str()));

        params.push_all("forbidden_uris[]", &self.forbidden);
        params.push_all("allowed_id[]", &self.allowed);
        params.push_all(
            "first_section_mode[]",
            self.first_section_modes.iter().map(Mode::as_str),
        );
        params.push_all(
            "last_section_mode[]",
            self.last_section_modes.iter().map(Mode::as_str),
        );

        params.push_secs("max_duration_to_pt", self.max_duration_to_pt);

        params.push_float("walking_speed", self.walking_speed);
        params.push_float("bike_speed", self.bike_speed);
        params.push_float("bss_speed", self.bike_share_speed);
        params.push_float("car_speed", self.car_speed);

        if self.count != 0 {
            params.push_uint("count", self.count);
        } else {
            params.push_uint("min_nb_journeys", self.min_journeys);
            params.push_uint("max_nb_journeys", self.max_journeys);
        }

        params.push_uint("max_nb_transfers", self.max_transfers);
        params.push_secs("max_duration", self.max_duration);
        params.push_flag("wheelchair", self.wheelchair);

        Ok(params.into_vec())
    }
}

/// Journeys returned by a journey request
///
/// `Journey::from` and `Journey::to` are not guaranteed to be filled; the
/// sections carry the endpoints.
#[derive(Debug, Clone)]
pub struct JourneyResults {
    pub journeys: Vec<Journey>,
    pub info: RequestInfo,
}

#[derive(Debug, Deserialize)]
struct RawJourneyResults {
    #[serde(default)]
    journeys: Vec<Journey>,
}

impl JourneyResults {
    /// The fastest journey, if any
    #[must_use]
    pub fn fastest(&self) -> Option<&Journey> {
        self.journeys.iter().min_by_key(|j| j.duration)
    }
}

impl fmt::Display for JourneyResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, journey) in self.journeys.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            writeln!(f, "Journey #{i}: {journey}")?;
        }
        Ok(())
    }
}

async fn fetch_journeys(
    session: &Session,
    url: url::Url,
    request: &JourneyRequest,
) -> Result<JourneyResults, NavitiaError> {
    let (raw, info): (RawJourneyResults, _) = session.get(url, request).await?;

    if raw.journeys.is_empty() {
        warn!("No journeys found");
    }
    debug!(count = raw.journeys.len(), "Journeys found");

    Ok(JourneyResults {
        journeys: raw.journeys,
        info,
    })
}

impl Session {
    /// Compute journeys, letting the API pick the region
    ///
    /// # Errors
    ///
    /// Returns `NavitiaError::InvalidRequest` if neither origin nor
    /// destination is set, or any request error.
    #[instrument(skip(self, request), fields(from = ?request.from, to = ?request.to))]
    pub async fn journeys(&self, request: &JourneyRequest) -> Result<JourneyResults, NavitiaError> {
        let url = self.endpoint(&[JOURNEYS])?;
        fetch_journeys(self, url, request).await
    }
}

impl Scope {
    /// Compute journeys within the region
    ///
    /// # Errors
    ///
    /// See [`Session::journeys`].
    #[instrument(skip(self, request), fields(region = %self.region(), from = ?request.from, to = ?request.to))]
    pub async fn journeys(&self, request: &JourneyRequest) -> Result<JourneyResults, NavitiaError> {
        let url = self.endpoint(&[JOURNEYS])?;
        fetch_journeys(self.session(), url, request).await
    }
}
