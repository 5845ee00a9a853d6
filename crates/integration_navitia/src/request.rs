//! Query parameter encoding shared by every request type

use std::time::Duration;

use crate::error::NavitiaError;

/// A request that can be turned into URL query parameters
///
/// Values are raw; percent-encoding happens once when the URL is built.
pub trait Query {
    /// Encode the request as ordered key/value pairs
    ///
    /// # Errors
    ///
    /// Returns `NavitiaError::InvalidRequest` when mandatory parameters are
    /// missing or malformed.
    fn to_params(&self) -> Result<Vec<(String, String)>, NavitiaError>;
}

/// Requests without parameters
impl Query for () {
    fn to_params(&self) -> Result<Vec<(String, String)>, NavitiaError> {
        Ok(Vec::new())
    }
}

/// Ordered parameter list that skips zero values
#[derive(Debug, Default)]
pub(crate) struct Params(Vec<(String, String)>);

impl Params {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, value: impl Into<String>) {
        self.0.push((key.to_string(), value.into()));
    }

    pub(crate) fn push_str(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.push(key, value);
        }
    }

    pub(crate) fn push_opt<T: AsRef<str>>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.push_str(key, value.as_ref());
        }
    }

    pub(crate) fn push_uint(&mut self, key: &str, value: u32) {
        if value != 0 {
            self.push(key, value.to_string());
        }
    }

    /// Whole seconds, truncated
    pub(crate) fn push_secs(&mut self, key: &str, value: Duration) {
        let secs = value.as_secs();
        if secs != 0 {
            self.push(key, secs.to_string());
        }
    }

    /// Three decimals, as the API expects for speeds
    pub(crate) fn push_float(&mut self, key: &str, value: f64) {
        if value != 0.0 {
            self.push(key, format!("{value:.3}"));
        }
    }

    pub(crate) fn push_flag(&mut self, key: &str, value: bool) {
        if value {
            self.push(key, "true");
        }
    }

    /// One pair per value, in order
    pub(crate) fn push_all<I, T>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for value in values {
            self.push(key, value.as_ref());
        }
    }

    pub(crate) fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}
