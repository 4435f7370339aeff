//! Tagged result shared by both provider clients.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ProviderError;

/// Result of one provider call.
///
/// Only [`Outcome::Failed`] represents a real error. Every other variant is
/// an ordinary value that downstream derivation treats as "no input".
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    /// No credential configured; no request was made.
    NotConfigured,
    /// The provider answered but had nothing usable for `query`.
    NoData { query: String },
    /// Transport, timeout or HTTP status failure.
    Failed(ProviderError),
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Short status label: `success`, `not_configured`, `no_data` or `error`.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::NotConfigured => "not_configured",
            Outcome::NoData { .. } => "no_data",
            Outcome::Failed(_) => "error",
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::NotConfigured => Outcome::NotConfigured,
            Outcome::NoData { query } => Outcome::NoData { query },
            Outcome::Failed(err) => Outcome::Failed(err),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("status", self.status())?;
        match self {
            Outcome::Success(value) => map.serialize_entry("data", value)?,
            Outcome::NotConfigured => {}
            Outcome::NoData { query } => map.serialize_entry("query", query)?,
            Outcome::Failed(err) => map.serialize_entry("message", &err.to_string())?,
        }
        map.end()
    }
}
