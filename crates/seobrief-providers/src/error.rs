use thiserror::Error;

/// Transport-level failures from the keyword-metrics and SERP providers.
///
/// Missing credentials and empty responses are not errors; they surface as
/// [`Outcome::NotConfigured`](crate::Outcome::NotConfigured) and
/// [`Outcome::NoData`](crate::Outcome::NoData).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
