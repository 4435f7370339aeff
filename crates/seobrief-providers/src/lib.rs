//! Keyword-metrics and search-results provider clients.
//!
//! Both clients return an [`Outcome`] rather than a `Result`: a missing
//! credential or an empty answer is an ordinary value, and only transport
//! failures carry a [`ProviderError`].

pub mod error;
pub mod keyword_metrics;
pub mod outcome;
pub mod paa;
pub mod serp;
pub mod snippet;
pub mod types;

mod parse_helpers;

pub use error::ProviderError;
pub use keyword_metrics::KeywordMetricsClient;
pub use outcome::Outcome;
pub use paa::{bucket_questions, classify_question};
pub use serp::{extract_domain, parse_search_response, SerpClient};
pub use snippet::analyze_snippet;
pub use types::{
    FeaturedSnippet, FeaturedSnippetAnalysis, KeywordMetric, OrganicResult, PaaBuckets,
    SerpResult, StructureType,
};
