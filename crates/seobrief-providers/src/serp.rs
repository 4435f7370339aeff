//! HTTP client for the search-results provider (Serper-style JSON API).

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use seobrief_core::app_config::DEFAULT_SERPER_BASE_URL;
use seobrief_core::AppConfig;

use crate::error::ProviderError;
use crate::outcome::Outcome;
use crate::paa::bucket_questions;
use crate::parse_helpers::{array_field, str_field, u64_field};
use crate::snippet::analyze_snippet;
use crate::types::{FeaturedSnippet, OrganicResult, SerpResult};

/// Organic results kept per query.
pub const MAX_ORGANIC_RESULTS: usize = 10;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
    num: usize,
}

/// Client for People-Also-Ask, related searches, featured snippets and
/// organic results.
pub struct SerpClient {
    client: Client,
    api_key: Option<String>,
    search_url: Url,
    language: String,
}

impl SerpClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        language: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            language,
            DEFAULT_SERPER_BASE_URL,
        )
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`SerpClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            config.serper_api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
            &config.language,
            &config.serper_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        language: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let invalid = |reason: String| ProviderError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join("search"))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            search_url,
            language: language.to_string(),
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs one search and extracts PAA, related searches, the featured
    /// snippet and the top organic results.
    ///
    /// A body that is not a JSON object yields [`Outcome::NoData`].
    pub async fn search(&self, query: &str, country: &str) -> Outcome<SerpResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Outcome::NotConfigured;
        };

        let country = country.to_lowercase();
        let request = SearchRequest {
            q: query,
            gl: &country,
            hl: &self.language,
            num: MAX_ORGANIC_RESULTS,
        };

        let body = match self.post_search(api_key, &request).await {
            Ok(body) => body,
            Err(e) => return Outcome::Failed(e),
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(value) if value.is_object() => {
                let result = parse_search_response(query, &value);
                tracing::debug!(
                    query,
                    paa = result.people_also_ask.len(),
                    organic = result.organic_results.len(),
                    featured_snippet = result.featured_snippet.is_some(),
                    "parsed search results"
                );
                Outcome::Success(result)
            }
            Ok(_) | Err(_) => {
                tracing::debug!(query, "search response was empty or not a JSON object");
                Outcome::NoData {
                    query: query.to_string(),
                }
            }
        }
    }

    async fn post_search(
        &self,
        api_key: &str,
        request: &SearchRequest<'_>,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.search_url.clone())
            .header("X-API-KEY", api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: self.search_url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Extract a [`SerpResult`] from a provider response. Missing or mistyped
/// keys degrade to empty values.
#[must_use]
pub fn parse_search_response(query: &str, data: &Value) -> SerpResult {
    let people_also_ask: Vec<String> = array_field(data, "peopleAlsoAsk")
        .iter()
        .map(|paa| str_field(paa, "question"))
        .collect();
    let paa_intents = bucket_questions(&people_also_ask);

    let related_searches = array_field(data, "relatedSearches")
        .iter()
        .map(|rs| str_field(rs, "query"))
        .collect();

    let featured_snippet = data
        .get("answerBox")
        .filter(|answer| answer.is_object())
        .map(|answer| {
            let snippet = str_field(answer, "snippet");
            FeaturedSnippet {
                title: str_field(answer, "title"),
                link: str_field(answer, "link"),
                analysis: analyze_snippet(&snippet),
                snippet,
            }
        });

    let organic_results: Vec<OrganicResult> = array_field(data, "organic")
        .iter()
        .take(MAX_ORGANIC_RESULTS)
        .map(|result| {
            let link = str_field(result, "link");
            OrganicResult {
                position: u32::try_from(u64_field(result, "position")).unwrap_or(0),
                title: str_field(result, "title"),
                snippet: str_field(result, "snippet"),
                domain: extract_domain(&link),
                link,
            }
        })
        .collect();

    let mut domain_counts: BTreeMap<String, usize> = BTreeMap::new();
    for result in organic_results.iter().filter(|r| !r.domain.is_empty()) {
        *domain_counts.entry(result.domain.clone()).or_default() += 1;
    }

    let total_results = data
        .get("searchInformation")
        .map_or(0, |info| u64_field(info, "totalResults"));

    SerpResult {
        query: query.to_string(),
        people_also_ask,
        paa_intents,
        related_searches,
        featured_snippet,
        organic_results,
        domain_counts,
        total_results,
    }
}

/// Host of a result link, empty when the link does not parse.
#[must_use]
pub fn extract_domain(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_default()
}
