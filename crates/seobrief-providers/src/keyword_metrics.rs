//! HTTP client for the keyword-metrics provider (SEMrush-style CSV API).
//!
//! Reports are `;`-separated text with a header row. The credential travels
//! as the `key` query parameter, so URLs are never logged in full.

use std::time::Duration;

use reqwest::{Client, Url};

use seobrief_core::app_config::DEFAULT_SEMRUSH_BASE_URL;
use seobrief_core::AppConfig;

use crate::error::ProviderError;
use crate::outcome::Outcome;
use crate::parse_helpers::{parse_competition, parse_count, parse_decimal};
use crate::types::KeywordMetric;

const OVERVIEW_COLUMNS: &str = "Ph,Nq,Cp,Co,Nr,Td";
const RELATED_COLUMNS: &str = "Ph,Nq,Cp,Co";

/// Client for keyword volume, CPC and competition.
///
/// Built without a credential it stays usable: every call short-circuits to
/// [`Outcome::NotConfigured`] (or an empty list) without touching the network.
pub struct KeywordMetricsClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl KeywordMetricsClient {
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
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_SEMRUSH_BASE_URL)
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`KeywordMetricsClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            config.semrush_api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
            &config.semrush_base_url,
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
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so query_pairs_mut writes to the root path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url,
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches the overview metrics for one keyword in a country database.
    ///
    /// A report without a data row yields [`Outcome::NoData`] carrying the
    /// queried keyword.
    pub async fn keyword_metric(&self, keyword: &str, country: &str) -> Outcome<KeywordMetric> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Outcome::NotConfigured;
        };

        let database = country.to_lowercase();
        let url = self.build_url(
            api_key,
            "phrase_organic",
            &[
                ("phrase", keyword),
                ("database", &database),
                ("export_columns", OVERVIEW_COLUMNS),
            ],
        );

        let body = match self.request_text(&url).await {
            Ok(body) => body,
            Err(e) => return Outcome::Failed(e),
        };

        match parse_overview_report(&body, keyword) {
            Some(metric) => Outcome::Success(metric),
            None => {
                tracing::debug!(keyword, database = %database, "keyword overview returned no data row");
                Outcome::NoData {
                    query: keyword.to_string(),
                }
            }
        }
    }

    /// Fetches up to `limit` related keywords, in provider order.
    ///
    /// Never fails: an unconfigured client, a transport error or an empty
    /// report all produce an empty list. Transport errors are logged.
    pub async fn related_keywords(
        &self,
        keyword: &str,
        country: &str,
        limit: usize,
    ) -> Vec<KeywordMetric> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        let database = country.to_lowercase();
        let display_limit = limit.to_string();
        let url = self.build_url(
            api_key,
            "phrase_related",
            &[
                ("phrase", keyword),
                ("database", &database),
                ("export_columns", RELATED_COLUMNS),
                ("display_limit", &display_limit),
            ],
        );

        match self.request_text(&url).await {
            Ok(body) => {
                let related = parse_related_report(&body, limit);
                tracing::debug!(keyword, count = related.len(), "collected related keywords");
                related
            }
            Err(e) => {
                tracing::warn!(keyword, error = %e, "related keywords fetch failed");
                Vec::new()
            }
        }
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, api_key: &str, report_type: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("type", report_type);
            pairs.append_pair("key", api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request and returns the body text on a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] on network failure or timeout and
    /// [`ProviderError::UnexpectedStatus`] on a non-2xx status.
    async fn request_text(&self, url: &Url) -> Result<String, ProviderError> {
        // The URL carries the credential, so it is stripped from errors.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: self.base_url.to_string(),
            });
        }
        Ok(response.text().await.map_err(reqwest::Error::without_url)?)
    }
}

/// Data rows of a report: everything after the header, `\r` stripped.
fn data_rows(body: &str) -> impl Iterator<Item = Vec<&str>> + '_ {
    body.trim()
        .lines()
        .skip(1)
        .map(|line| line.trim_end_matches('\r').split(';').collect())
}

/// Parse the first data row of an overview report.
///
/// Returns `None` when the report has no data row.
fn parse_overview_report(body: &str, keyword: &str) -> Option<KeywordMetric> {
    let row = data_rows(body).next()?;
    let column = |i: usize| row.get(i).copied().unwrap_or_default();

    let reported = column(0).trim();
    Some(KeywordMetric {
        keyword: if reported.is_empty() {
            keyword.to_string()
        } else {
            reported.to_string()
        },
        search_volume: parse_count(column(1)),
        cpc: parse_decimal(column(2)),
        competition: parse_competition(column(3)),
        results_count: Some(parse_count(column(4))),
        trend: column(5).trim().to_string(),
    })
}

/// Parse a related-keywords report. Rows with fewer than four columns are
/// skipped.
fn parse_related_report(body: &str, limit: usize) -> Vec<KeywordMetric> {
    data_rows(body)
        .filter(|row| row.len() >= 4)
        .map(|row| {
            KeywordMetric::new(
                row[0].trim(),
                parse_count(row[1]),
                parse_decimal(row[2]),
                parse_competition(row[3]),
            )
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> KeywordMetricsClient {
        KeywordMetricsClient::with_base_url(Some("test-key"), 5, "seobrief-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_query_string() {
        let client = test_client("https://api.semrush.com");
        let url = client.build_url("test-key", "phrase_organic", &[("phrase", "mutuo casa")]);
        assert_eq!(
            url.as_str(),
            "https://api.semrush.com/?type=phrase_organic&key=test-key&phrase=mutuo+casa"
        );
    }

    #[test]
    fn blank_key_means_not_configured() {
        let client =
            KeywordMetricsClient::with_base_url(Some("  "), 5, "ua", "https://api.semrush.com")
                .unwrap();
        assert!(!client.is_configured());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = KeywordMetricsClient::with_base_url(Some("k"), 5, "ua", "not a url");
        assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn overview_report_parses_first_row() {
        let body = "Keyword;Search Volume;CPC;Competition;Number of Results;Trends\r\n\
                    mutuo prima casa;22200;2.45;0.87;45600000;0.81,0.67,1.00\r\n";
        let metric = parse_overview_report(body, "mutuo prima casa").unwrap();
        assert_eq!(metric.keyword, "mutuo prima casa");
        assert_eq!(metric.search_volume, 22_200);
        assert!((metric.cpc - 2.45).abs() < 1e-9);
        assert!((metric.competition - 0.87).abs() < 1e-9);
        assert_eq!(metric.results_count, Some(45_600_000));
        assert_eq!(metric.trend, "0.81,0.67,1.00");
    }

    #[test]
    fn overview_report_degrades_malformed_numbers() {
        let body = "Keyword;Search Volume;CPC;Competition\n;n/a;abc;-1\n";
        let metric = parse_overview_report(body, "fallback").unwrap();
        assert_eq!(metric.keyword, "fallback");
        assert_eq!(metric.search_volume, 0);
        assert_eq!(metric.cpc, 0.0);
        assert_eq!(metric.competition, 0.0);
        assert_eq!(metric.results_count, Some(0));
        assert_eq!(metric.trend, "");
    }

    #[test]
    fn overview_report_without_data_row_is_none() {
        assert!(parse_overview_report("ERROR 50 :: NOTHING FOUND", "x").is_none());
        assert!(parse_overview_report("", "x").is_none());
    }

    #[test]
    fn related_report_skips_short_rows_and_caps() {
        let body = "Keyword;Search Volume;CPC;Competition\n\
                    mutuo giovani;9900;1.8;0.9\n\
                    broken;row\n\
                    mutuo online;5400;2.1;0.95\n\
                    mutuo consap;4400;0.9;0.6\n";
        let related = parse_related_report(body, 2);
        assert_eq!(related.len(), 2);
        assert_eq!(related[0].keyword, "mutuo giovani");
        assert_eq!(related[1].keyword, "mutuo online");
        assert!(related[0].results_count.is_none());
    }
}
