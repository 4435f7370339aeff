//! Research pipeline orchestration.

use chrono::{DateTime, Utc};
use serde::Serialize;

use seobrief_core::{AppConfig, CompetitorDocument};
use seobrief_providers::{KeywordMetric, KeywordMetricsClient, Outcome, SerpClient, SerpResult};

use crate::clusters::extract_clusters;
use crate::competitor::analyze_competitors;
use crate::insights::synthesize;
use crate::intent::classify_keywords;
use crate::types::{CompetitorInsights, IntentBuckets, SearchIntentInsight, TopicClusters};

/// Default cap on related keywords per brief.
pub const DEFAULT_RELATED_LIMIT: usize = 50;

/// Input for one brief.
#[derive(Debug, Clone)]
pub struct ResearchRequest {
    /// Keywords in the order given. The first one is the primary keyword.
    pub keywords: Vec<String>,
    pub country: String,
    pub competitors: Vec<CompetitorDocument>,
}

impl ResearchRequest {
    /// Build a request from a comma-separated keyword list.
    #[must_use]
    pub fn new(raw_keywords: &str, country: &str, competitors: Vec<CompetitorDocument>) -> Self {
        Self {
            keywords: parse_keyword_list(raw_keywords),
            country: country.to_string(),
            competitors,
        }
    }

    #[must_use]
    pub fn primary_keyword(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }
}

/// Split a comma-separated keyword list, dropping blank entries.
#[must_use]
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stage toggles. A disabled stage leaves its output empty; a disabled
/// SERP call is reported as [`Outcome::NotConfigured`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub related_keywords: bool,
    pub intent_classification: bool,
    pub topic_clusters: bool,
    pub serp: bool,
    pub competitor_analysis: bool,
    pub related_limit: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            related_keywords: true,
            intent_classification: true,
            topic_clusters: true,
            serp: true,
            competitor_analysis: true,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

impl PipelineOptions {
    /// All stages enabled, related-keyword cap taken from configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            related_limit: config.related_limit,
            ..Self::default()
        }
    }
}

/// Everything derived for one brief.
#[derive(Debug, Serialize)]
pub struct ResearchBundle {
    pub generated_at: DateTime<Utc>,
    pub main_keyword: String,
    pub all_keywords: Vec<String>,
    pub country: String,
    pub keyword_metric: Outcome<KeywordMetric>,
    pub related_keywords: Vec<KeywordMetric>,
    pub intent_buckets: IntentBuckets,
    pub topic_clusters: TopicClusters,
    pub serp: Outcome<SerpResult>,
    pub competitor_insights: CompetitorInsights,
    pub search_intent: SearchIntentInsight,
    #[serde(skip)]
    pub competitors: Vec<CompetitorDocument>,
}

/// Run every enabled stage for one request.
///
/// The primary metric (followed by related keywords, only after a
/// successful metric) and the SERP lookup run concurrently. Provider
/// failures are logged and degrade the dependent outputs to empty values;
/// a bundle is always returned.
pub async fn run_research(
    request: &ResearchRequest,
    options: &PipelineOptions,
    metrics_client: &KeywordMetricsClient,
    serp_client: &SerpClient,
) -> ResearchBundle {
    let main_keyword = request.primary_keyword().unwrap_or_default();
    let country = request.country.as_str();

    if main_keyword.is_empty() {
        tracing::warn!("no keywords supplied; skipping provider calls");
    } else {
        tracing::info!(
            keyword = main_keyword,
            country,
            competitors = request.competitors.len(),
            "starting keyword research"
        );
    }

    let metrics_chain = async {
        if main_keyword.is_empty() {
            return (no_keyword(), Vec::new());
        }
        let metric = metrics_client.keyword_metric(main_keyword, country).await;
        let related = if options.related_keywords && metric.is_success() {
            metrics_client
                .related_keywords(main_keyword, country, options.related_limit)
                .await
        } else {
            Vec::new()
        };
        (metric, related)
    };

    let serp_lookup = async {
        if main_keyword.is_empty() {
            no_keyword()
        } else if options.serp {
            serp_client.search(main_keyword, country).await
        } else {
            Outcome::NotConfigured
        }
    };

    let ((keyword_metric, related_keywords), serp) = tokio::join!(metrics_chain, serp_lookup);

    log_outcome("keyword_metrics", main_keyword, &keyword_metric);
    log_outcome("serp", main_keyword, &serp);

    // Buckets feed the insight even when they are not reported.
    let classified = classify_keywords(&related_keywords);
    let topic_clusters = if options.topic_clusters {
        extract_clusters(&related_keywords)
    } else {
        TopicClusters::new()
    };
    let competitor_insights = if options.competitor_analysis {
        analyze_competitors(&request.competitors)
    } else {
        CompetitorInsights::default()
    };
    let search_intent = synthesize(keyword_metric.success(), &classified, serp.success());
    let intent_buckets = if options.intent_classification {
        classified
    } else {
        IntentBuckets::default()
    };

    tracing::info!(
        keyword = main_keyword,
        related = related_keywords.len(),
        clusters = topic_clusters.len(),
        gaps = competitor_insights.content_gaps.len(),
        primary_intent = %search_intent.primary_intent,
        "keyword research complete"
    );

    ResearchBundle {
        generated_at: Utc::now(),
        main_keyword: main_keyword.to_string(),
        all_keywords: request.keywords.clone(),
        country: request.country.clone(),
        keyword_metric,
        related_keywords,
        intent_buckets,
        topic_clusters,
        serp,
        competitor_insights,
        search_intent,
        competitors: request.competitors.clone(),
    }
}

fn no_keyword<T>() -> Outcome<T> {
    Outcome::NoData {
        query: String::new(),
    }
}

fn log_outcome<T>(provider: &str, keyword: &str, outcome: &Outcome<T>) {
    match outcome {
        Outcome::Success(_) => {
            tracing::debug!(provider, keyword, "provider returned data");
        }
        Outcome::NotConfigured => {
            tracing::info!(provider, "provider not configured or disabled; skipping");
        }
        Outcome::NoData { query } => {
            tracing::info!(provider, query = %query, "provider returned no data");
        }
        Outcome::Failed(e) => {
            tracing::warn!(
                provider,
                keyword,
                error = %e,
                "provider call failed; continuing with empty data"
            );
        }
    }
}
