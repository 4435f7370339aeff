//! Combines the primary keyword metric, related-keyword buckets and PAA
//! questions into one search-intent verdict.

use std::collections::BTreeMap;

use seobrief_core::Intent;
use seobrief_providers::{KeywordMetric, SerpResult};

use crate::types::{
    CompetitionLevel, ContentSuggestions, IntentBuckets, JourneyStage, SearchIntentInsight,
};

/// Intent and journey stage implied by the primary keyword's CPC and
/// competition.
#[must_use]
pub fn intent_from_metric(cpc: f64, competition: f64) -> (Intent, JourneyStage) {
    if cpc > 2.0 && competition > 0.7 {
        (Intent::Transactional, JourneyStage::Decision)
    } else if cpc > 1.0 && competition > 0.4 {
        (Intent::Commercial, JourneyStage::Consideration)
    } else {
        (Intent::Informational, JourneyStage::Awareness)
    }
}

#[must_use]
pub fn competition_level(competition: f64) -> CompetitionLevel {
    if competition > 0.8 {
        CompetitionLevel::High
    } else if competition > 0.4 {
        CompetitionLevel::Medium
    } else {
        CompetitionLevel::Low
    }
}

/// Share of keywords per non-empty bucket. Empty when there are no keywords.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn intent_distribution(buckets: &IntentBuckets) -> BTreeMap<Intent, f64> {
    let total = buckets.len();
    if total == 0 {
        return BTreeMap::new();
    }
    buckets
        .iter()
        .filter(|(_, keywords)| !keywords.is_empty())
        .map(|(intent, keywords)| (intent, keywords.len() as f64 / total as f64))
        .collect()
}

#[must_use]
pub fn content_suggestions(serp: &SerpResult) -> ContentSuggestions {
    let paa = &serp.paa_intents;
    ContentSuggestions {
        faq_needed: paa.informational.len() > 2,
        comparison_needed: paa.commercial.len() > 1,
        pricing_needed: paa.transactional.len() > 1,
        how_to_needed: serp
            .people_also_ask
            .iter()
            .any(|q| q.to_lowercase().contains("come")),
    }
}

/// Build the [`SearchIntentInsight`] for a brief.
///
/// Without a primary metric the verdict stays informational, awareness,
/// medium competition. Without SERP data no section is suggested.
#[must_use]
pub fn synthesize(
    metric: Option<&KeywordMetric>,
    buckets: &IntentBuckets,
    serp: Option<&SerpResult>,
) -> SearchIntentInsight {
    let mut insight = SearchIntentInsight::default();

    if let Some(metric) = metric {
        let (intent, stage) = intent_from_metric(metric.cpc, metric.competition);
        insight.primary_intent = intent;
        insight.user_journey_stage = stage;
        insight.competition_level = competition_level(metric.competition);
    }

    insight.intent_distribution = intent_distribution(buckets);

    if let Some(serp) = serp {
        insight.content_suggestions = content_suggestions(serp);
    }

    insight
}
