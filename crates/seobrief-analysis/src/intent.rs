//! Rule-based search-intent classifier for Italian keywords.

use seobrief_core::Intent;
use seobrief_providers::KeywordMetric;

use crate::types::IntentBuckets;

/// Trigger substrings per intent, checked in table order. The first intent
/// with any trigger contained in the lowercased keyword wins.
pub(crate) const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::Informational,
        &[
            "come",
            "cosa",
            "quando",
            "dove",
            "perché",
            "guida",
            "tutorial",
            "cos è",
            "significa",
        ],
    ),
    (
        Intent::Transactional,
        &[
            "acquista",
            "compra",
            "prezzo",
            "costo",
            "offerta",
            "sconto",
            "migliore",
            "recensioni",
        ],
    ),
    (
        Intent::Commercial,
        &[
            "confronto",
            "vs",
            "alternative",
            "migliori",
            "top",
            "classifica",
            "recensione",
        ],
    ),
    (
        Intent::Navigational,
        &["sito", "ufficiale", "login", "accesso", "brand"],
    ),
];

/// Intent for a keyword with no trigger match, decided by its CPC and
/// competition.
fn fallback_intent(cpc: f64, competition: f64) -> Intent {
    if cpc > 1.0 && competition > 0.5 {
        Intent::Transactional
    } else if competition > 0.3 {
        Intent::Commercial
    } else {
        Intent::Informational
    }
}

/// Classify a single keyword.
#[must_use]
pub fn classify_keyword(metric: &KeywordMetric) -> Intent {
    let keyword = metric.keyword.to_lowercase();
    INTENT_TRIGGERS
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| keyword.contains(t)))
        .map_or_else(
            || fallback_intent(metric.cpc, metric.competition),
            |&(intent, _)| intent,
        )
}

/// Partition keywords into intent buckets, preserving input order inside
/// each bucket.
#[must_use]
pub fn classify_keywords(keywords: &[KeywordMetric]) -> IntentBuckets {
    let mut buckets = IntentBuckets::default();
    for metric in keywords {
        buckets.push(classify_keyword(metric), metric.clone());
    }
    buckets
}
