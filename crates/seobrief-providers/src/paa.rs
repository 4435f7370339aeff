//! People-Also-Ask intent bucketing.
//!
//! Deliberately simpler than the keyword intent classifier: three buckets,
//! trigger words only, no numeric fallback.

use seobrief_core::Intent;

use crate::types::PaaBuckets;

/// Ordered trigger lists. The first list with a matching word wins.
const PAA_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::Informational,
        &["come", "cosa", "quando", "dove", "perché"],
    ),
    (
        Intent::Commercial,
        &["migliore", "confronto", "differenza", "vs"],
    ),
    (
        Intent::Transactional,
        &["prezzo", "costo", "acquista", "dove comprare"],
    ),
];

/// Bucket one question. Unmatched questions are informational.
#[must_use]
pub fn classify_question(question: &str) -> Intent {
    let lower = question.to_lowercase();
    PAA_RULES
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
        .map_or(Intent::Informational, |(intent, _)| *intent)
}

/// Partition questions into buckets, keeping provider order inside each.
#[must_use]
pub fn bucket_questions(questions: &[String]) -> PaaBuckets {
    let mut buckets = PaaBuckets::default();
    for question in questions {
        let bucket = match classify_question(question) {
            Intent::Commercial => &mut buckets.commercial,
            Intent::Transactional => &mut buckets.transactional,
            Intent::Informational | Intent::Navigational => &mut buckets.informational,
        };
        bucket.push(question.clone());
    }
    buckets
}
