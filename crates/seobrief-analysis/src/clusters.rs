//! Groups related keywords by shared significant terms.

use std::collections::BTreeMap;

use seobrief_providers::KeywordMetric;

use crate::types::{TopicCluster, TopicClusters};

/// Tokens never used as a cluster key.
pub(crate) const CLUSTER_STOPWORDS: &[&str] = &[
    "come", "cosa", "quando", "dove", "perché", "migliore", "migliori",
];

/// Tokens of up to this many characters are ignored.
const MIN_TERM_CHARS: usize = 3;

fn is_cluster_term(token: &str) -> bool {
    token.chars().count() > MIN_TERM_CHARS && !CLUSTER_STOPWORDS.contains(&token)
}

/// Build topic clusters from related keywords.
///
/// Every whitespace token longer than three characters and not a stopword
/// collects the keywords containing it. A keyword repeating a token is
/// credited once. Only terms shared by at least two keywords become clusters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn extract_clusters(keywords: &[KeywordMetric]) -> TopicClusters {
    let mut by_term: BTreeMap<String, Vec<&KeywordMetric>> = BTreeMap::new();

    for metric in keywords {
        let lowered = metric.keyword.to_lowercase();
        let mut seen: Vec<&str> = Vec::new();
        for token in lowered.split_whitespace().filter(|t| is_cluster_term(t)) {
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);
            by_term.entry(token.to_string()).or_default().push(metric);
        }
    }

    by_term
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(term, members)| {
            let total_volume = members.iter().map(|m| m.search_volume).sum();
            let avg_competition =
                members.iter().map(|m| m.competition).sum::<f64>() / members.len() as f64;
            let cluster = TopicCluster {
                cluster_key: term.clone(),
                keywords: members.into_iter().cloned().collect(),
                total_volume,
                avg_competition,
            };
            (term, cluster)
        })
        .collect()
}
