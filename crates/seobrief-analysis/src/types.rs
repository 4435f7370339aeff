//! Derived signals produced by the analysis stages.
//!
//! Everything here is request-scoped: built fresh for one brief and never
//! updated in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use seobrief_core::Intent;
use seobrief_providers::KeywordMetric;

/// Related keywords partitioned by intent. Every classified keyword sits in
/// exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentBuckets {
    pub informational: Vec<KeywordMetric>,
    pub navigational: Vec<KeywordMetric>,
    pub transactional: Vec<KeywordMetric>,
    pub commercial: Vec<KeywordMetric>,
}

impl IntentBuckets {
    #[must_use]
    pub fn get(&self, intent: Intent) -> &[KeywordMetric] {
        match intent {
            Intent::Informational => &self.informational,
            Intent::Navigational => &self.navigational,
            Intent::Transactional => &self.transactional,
            Intent::Commercial => &self.commercial,
        }
    }

    pub fn push(&mut self, intent: Intent, keyword: KeywordMetric) {
        let bucket = match intent {
            Intent::Informational => &mut self.informational,
            Intent::Navigational => &mut self.navigational,
            Intent::Transactional => &mut self.transactional,
            Intent::Commercial => &mut self.commercial,
        };
        bucket.push(keyword);
    }

    /// All four buckets, including empty ones, in [`Intent::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Intent, &[KeywordMetric])> {
        Intent::ALL.into_iter().map(move |intent| (intent, self.get(intent)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, keywords)| keywords.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keywords sharing one significant term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCluster {
    pub cluster_key: String,
    /// Always at least two entries.
    pub keywords: Vec<KeywordMetric>,
    pub total_volume: u64,
    pub avg_competition: f64,
}

/// Clusters keyed by their term.
pub type TopicClusters = BTreeMap<String, TopicCluster>;

/// Heading shape detected in competitor outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralPattern {
    HowTo,
    WhatIs,
    Why,
    BestList,
    Comparison,
}

impl StructuralPattern {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StructuralPattern::HowTo => "how_to",
            StructuralPattern::WhatIs => "what_is",
            StructuralPattern::Why => "why",
            StructuralPattern::BestList => "best_list",
            StructuralPattern::Comparison => "comparison",
        }
    }
}

/// Depth metrics for one competitor document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorDepth {
    pub paragraph_count: usize,
    /// Mean words per paragraph, `0.0` without paragraphs.
    pub avg_paragraph_words: f64,
    pub word_count: usize,
    pub has_lists: bool,
    pub has_examples: bool,
    pub technical_depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorInsights {
    /// Emphasized term to number of emphasized occurrences.
    pub common_topics: BTreeMap<String, usize>,
    pub structural_patterns: BTreeMap<StructuralPattern, usize>,
    /// Up to ten terms found in exactly one competitor. Order is not
    /// meaningful.
    pub content_gaps: Vec<String>,
    /// Keyed by competitor identifier.
    pub content_depth_analysis: BTreeMap<u32, CompetitorDepth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyStage {
    Awareness,
    Consideration,
    Decision,
}

impl JourneyStage {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            JourneyStage::Awareness => "awareness",
            JourneyStage::Consideration => "consideration",
            JourneyStage::Decision => "decision",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompetitionLevel::Low => "low",
            CompetitionLevel::Medium => "medium",
            CompetitionLevel::High => "high",
        }
    }
}

/// Sections the brief should contain, inferred from PAA questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSuggestions {
    pub faq_needed: bool,
    pub comparison_needed: bool,
    pub pricing_needed: bool,
    pub how_to_needed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntentInsight {
    pub primary_intent: Intent,
    pub user_journey_stage: JourneyStage,
    pub competition_level: CompetitionLevel,
    /// Share of related keywords per non-empty intent bucket.
    pub intent_distribution: BTreeMap<Intent, f64>,
    pub content_suggestions: ContentSuggestions,
}

impl Default for SearchIntentInsight {
    fn default() -> Self {
        Self {
            primary_intent: Intent::Informational,
            user_journey_stage: JourneyStage::Awareness,
            competition_level: CompetitionLevel::Medium,
            intent_distribution: BTreeMap::new(),
            content_suggestions: ContentSuggestions::default(),
        }
    }
}
