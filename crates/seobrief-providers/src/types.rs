//! Data returned by the keyword-metrics and SERP providers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use seobrief_core::Intent;

/// Volume, cost and competition for one keyword.
///
/// Numeric fields are never absent: anything the provider sent that is not a
/// well-formed number decodes to `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    pub keyword: String,
    pub search_volume: u64,
    /// Cost per click in the provider's currency.
    pub cpc: f64,
    /// Paid-search competition in `[0, 1]`.
    pub competition: f64,
    /// Number of indexed results. Only reported for the primary keyword.
    pub results_count: Option<u64>,
    /// Raw trend column, passed through untouched.
    #[serde(default)]
    pub trend: String,
}

impl KeywordMetric {
    #[must_use]
    pub fn new(keyword: &str, search_volume: u64, cpc: f64, competition: f64) -> Self {
        Self {
            keyword: keyword.to_string(),
            search_volume,
            cpc,
            competition,
            results_count: None,
            trend: String::new(),
        }
    }
}

/// People-Also-Ask questions partitioned by intent. Every question lands in
/// exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaaBuckets {
    pub informational: Vec<String>,
    pub commercial: Vec<String>,
    pub transactional: Vec<String>,
}

impl PaaBuckets {
    /// Questions in the given bucket. PAA has no navigational bucket.
    #[must_use]
    pub fn get(&self, intent: Intent) -> &[String] {
        match intent {
            Intent::Informational => &self.informational,
            Intent::Commercial => &self.commercial,
            Intent::Transactional => &self.transactional,
            Intent::Navigational => &[],
        }
    }

    /// Non-empty buckets in informational, commercial, transactional order.
    pub fn iter(&self) -> impl Iterator<Item = (Intent, &[String])> {
        [
            (Intent::Informational, self.informational.as_slice()),
            (Intent::Commercial, self.commercial.as_slice()),
            (Intent::Transactional, self.transactional.as_slice()),
        ]
        .into_iter()
        .filter(|(_, questions)| !questions.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.informational.len() + self.commercial.len() + self.transactional.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    List,
    Paragraph,
}

impl StructureType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StructureType::List => "list",
            StructureType::Paragraph => "paragraph",
        }
    }
}

/// Structural traits of a featured snippet's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedSnippetAnalysis {
    pub word_count: usize,
    pub has_list: bool,
    pub has_numbers: bool,
    pub structure_type: StructureType,
    pub starts_with_definition: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedSnippet {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub analysis: FeaturedSnippetAnalysis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    pub position: u32,
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Host of `link`, empty when the link does not parse.
    pub domain: String,
}

/// Everything extracted from one search-results page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerpResult {
    pub query: String,
    /// PAA questions in provider order.
    pub people_also_ask: Vec<String>,
    pub paa_intents: PaaBuckets,
    pub related_searches: Vec<String>,
    pub featured_snippet: Option<FeaturedSnippet>,
    /// At most [`MAX_ORGANIC_RESULTS`](crate::serp::MAX_ORGANIC_RESULTS).
    pub organic_results: Vec<OrganicResult>,
    /// Organic-result host to number of appearances.
    pub domain_counts: BTreeMap<String, usize>,
    pub total_results: u64,
}
