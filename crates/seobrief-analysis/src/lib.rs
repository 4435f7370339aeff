//! Keyword-intent and competitor-insight analysis for SEO content briefs.
//!
//! Classifies related keywords by intent, clusters them by shared terms,
//! analyzes competitor documents for emphasized topics, heading patterns and
//! content gaps, and synthesizes a search-intent verdict. [`run_research`]
//! ties the stages to the provider clients; [`render_sections`] turns the
//! result into prompt text.

pub mod clusters;
pub mod competitor;
pub mod insights;
pub mod intent;
pub mod pipeline;
pub mod sections;
pub mod types;

pub use clusters::extract_clusters;
pub use competitor::{analyze_competitors, classify_heading};
pub use insights::synthesize;
pub use intent::{classify_keyword, classify_keywords};
pub use pipeline::{
    parse_keyword_list, run_research, PipelineOptions, ResearchBundle, ResearchRequest,
};
pub use sections::{render_sections, PromptSections};
pub use types::{
    CompetitionLevel, CompetitorDepth, CompetitorInsights, ContentSuggestions, IntentBuckets,
    JourneyStage, SearchIntentInsight, StructuralPattern, TopicCluster, TopicClusters,
};
