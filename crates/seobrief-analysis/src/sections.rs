//! Renders a [`ResearchBundle`] into the Italian text blocks that are pasted
//! into the brief-generation prompt.

use serde::Serialize;

use seobrief_core::CompetitorDocument;
use seobrief_providers::{KeywordMetric, SerpResult};

use crate::competitor::ranked_topics;
use crate::pipeline::ResearchBundle;
use crate::types::{CompetitorInsights, IntentBuckets, SearchIntentInsight, TopicClusters};

const TOP_KEYWORDS_PER_INTENT: usize = 5;
const TOP_CLUSTERS: usize = 5;
const PAA_PER_INTENT: usize = 3;
const RELATED_SEARCHES: usize = 5;
const SNIPPET_PREVIEW_CHARS: usize = 200;
const TOP_TOPICS: usize = 10;
const GAPS_SHOWN: usize = 5;
const COMPETITOR_CONTENT_CHARS: usize = 3000;

/// Prompt blocks for one brief. A block with nothing to say is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptSections {
    pub keyword_metrics: String,
    pub related_keywords: String,
    pub topic_clusters: String,
    pub serp: String,
    pub search_intent: String,
    pub competitor_analysis: String,
    pub competitors: String,
}

impl PromptSections {
    /// Non-empty blocks joined by blank lines.
    #[must_use]
    pub fn to_prompt_block(&self) -> String {
        [
            &self.keyword_metrics,
            &self.related_keywords,
            &self.topic_clusters,
            &self.serp,
            &self.search_intent,
            &self.competitor_analysis,
            &self.competitors,
        ]
        .into_iter()
        .map(|block| block.trim_end())
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
    }
}

#[must_use]
pub fn render_sections(bundle: &ResearchBundle) -> PromptSections {
    PromptSections {
        keyword_metrics: bundle
            .keyword_metric
            .success()
            .map(|m| render_metric(&bundle.main_keyword, m))
            .unwrap_or_default(),
        related_keywords: render_related(&bundle.intent_buckets),
        topic_clusters: render_clusters(&bundle.topic_clusters),
        serp: bundle.serp.success().map(render_serp).unwrap_or_default(),
        search_intent: render_search_intent(&bundle.search_intent),
        competitor_analysis: render_competitor_analysis(
            &bundle.competitor_insights,
            &bundle.competitors,
        ),
        competitors: render_competitors(&bundle.competitors),
    }
}

fn cpc_hint(cpc: f64) -> &'static str {
    if cpc > 2.0 {
        "Transactional"
    } else if cpc > 1.0 {
        "Commercial"
    } else {
        "Informational"
    }
}

fn competition_hint(competition: f64) -> &'static str {
    if competition > 0.7 {
        "Alto"
    } else if competition > 0.4 {
        "Medio"
    } else {
        "Basso"
    }
}

fn render_metric(keyword: &str, metric: &KeywordMetric) -> String {
    let results = metric
        .results_count
        .map_or_else(|| "N/A".to_string(), |n| n.to_string());
    format!(
        "DATI KEYWORD PRINCIPALE \"{keyword}\":\n\
         - Volume di ricerca mensile: {volume}\n\
         - CPC: €{cpc:.2} (Indicatore intent: {cpc_hint})\n\
         - Competizione: {competition:.2}/1.0 (Livello: {competition_hint})\n\
         - Risultati totali: {results}\n",
        volume = metric.search_volume,
        cpc = metric.cpc,
        cpc_hint = cpc_hint(metric.cpc),
        competition = metric.competition,
        competition_hint = competition_hint(metric.competition),
    )
}

fn render_related(buckets: &IntentBuckets) -> String {
    let mut out = String::new();
    for (intent, keywords) in buckets.iter().filter(|(_, k)| !k.is_empty()) {
        let mut top: Vec<&KeywordMetric> = keywords.iter().collect();
        top.sort_by(|a, b| b.search_volume.cmp(&a.search_volume));
        out.push_str(&format!("KEYWORD {}:\n", intent.label().to_uppercase()));
        for kw in top.into_iter().take(TOP_KEYWORDS_PER_INTENT) {
            out.push_str(&format!(
                "- {} (Vol: {}, Comp: {:.2})\n",
                kw.keyword, kw.search_volume, kw.competition
            ));
        }
        out.push('\n');
    }
    out
}

fn render_clusters(clusters: &TopicClusters) -> String {
    if clusters.is_empty() {
        return String::new();
    }
    let mut sorted: Vec<_> = clusters.values().collect();
    sorted.sort_by(|a, b| b.total_volume.cmp(&a.total_volume));

    let lines: String = sorted
        .into_iter()
        .take(TOP_CLUSTERS)
        .map(|cluster| {
            format!(
                "- Tema '{}': {} vol. totale, {} keyword\n",
                cluster.cluster_key,
                cluster.total_volume,
                cluster.keywords.len()
            )
        })
        .collect();
    format!("CLUSTER TEMATICI:\n{lines}")
}

fn bullet_list<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items.into_iter().map(|item| format!("- {item}\n")).collect()
}

fn render_serp(serp: &SerpResult) -> String {
    let mut out = String::new();

    if !serp.people_also_ask.is_empty() {
        out.push_str("PEOPLE ALSO ASK (CLASSIFICATE PER INTENT):\n");
        for (intent, questions) in serp.paa_intents.iter() {
            out.push_str(&format!(
                "\n{}:\n{}",
                intent.label().to_uppercase(),
                bullet_list(questions.iter().take(PAA_PER_INTENT))
            ));
        }
    }

    if !serp.related_searches.is_empty() {
        out.push_str("\nRICERCHE CORRELATE:\n");
        out.push_str(&bullet_list(
            serp.related_searches.iter().take(RELATED_SEARCHES),
        ));
    }

    if let Some(snippet) = &serp.featured_snippet {
        let a = &snippet.analysis;
        let preview: String = snippet.snippet.chars().take(SNIPPET_PREVIEW_CHARS).collect();
        out.push_str(&format!(
            "\nFEATURED SNIPPET ATTUALE - ANALISI STRUTTURALE:\n\
             Titolo: {title}\n\
             Lunghezza: {words} parole\n\
             Tipo struttura: {structure}\n\
             Contiene liste: {lists}\n\
             Contiene numeri: {numbers}\n\
             Snippet: {preview}...\n",
            title = snippet.title,
            words = a.word_count,
            structure = a.structure_type.label(),
            lists = si_no(a.has_list),
            numbers = si_no(a.has_numbers),
        ));
    }

    out
}

fn si_no(value: bool) -> &'static str {
    if value {
        "Sì"
    } else {
        "No"
    }
}

fn render_search_intent(insight: &SearchIntentInsight) -> String {
    let distribution = insight
        .intent_distribution
        .iter()
        .map(|(intent, share)| format!("{intent} {:.0}%", share * 100.0))
        .collect::<Vec<_>>()
        .join(", ");

    let s = &insight.content_suggestions;
    let suggested: Vec<&str> = [
        (s.faq_needed, "FAQ"),
        (s.comparison_needed, "confronto"),
        (s.pricing_needed, "prezzi"),
        (s.how_to_needed, "guida pratica"),
    ]
    .into_iter()
    .filter_map(|(needed, label)| needed.then_some(label))
    .collect();

    let mut out = format!(
        "ANALISI INTENTO DI RICERCA:\n\
         - Intent principale: {}\n\
         - Fase user journey: {}\n\
         - Livello competizione: {}\n",
        insight.primary_intent,
        insight.user_journey_stage.label(),
        insight.competition_level.label()
    );
    if !distribution.is_empty() {
        out.push_str(&format!("- Distribuzione intent: {distribution}\n"));
    }
    if !suggested.is_empty() {
        out.push_str(&format!("- Sezioni consigliate: {}\n", suggested.join(", ")));
    }
    out
}

fn render_competitor_analysis(
    insights: &CompetitorInsights,
    competitors: &[CompetitorDocument],
) -> String {
    if competitors.is_empty() {
        return String::new();
    }

    let topics = ranked_topics(insights)
        .into_iter()
        .take(TOP_TOPICS)
        .map(|(term, _)| term)
        .collect::<Vec<_>>()
        .join(", ");
    let patterns = insights
        .structural_patterns
        .keys()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ");
    let gaps = insights
        .content_gaps
        .iter()
        .take(GAPS_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let total_words: usize = competitors.iter().map(|c| c.word_count).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_words = total_words as f64 / competitors.len() as f64;

    format!(
        "ANALISI COMPETITOR:\n\
         - Topic più comuni: {topics}\n\
         - Pattern strutturali dominanti: {patterns}\n\
         - Gap di contenuto identificati: {gaps}\n\
         - Profondità media contenuto: {avg_words:.0} parole\n"
    )
}

fn render_competitor(comp: &CompetitorDocument) -> String {
    let mut out = format!(
        "--- COMPETITOR {} ---\nURL: {}\n",
        comp.identifier, comp.url
    );
    if comp.has_custom_title() {
        out.push_str(&format!("Titolo: {}\n", comp.title));
    }
    if !comp.meta_description.is_empty() {
        out.push_str(&format!("Meta Description: {}\n", comp.meta_description));
    }
    if !comp.headings.is_empty() {
        out.push_str(&format!(
            "Struttura titoli identificata:\n{}\n",
            comp.headings.join("\n")
        ));
    }
    let content: String = comp.content.chars().take(COMPETITOR_CONTENT_CHARS).collect();
    out.push_str(&format!(
        "Numero parole: {}\nContenuto: {content}...\n\n",
        comp.word_count
    ));
    out
}

fn render_competitors(competitors: &[CompetitorDocument]) -> String {
    competitors.iter().map(render_competitor).collect()
}
