//! Competitor content analysis: emphasized topics, heading patterns, depth
//! metrics and content gaps.

use std::collections::BTreeSet;

use seobrief_core::CompetitorDocument;

use crate::types::{CompetitorDepth, CompetitorInsights, StructuralPattern};

/// Words that mark a nearby term as emphasized.
pub(crate) const EMPHASIS_TERMS: &[&str] = &[
    "importante",
    "fondamentale",
    "essenziale",
    "principale",
    "primo",
    "migliore",
];

/// Words on each side of a candidate that are searched for emphasis terms.
const EMPHASIS_WINDOW: usize = 3;

/// Heading triggers in priority order; the first contained trigger wins.
pub(crate) const HEADING_RULES: &[(&str, StructuralPattern)] = &[
    ("come", StructuralPattern::HowTo),
    ("cosa", StructuralPattern::WhatIs),
    ("perché", StructuralPattern::Why),
    ("migliori", StructuralPattern::BestList),
    ("top", StructuralPattern::BestList),
    ("confronto", StructuralPattern::Comparison),
    ("vs", StructuralPattern::Comparison),
];

pub const MAX_CONTENT_GAPS: usize = 10;

/// Derive [`CompetitorInsights`] from competitor documents. An empty slice
/// gives empty insights.
#[must_use]
pub fn analyze_competitors(documents: &[CompetitorDocument]) -> CompetitorInsights {
    let lowered: Vec<String> = documents.iter().map(|d| d.content.to_lowercase()).collect();

    let mut insights = CompetitorInsights::default();

    for (document, content) in documents.iter().zip(&lowered) {
        for topic in emphasized_topics(content) {
            *insights.common_topics.entry(topic.to_string()).or_default() += 1;
        }
        let patterns = document
            .headings
            .iter()
            .flat_map(|heading| heading.lines())
            .filter(|line| !line.trim().is_empty())
            .filter_map(classify_heading);
        for pattern in patterns {
            *insights.structural_patterns.entry(pattern).or_default() += 1;
        }
        insights
            .content_depth_analysis
            .insert(document.identifier, depth_of(document, content));
    }

    insights.content_gaps = content_gaps(&lowered);
    insights
}

/// Words longer than four characters with an emphasis term among the three
/// words before or after them. Matching is on exact lowercased tokens.
fn emphasized_topics(content: &str) -> Vec<&str> {
    let words: Vec<&str> = content.split_whitespace().collect();
    words
        .iter()
        .enumerate()
        .filter(|(_, word)| word.chars().count() > 4)
        .filter(|&(i, _)| {
            let before = &words[i.saturating_sub(EMPHASIS_WINDOW)..i];
            let after = &words[i + 1..(i + 1 + EMPHASIS_WINDOW).min(words.len())];
            before
                .iter()
                .chain(after)
                .any(|ctx| EMPHASIS_TERMS.contains(ctx))
        })
        .map(|(_, word)| *word)
        .collect()
}

/// Classify one heading line. A leading `"H2:"`-style level prefix is
/// stripped.
#[must_use]
pub fn classify_heading(line: &str) -> Option<StructuralPattern> {
    let text = match line.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => line.trim(),
    };
    let text = text.to_lowercase();
    HEADING_RULES
        .iter()
        .find(|(trigger, _)| text.contains(trigger))
        .map(|&(_, pattern)| pattern)
}

#[allow(clippy::cast_precision_loss)]
fn depth_of(document: &CompetitorDocument, lowered: &str) -> CompetitorDepth {
    let paragraph_count = document.paragraphs.len();
    let avg_paragraph_words = if paragraph_count == 0 {
        0.0
    } else {
        let words: usize = document
            .paragraphs
            .iter()
            .map(|p| p.split_whitespace().count())
            .sum();
        words as f64 / paragraph_count as f64
    };

    CompetitorDepth {
        paragraph_count,
        avg_paragraph_words,
        word_count: document.word_count,
        has_lists: lowered.contains("lista")
            || lowered.contains("elenco")
            || document.content.contains('•'),
        has_examples: lowered.contains("esempio"),
        technical_depth: ["tecnic", "specific", "dettagli"]
            .iter()
            .map(|term| lowered.matches(term).count())
            .sum(),
    }
}

/// Tokens longer than six characters contained in exactly one document.
///
/// Candidates are all distinct tokens longer than five characters. Coverage
/// is counted by substring containment, so a token that also occurs inside a
/// longer word elsewhere is not a gap.
fn content_gaps(lowered: &[String]) -> Vec<String> {
    let candidates: BTreeSet<&str> = lowered
        .iter()
        .flat_map(|content| content.split_whitespace())
        .filter(|token| token.chars().count() > 5)
        .collect();

    candidates
        .into_iter()
        .filter(|token| token.chars().count() > 6)
        .filter(|token| lowered.iter().filter(|c| c.contains(token)).count() == 1)
        .take(MAX_CONTENT_GAPS)
        .map(str::to_string)
        .collect()
}

/// Emphasized topics ordered by descending count, ties broken by term.
#[must_use]
pub fn ranked_topics(insights: &CompetitorInsights) -> Vec<(&str, usize)> {
    let mut topics: Vec<(&str, usize)> = insights
        .common_topics
        .iter()
        .map(|(term, count)| (term.as_str(), *count))
        .collect();
    topics.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(identifier: u32, content: &str) -> CompetitorDocument {
        CompetitorDocument::from_manual_entry(identifier, "https://example.it", None, "", content)
    }

    fn doc_with_headings(identifier: u32, headings: &[&str]) -> CompetitorDocument {
        let mut d = doc(identifier, "testo");
        d.headings = headings.iter().map(|h| (*h).to_string()).collect();
        d
    }

    #[test]
    fn empty_input_gives_empty_insights() {
        assert_eq!(analyze_competitors(&[]), CompetitorInsights::default());
    }

    #[test]
    fn emphasis_window_marks_nearby_words() {
        let d = doc(1, "il tasso fisso è importante per chi cerca stabilità");
        let insights = analyze_competitors(&[d]);
        // within three words of "importante": tasso, fisso, cerca
        assert_eq!(insights.common_topics.get("tasso"), Some(&1));
        assert_eq!(insights.common_topics.get("fisso"), Some(&1));
        assert_eq!(insights.common_topics.get("cerca"), Some(&1));
        // four words away
        assert!(!insights.common_topics.contains_key("stabilità"));
        // the emphasis term itself only counts if another term is near it
        assert!(!insights.common_topics.contains_key("importante"));
    }

    #[test]
    fn emphasis_counts_accumulate_across_documents() {
        let a = doc(1, "scelta fondamentale");
        let b = doc(2, "una scelta importante");
        let insights = analyze_competitors(&[a, b]);
        assert_eq!(insights.common_topics.get("scelta"), Some(&2));
    }

    #[test]
    fn emphasis_terms_must_match_exactly() {
        let d = doc(1, "garanzia importante, sempre");
        let insights = analyze_competitors(&[d]);
        assert!(!insights.common_topics.contains_key("garanzia"));
    }

    #[test]
    fn heading_rules_follow_priority() {
        assert_eq!(classify_heading("H2: Come scegliere"), Some(StructuralPattern::HowTo));
        assert_eq!(classify_heading("Cosa sapere"), Some(StructuralPattern::WhatIs));
        assert_eq!(classify_heading("Perché conviene"), Some(StructuralPattern::Why));
        assert_eq!(classify_heading("I migliori mutui"), Some(StructuralPattern::BestList));
        assert_eq!(classify_heading("Top 5 banche"), Some(StructuralPattern::BestList));
        assert_eq!(classify_heading("Fisso vs variabile"), Some(StructuralPattern::Comparison));
        // "come" wins over "migliori"
        assert_eq!(
            classify_heading("Come trovare i migliori tassi"),
            Some(StructuralPattern::HowTo)
        );
        assert_eq!(classify_heading("Requisiti del mutuo"), None);
    }

    #[test]
    fn level_prefix_is_stripped_before_matching() {
        // only the text after the level prefix is classified
        assert_eq!(classify_heading("Top: requisiti"), None);
    }

    #[test]
    fn structural_patterns_are_tallied_per_line() {
        let d = doc_with_headings(1, &["H2: Come funziona\nH2: Cosa serve", "", "Confronto tassi"]);
        let e = doc_with_headings(2, &["Come richiederlo"]);
        let insights = analyze_competitors(&[d, e]);

        assert_eq!(insights.structural_patterns.get(&StructuralPattern::HowTo), Some(&2));
        assert_eq!(insights.structural_patterns.get(&StructuralPattern::WhatIs), Some(&1));
        assert_eq!(
            insights.structural_patterns.get(&StructuralPattern::Comparison),
            Some(&1)
        );
        assert!(!insights.structural_patterns.contains_key(&StructuralPattern::Why));
    }

    #[test]
    fn depth_metrics_are_keyed_by_identifier() {
        let mut d = doc(
            7,
            "Ecco un elenco • con dettagli tecnici e specifiche. Per esempio i dettagli.",
        );
        d.paragraphs = vec!["uno due tre".to_string(), "quattro".to_string()];
        let insights = analyze_competitors(&[d]);

        let depth = &insights.content_depth_analysis[&7];
        assert_eq!(depth.paragraph_count, 2);
        assert!((depth.avg_paragraph_words - 2.0).abs() < 1e-9);
        assert!(depth.has_lists);
        assert!(depth.has_examples);
        // dettagli x2, tecnic x1, specific x1
        assert_eq!(depth.technical_depth, 4);
    }

    #[test]
    fn depth_without_paragraphs_averages_zero() {
        let mut d = doc(1, "testo semplice");
        d.paragraphs.clear();
        let insights = analyze_competitors(&[d]);
        let depth = &insights.content_depth_analysis[&1];
        assert_eq!(depth.paragraph_count, 0);
        assert!(depth.avg_paragraph_words.abs() < f64::EPSILON);
        assert!(!depth.has_lists);
        assert!(!depth.has_examples);
        assert_eq!(depth.technical_depth, 0);
    }

    #[test]
    fn term_in_one_document_is_a_gap() {
        let docs = vec![
            doc(1, "mutuo casa tasso"),
            doc(2, "mutuo casa sostenibilità"),
            doc(3, "mutuo casa tasso"),
        ];
        let insights = analyze_competitors(&docs);
        assert_eq!(insights.content_gaps, vec!["sostenibilità"]);
    }

    #[test]
    fn gaps_use_substring_coverage() {
        // "finanzia" is inside "finanziamento" in the second document
        let docs = vec![doc(1, "finanzia"), doc(2, "finanziamento")];
        let insights = analyze_competitors(&docs);
        assert_eq!(insights.content_gaps, vec!["finanziamento"]);
    }

    #[test]
    fn gaps_are_capped_and_well_formed() {
        let first: Vec<String> = (0..15).map(|i| format!("argomento{i:02}")).collect();
        let docs = vec![doc(1, &first.join(" ")), doc(2, "breve testo comune")];
        let lowered: Vec<String> = docs.iter().map(|d| d.content.to_lowercase()).collect();

        let insights = analyze_competitors(&docs);
        assert_eq!(insights.content_gaps.len(), MAX_CONTENT_GAPS);
        for gap in &insights.content_gaps {
            assert!(gap.chars().count() > 6);
            assert_eq!(lowered.iter().filter(|c| c.contains(gap.as_str())).count(), 1);
        }
    }

    #[test]
    fn analysis_is_idempotent() {
        let docs = vec![
            doc(1, "Una guida importante sul mutuo con esempio pratico"),
            doc(2, "Elenco fondamentale di documenti necessari"),
        ];
        assert_eq!(analyze_competitors(&docs), analyze_competitors(&docs));
    }

    #[test]
    fn ranked_topics_orders_by_count() {
        let mut insights = CompetitorInsights::default();
        insights.common_topics.insert("tasso".into(), 1);
        insights.common_topics.insert("mutuo".into(), 3);
        insights.common_topics.insert("banca".into(), 1);
        let ranked = ranked_topics(&insights);
        assert_eq!(ranked, vec![("mutuo", 3), ("banca", 1), ("tasso", 1)]);
    }
}
