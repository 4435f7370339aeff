//! Featured snippet structure analysis.

use crate::types::{FeaturedSnippetAnalysis, StructureType};

/// Openings that mark a snippet as a definition ("È ...", "Il mutuo ...").
const DEFINITION_OPENINGS: &[&str] = &["è", "sono", "il", "la", "lo", "una", "un"];

/// Derive structural traits from a snippet's text.
///
/// A bullet or hyphen makes the snippet a list. Digits alongside a period
/// (numbered steps) also count as list content but keep the paragraph
/// structure type.
#[must_use]
pub fn analyze_snippet(text: &str) -> FeaturedSnippetAnalysis {
    let has_bullets = text.contains('•') || text.contains('-');
    let has_numbers = text.chars().any(|c| c.is_ascii_digit());
    let lower = text.to_lowercase();

    FeaturedSnippetAnalysis {
        word_count: text.split_whitespace().count(),
        has_list: has_bullets || (has_numbers && text.contains('.')),
        has_numbers,
        structure_type: if has_bullets {
            StructureType::List
        } else {
            StructureType::Paragraph
        },
        starts_with_definition: DEFINITION_OPENINGS
            .iter()
            .any(|opening| lower.starts_with(opening)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitional_paragraph() {
        let analysis = analyze_snippet("Il mutuo è un prestito a medio-lungo termine");
        assert_eq!(analysis.word_count, 8);
        assert!(analysis.starts_with_definition);
        // the hyphen in "medio-lungo" counts as a list marker
        assert_eq!(analysis.structure_type, StructureType::List);
    }

    #[test]
    fn plain_paragraph() {
        let analysis = analyze_snippet("Per ottenere un mutuo serve una busta paga");
        assert!(!analysis.has_list);
        assert!(!analysis.has_numbers);
        assert!(!analysis.starts_with_definition);
        assert_eq!(analysis.structure_type, StructureType::Paragraph);
    }

    #[test]
    fn numbered_steps_are_list_content_in_a_paragraph() {
        let analysis = analyze_snippet("Passaggi: 1. richiedi la perizia 2. firma");
        assert!(analysis.has_numbers);
        assert!(analysis.has_list);
        assert_eq!(analysis.structure_type, StructureType::Paragraph);
    }

    #[test]
    fn fractions_and_numerals_are_not_digits() {
        let analysis = analyze_snippet("Aggiungi ½ tazza. Capitolo Ⅻ.");
        assert!(!analysis.has_numbers);
        assert!(!analysis.has_list);
    }

    #[test]
    fn bulleted_snippet() {
        let analysis = analyze_snippet("• documenti\n• reddito\n• garanzie");
        assert!(analysis.has_list);
        assert_eq!(analysis.structure_type, StructureType::List);
    }

    #[test]
    fn empty_snippet() {
        let analysis = analyze_snippet("");
        assert_eq!(analysis.word_count, 0);
        assert!(!analysis.has_list);
        assert!(!analysis.starts_with_definition);
    }
}
