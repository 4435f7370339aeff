//! Competitor documents: the normalized form every analyzed page takes,
//! whether it was scraped or pasted in by hand.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Paragraphs kept per document.
pub const MAX_PARAGRAPHS: usize = 10;
/// Heading candidates kept per manually entered document.
pub const MAX_HEADINGS: usize = 15;

const HEADING_PREFIXES: &[&str] = &["1.", "2.", "3.", "4.", "5.", "•", "-"];

/// One competitor page, normalized and read-only for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorDocument {
    /// 1-based position in the competitor list.
    pub identifier: u32,
    pub url: String,
    pub title: String,
    pub meta_description: String,
    /// Heading lines, optionally prefixed with a level (`H2: ...`).
    pub headings: Vec<String>,
    pub content: String,
    /// At most [`MAX_PARAGRAPHS`] entries.
    pub paragraphs: Vec<String>,
    pub word_count: usize,
}

impl CompetitorDocument {
    /// Normalize pasted page text into a document.
    ///
    /// Headings are guessed line by line (see [`looks_like_heading`]) and
    /// paragraphs are the blank-line separated blocks of `content`.
    #[must_use]
    pub fn from_manual_entry(
        identifier: u32,
        url: &str,
        title: Option<&str>,
        meta_description: &str,
        content: &str,
    ) -> Self {
        let headings = content
            .split('\n')
            .map(str::trim)
            .filter(|line| looks_like_heading(line))
            .take(MAX_HEADINGS)
            .map(str::to_string)
            .collect();

        let paragraphs = content
            .split("\n\n")
            .take(MAX_PARAGRAPHS)
            .map(str::to_string)
            .collect();

        Self {
            identifier,
            url: url.to_string(),
            title: resolve_title(identifier, title),
            meta_description: meta_description.to_string(),
            headings,
            content: content.to_string(),
            paragraphs,
            word_count: content.split_whitespace().count(),
        }
    }

    /// Placeholder title used when none was supplied.
    #[must_use]
    pub fn default_title(identifier: u32) -> String {
        format!("Competitor {identifier}")
    }

    /// Whether the title is a real page title rather than the placeholder.
    #[must_use]
    pub fn has_custom_title(&self) -> bool {
        self.title != Self::default_title(self.identifier)
    }
}

fn resolve_title(identifier: u32, title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => CompetitorDocument::default_title(identifier),
    }
}

/// Heuristic for heading lines in pasted text: shouting lines, short
/// numbered/bulleted lines, and short lines ending in `:` or `?`.
#[must_use]
pub fn looks_like_heading(line: &str) -> bool {
    let len = line.chars().count();

    let mut cased = line.chars().filter(|c| c.is_uppercase() || c.is_lowercase());
    let has_cased = cased.clone().next().is_some();
    let all_upper = has_cased && cased.all(char::is_uppercase);

    (all_upper && len > 10)
        || (HEADING_PREFIXES.iter().any(|p| line.starts_with(p)) && len > 15)
        || (len < 100 && (line.ends_with(':') || line.ends_with('?')) && len > 10)
}

/// One entry of a competitors file.
///
/// Entries that carry `headings` or `paragraphs` are treated as already
/// scraped; the rest go through [`CompetitorDocument::from_manual_entry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitorEntry {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub headings: Option<Vec<String>>,
    #[serde(default)]
    pub paragraphs: Option<Vec<String>>,
}

impl CompetitorEntry {
    fn into_document(self, identifier: u32) -> CompetitorDocument {
        if self.headings.is_none() && self.paragraphs.is_none() {
            return CompetitorDocument::from_manual_entry(
                identifier,
                &self.url,
                self.title.as_deref(),
                &self.meta_description,
                &self.content,
            );
        }

        let mut paragraphs = self.paragraphs.unwrap_or_default();
        paragraphs.truncate(MAX_PARAGRAPHS);

        CompetitorDocument {
            identifier,
            title: resolve_title(identifier, self.title.as_deref()),
            word_count: self.content.split_whitespace().count(),
            url: self.url,
            meta_description: self.meta_description,
            headings: self.headings.unwrap_or_default(),
            content: self.content,
            paragraphs,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CompetitorsFile {
    #[serde(default)]
    pub competitors: Vec<CompetitorEntry>,
}

impl CompetitorsFile {
    /// Convert entries into documents, skipping blank ones and numbering the
    /// survivors from 1 in file order.
    #[must_use]
    pub fn into_documents(self) -> Vec<CompetitorDocument> {
        self.competitors
            .into_iter()
            .filter(|entry| !entry.content.trim().is_empty())
            .zip(1u32..)
            .map(|(entry, identifier)| entry.into_document(identifier))
            .collect()
    }
}

/// Load competitor documents from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if it
/// contains no competitor with non-blank content.
pub fn load_competitors(path: &Path) -> Result<Vec<CompetitorDocument>, ConfigError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CompetitorsFileIo {
        path: display.clone(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let file: CompetitorsFile = if is_json {
        serde_json::from_str(&content).map_err(|e| ConfigError::CompetitorsFileParse {
            path: display.clone(),
            reason: e.to_string(),
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::CompetitorsFileParse {
            path: display.clone(),
            reason: e.to_string(),
        })?
    };

    let documents = file.into_documents();
    if documents.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{display} contains no competitor with content"
        )));
    }

    Ok(documents)
}
