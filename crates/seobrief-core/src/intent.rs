use serde::{Deserialize, Serialize};

/// Search intent label shared by keyword classification, PAA bucketing and
/// insight synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Informational,
    Navigational,
    Transactional,
    Commercial,
}

impl Intent {
    /// All four categories in bucket order.
    pub const ALL: [Intent; 4] = [
        Intent::Informational,
        Intent::Navigational,
        Intent::Transactional,
        Intent::Commercial,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Intent::Informational => "informational",
            Intent::Navigational => "navigational",
            Intent::Transactional => "transactional",
            Intent::Commercial => "commercial",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_lowercase() {
        let labels: Vec<&str> = Intent::ALL.iter().map(|i| i.label()).collect();
        assert_eq!(
            labels,
            ["informational", "navigational", "transactional", "commercial"]
        );
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Intent::Commercial).unwrap();
        assert_eq!(json, "\"commercial\"");
    }
}
