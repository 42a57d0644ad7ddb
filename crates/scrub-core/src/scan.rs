use serde::{Deserialize, Serialize};

/// Matches for one category that survived allow-list filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: String,
    pub matches: Vec<String>,
}

/// Result of scanning a piece of text against the rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// True when no findings survived the allow-list filter.
    pub safe: bool,
    pub findings: Vec<Finding>,
    /// Redacted copy of the input. Present only when redaction was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ScanReport {
    /// All surviving matches for one category, if any.
    pub fn matches_for(&self, category: &str) -> Option<&[String]> {
        self.findings
            .iter()
            .find(|f| f.category == category)
            .map(|f| f.matches.as_slice())
    }
}
