use regex::Regex;

/// Caller-supplied exemptions. An entry matches a finding either by literal
/// equality or as a full-match pattern; entries that don't compile as
/// patterns still work as literals.
#[derive(Debug, Default)]
pub struct AllowList {
    literals: Vec<String>,
    patterns: Vec<Regex>,
}

impl AllowList {
    pub fn new(entries: Vec<String>) -> Self {
        let patterns: Vec<Regex> = entries
            .iter()
            .filter_map(|e| Regex::new(&format!("^(?:{})$", e)).ok())
            .collect();

        Self {
            literals: entries,
            patterns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True when the matched substring is exempt from findings and redaction.
    pub fn is_allowed(&self, matched: &str) -> bool {
        self.literals.iter().any(|l| l == matched)
            || self.patterns.iter().any(|p| p.is_match(matched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_entry() {
        let allow = AllowList::new(vec!["support@example.com".to_string()]);
        assert!(allow.is_allowed("support@example.com"));
        assert!(!allow.is_allowed("other@example.com"));
    }

    #[test]
    fn test_pattern_entry() {
        let allow = AllowList::new(vec![r".*@internal\.test".to_string()]);
        assert!(allow.is_allowed("anyone@internal.test"));
        assert!(!allow.is_allowed("anyone@external.test"));
    }

    #[test]
    fn test_unparseable_entry_still_literal() {
        let allow = AllowList::new(vec!["([".to_string()]);
        assert!(allow.is_allowed("(["));
        assert!(!allow.is_allowed("anything else"));
    }
}
