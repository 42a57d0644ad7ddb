//! Built-in detection rules
//!
//! Rule order is a correctness property, not a style choice: fixed-length
//! numeric categories (cards, SSNs, IPs) must run before the free-form phone
//! pattern that would otherwise claim a superset of their matches.

use regex::Regex;
use scrub_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One compiled detection rule.
#[derive(Debug, Clone)]
pub struct ScanRule {
    pub category: String,
    pub regex: Regex,
}

impl ScanRule {
    pub fn new(category: impl Into<String>, regex: Regex) -> Self {
        Self {
            category: category.into(),
            regex,
        }
    }
}

/// An uncompiled rule as it appears in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub category: String,
    pub pattern: String,
}

impl RuleSpec {
    pub fn compile(&self) -> Result<ScanRule> {
        let regex = Regex::new(&self.pattern)
            .map_err(|e| Error::InvalidRule(self.category.clone(), e.to_string()))?;
        Ok(ScanRule::new(self.category.clone(), regex))
    }
}

/// The built-in rule set, in evaluation order.
pub fn builtin_rules() -> Vec<ScanRule> {
    vec![
        ScanRule::new(
            "credit_card",
            Regex::new(
                r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{3,4}\b",
            )
            .unwrap(),
        ),
        ScanRule::new("ssn", Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap()),
        ScanRule::new(
            "aws_access_key",
            Regex::new(r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b").unwrap(),
        ),
        ScanRule::new(
            "jwt",
            Regex::new(r"eyJ[a-zA-Z0-9_-]+\.eyJ[a-zA-Z0-9_-]+\.[a-zA-Z0-9_-]+").unwrap(),
        ),
        ScanRule::new(
            "api_key",
            Regex::new(r"\b(?:sk|pk|rk|key)-[A-Za-z0-9]{16,}\b").unwrap(),
        ),
        ScanRule::new(
            "email",
            Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap(),
        ),
        ScanRule::new(
            "ipv4",
            Regex::new(r"\b(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\b")
                .unwrap(),
        ),
        ScanRule::new(
            "phone",
            Regex::new(r"(?:\+?\d{1,2}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap(),
        ),
    ]
}

/// Merge custom rules into the built-in set. A custom rule whose category
/// matches a built-in replaces it in place, keeping its evaluation slot;
/// new categories are appended. Rules whose patterns fail to compile are
/// skipped, never an error.
pub fn merge_rules(custom: &[RuleSpec]) -> Vec<ScanRule> {
    let mut rules = builtin_rules();

    for spec in custom {
        let rule = match spec.compile() {
            Ok(rule) => rule,
            Err(err) => {
                tracing::warn!(%err, "skipping unparseable rule pattern");
                continue;
            }
        };
        match rules.iter_mut().find(|r| r.category == spec.category) {
            Some(slot) => *slot = rule,
            None => rules.push(rule),
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let categories: Vec<String> = builtin_rules().into_iter().map(|r| r.category).collect();
        let card = categories.iter().position(|c| c == "credit_card").unwrap();
        let ipv4 = categories.iter().position(|c| c == "ipv4").unwrap();
        let phone = categories.iter().position(|c| c == "phone").unwrap();
        assert!(card < phone);
        assert!(ipv4 < phone);
    }

    #[test]
    fn test_override_keeps_slot() {
        let custom = vec![RuleSpec {
            category: "email".to_string(),
            pattern: r"\S+@corp\.example".to_string(),
        }];
        let rules = merge_rules(&custom);
        assert_eq!(rules.len(), builtin_rules().len());

        let email = rules.iter().find(|r| r.category == "email").unwrap();
        assert!(email.regex.is_match("dev@corp.example"));
        assert!(!email.regex.is_match("dev@other.example"));
    }

    #[test]
    fn test_new_category_appended() {
        let custom = vec![RuleSpec {
            category: "employee_id".to_string(),
            pattern: r"\bEMP-\d{6}\b".to_string(),
        }];
        let rules = merge_rules(&custom);
        assert_eq!(rules.last().unwrap().category, "employee_id");
    }

    #[test]
    fn test_bad_pattern_skipped() {
        let custom = vec![RuleSpec {
            category: "broken".to_string(),
            pattern: "([unclosed".to_string(),
        }];
        let rules = merge_rules(&custom);
        assert!(rules.iter().all(|r| r.category != "broken"));
        assert_eq!(rules.len(), builtin_rules().len());
    }
}
