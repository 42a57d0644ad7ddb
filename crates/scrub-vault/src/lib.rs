//! Reversible redaction vault
//!
//! Replaces sensitive literals with stable `<CATEGORY_n>` tokens and restores
//! them later, tolerating delimiter corruption introduced by whatever handled
//! the tokenized text in between. One vault per trust/session boundary;
//! instances are independent and hold no global state.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use scrub_scan::{builtin_rules, ScanRule};
use tracing::debug;
use uuid::Uuid;

pub struct Vault {
    id: Uuid,
    rules: Vec<ScanRule>,
    value_to_token: HashMap<String, String>,
    token_to_value: HashMap<String, String>,
    counters: HashMap<String, u64>,
}

impl Vault {
    /// Vault over the built-in rule set.
    pub fn new() -> Self {
        Self::with_rules(builtin_rules())
    }

    /// Vault over a caller-supplied ordered rule set.
    pub fn with_rules(rules: Vec<ScanRule>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rules,
            value_to_token: HashMap::new(),
            token_to_value: HashMap::new(),
            counters: HashMap::new(),
        }
    }

    /// Replace every sensitive literal in `text` with its token, minting new
    /// tokens as needed. Every occurrence of a matched literal is replaced
    /// text-wide, so one literal can never produce two tokens in one call.
    pub fn mask(&mut self, text: &str) -> String {
        let mut working = text.to_string();

        for i in 0..self.rules.len() {
            let rule = &self.rules[i];

            let mut literals: Vec<String> = Vec::new();
            for m in rule.regex.find_iter(&working) {
                let literal = m.as_str().to_string();
                if !literals.contains(&literal) {
                    literals.push(literal);
                }
            }
            if literals.is_empty() {
                continue;
            }

            // Mint in encounter order so numbering follows the text.
            let category = rule.category.to_uppercase();
            let mut pairs: Vec<(String, String)> = literals
                .into_iter()
                .map(|literal| {
                    let inner = self.token_for(&category, &literal);
                    (literal, inner)
                })
                .collect();

            // Substitute longer literals first, so a literal that is a
            // substring of another match cannot split it mid-substitution.
            pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
            for (literal, inner) in pairs {
                working = working.replace(&literal, &format!("<{}>", inner));
            }
        }

        working
    }

    /// Restore every known token in `text` to its original literal. Token
    /// delimiters may have been mangled downstream: any of `<>`, `[]`, `()`
    /// with optional interior whitespace is accepted. Unknown tokens are
    /// left untouched.
    pub fn unmask(&self, text: &str) -> String {
        // Longest inner name first, so a numeric suffix that prefixes
        // another (EMAIL_1 vs EMAIL_10) cannot be matched short.
        let mut inners: Vec<&String> = self.token_to_value.keys().collect();
        inners.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut working = text.to_string();
        for inner in inners {
            let value = &self.token_to_value[inner];
            let pattern = format!(r"[<\[(]\s*{}\s*[>\])]", regex::escape(inner));
            let re = Regex::new(&pattern).expect("delimiter matcher from escaped token");
            working = re
                .replace_all(&working, regex::NoExpand(value))
                .into_owned();
        }

        working
    }

    /// Drop every association and reset all counters. The next `mask` call
    /// behaves as if on a freshly created vault.
    pub fn flush(&mut self) {
        self.value_to_token.clear();
        self.token_to_value.clear();
        self.counters.clear();
        debug!(vault = %self.id, "vault flushed");
    }

    /// Number of stored associations.
    pub fn len(&self) -> usize {
        self.token_to_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_value.is_empty()
    }

    /// Existing token for the literal, or the next one for its category.
    fn token_for(&mut self, category: &str, literal: &str) -> String {
        if let Some(inner) = self.value_to_token.get(literal) {
            return inner.clone();
        }

        let counter = self.counters.entry(category.to_string()).or_insert(0);
        *counter += 1;
        let inner = format!("{}_{}", category, counter);

        self.value_to_token
            .insert(literal.to_string(), inner.clone());
        self.token_to_value
            .insert(inner.clone(), literal.to_string());
        debug!(vault = %self.id, token = %inner, "minted token");

        inner
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

// Stored literals are sensitive; Debug must never print them.
impl fmt::Debug for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("id", &self.id)
            .field("entries", &self.token_to_value.len())
            .finish()
    }
}
