//! Pattern scanning and redaction
//!
//! Classifies substrings against an ordered list of (category, pattern)
//! rules. Rule order matters: specific numeric patterns run before free-form
//! ones, and each rule consumes its matches from the working text before the
//! next rule sees it.

pub mod allowlist;
pub mod rules;
pub mod scanner;

pub use allowlist::AllowList;
pub use rules::{builtin_rules, merge_rules, RuleSpec, ScanRule};
pub use scanner::Scanner;
