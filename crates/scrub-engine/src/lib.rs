//! Pipeline facade
//!
//! Wires extractor, repair kernel, scanner, and validator together from one
//! config. The pieces stay independently usable; this crate only composes.

use std::sync::Arc;

use scrub_config::Config;
use scrub_core::{RepairResult, ScanReport, Validation, Validator};
use scrub_extract::Extractor;
use scrub_repair::RepairEngine;
use scrub_scan::Scanner;
use tracing::debug;

/// Result of normalizing one chunk of raw model output.
#[derive(Debug)]
pub struct NormalizeOutcome {
    pub repair: RepairResult,
    /// Present when a validator is configured and a value was parsed.
    pub validation: Option<Validation>,
    /// blake3 hash of the raw input, for correlating repeated calls over
    /// growing prefixes of the same stream.
    pub content_hash: String,
}

pub struct Scrubber {
    repair_engine: RepairEngine,
    scanner: Scanner,
    validator: Option<Arc<dyn Validator>>,
}

impl Scrubber {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        let mut repair_engine = RepairEngine::new().with_kernel(config.repair.kernel.build());
        if config.repair.extract_first {
            let extractor = Extractor::new().with_prefer_last(config.extract.prefer_last);
            repair_engine = repair_engine.with_extractor(extractor);
        }

        let scanner = Scanner::new()
            .with_custom_rules(&config.scan.custom_rules)
            .with_allowlist(config.scan.allowlist.clone());

        Self {
            repair_engine,
            scanner,
            validator: None,
        }
    }

    /// Attach a structural validator. Validation capability is fixed here at
    /// configuration time, never probed at call time.
    pub fn with_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Extract, repair, and (when configured) validate one chunk of raw
    /// model output.
    pub fn normalize(&self, raw: &str) -> NormalizeOutcome {
        let content_hash = blake3::hash(raw.as_bytes()).to_hex().to_string();

        let repair = self.repair_engine.repair(raw);

        let validation = match (&self.validator, &repair.parsed_value) {
            (Some(validator), Some(value)) => Some(validator.validate(value)),
            _ => None,
        };

        debug!(
            partial = repair.is_partial,
            parsed = repair.parsed_value.is_some(),
            patches = repair.patches.len(),
            "normalized chunk"
        );

        NormalizeOutcome {
            repair,
            validation,
            content_hash,
        }
    }

    /// Scan raw text for sensitive substrings, optionally redacting.
    pub fn sanitize(&self, raw: &str, redact: bool) -> ScanReport {
        self.scanner.scan(raw, redact)
    }
}

impl Default for Scrubber {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_partial_stream() {
        let scrubber = Scrubber::new();
        let outcome = scrubber.normalize("<think>hm</think>{\"status\": \"ok");
        assert!(outcome.repair.is_partial);
        assert_eq!(outcome.repair.fixed_text, "{\"status\": \"ok\"}");
        assert!(outcome.validation.is_none());
    }

    #[test]
    fn test_content_hash_stable() {
        let scrubber = Scrubber::new();
        let a = scrubber.normalize("{\"a\": 1}");
        let b = scrubber.normalize("{\"a\": 1}");
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn test_validator_runs_on_parsed_value() {
        struct RequireStatus;
        impl Validator for RequireStatus {
            fn validate(&self, value: &serde_json::Value) -> Validation {
                if value.get("status").is_some() {
                    Validation::Valid(value.clone())
                } else {
                    Validation::Invalid(vec!["missing status".to_string()])
                }
            }
        }

        let scrubber = Scrubber::new().with_validator(Arc::new(RequireStatus));

        let ok = scrubber.normalize("{\"status\": \"done\"}");
        assert!(matches!(ok.validation, Some(Validation::Valid(_))));

        let bad = scrubber.normalize("{\"other\": 1}");
        assert!(matches!(bad.validation, Some(Validation::Invalid(_))));
    }

    #[test]
    fn test_validator_skipped_without_value() {
        struct AcceptAll;
        impl Validator for AcceptAll {
            fn validate(&self, value: &serde_json::Value) -> Validation {
                Validation::Valid(value.clone())
            }
        }

        let scrubber = Scrubber::new().with_validator(Arc::new(AcceptAll));
        let outcome = scrubber.normalize("{\"a\":}");
        assert!(outcome.repair.parsed_value.is_none());
        assert!(outcome.validation.is_none());
    }
}
