use scrub_repair::KernelKind;
use scrub_scan::RuleSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple configuration for scrub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub repair: RepairConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// When several JSON candidates are present, take the last one.
    #[serde(default = "default_prefer_last")]
    pub prefer_last: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConfig {
    #[serde(default)]
    pub kernel: KernelKind,

    /// Run the trace extractor before repairing.
    #[serde(default = "default_extract_first")]
    pub extract_first: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanConfig {
    /// Extra rules; a rule with a built-in category name overrides it.
    #[serde(default)]
    pub custom_rules: Vec<RuleSpec>,

    /// Literals or full-match patterns exempt from findings and redaction.
    #[serde(default)]
    pub allowlist: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            repair: RepairConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            prefer_last: default_prefer_last(),
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            kernel: KernelKind::default(),
            extract_first: default_extract_first(),
        }
    }
}

fn default_prefer_last() -> bool {
    true
}

fn default_extract_first() -> bool {
    true
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scrub", "scrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.scrub/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.extract.prefer_last);
        assert!(config.repair.extract_first);
        assert_eq!(config.repair.kernel, KernelKind::Stream);
        assert!(config.scan.custom_rules.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.extract.prefer_last, config.extract.prefer_last);
        assert_eq!(parsed.repair.kernel, config.repair.kernel);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[extract]\nprefer_last = false\n").unwrap();
        assert!(!parsed.extract.prefer_last);
        assert!(parsed.repair.extract_first);
    }

    #[test]
    fn test_custom_rules_parse() {
        let parsed: Config = toml::from_str(
            "[[scan.custom_rules]]\ncategory = \"employee_id\"\npattern = \"EMP-\\\\d{6}\"\n",
        )
        .unwrap();
        assert_eq!(parsed.scan.custom_rules.len(), 1);
        assert_eq!(parsed.scan.custom_rules[0].category, "employee_id");
    }
}
