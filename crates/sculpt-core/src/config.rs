//! Runtime configuration: defaults, optional JSON file, `SCULPT_*` overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{SculptError, SculptResult};

/// Number of catalogue hits in one namespace at which a wildcard import is
/// recommended instead of single-type imports.
pub const DEFAULT_WILDCARD_THRESHOLD: usize = 5;
pub const DEFAULT_INDENT_WIDTH: usize = 4;
pub const DEFAULT_SCAN_WORKERS: usize = 4;
pub const DEFAULT_DETECTORS: &[&str] = &["unused-imports", "unused-methods", "unused-fields"];
pub const KNOWN_DETECTORS: &[&str] = &[
    "unused-imports",
    "unused-methods",
    "unused-fields",
    "unused-parameters",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptConfig {
    pub wildcard_threshold: usize,
    pub indent_width: usize,
    pub scan_workers: usize,
    pub detectors: Vec<String>,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            wildcard_threshold: DEFAULT_WILDCARD_THRESHOLD,
            indent_width: DEFAULT_INDENT_WIDTH,
            scan_workers: DEFAULT_SCAN_WORKERS,
            detectors: DEFAULT_DETECTORS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl SculptConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> SculptResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load a JSON config file (missing keys fall back to defaults), then
    /// apply environment overrides.
    pub fn load(path: &Path) -> SculptResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SculptConfig = serde_json::from_str(&content)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> SculptResult<()> {
        if let Some(value) = env_usize("SCULPT_WILDCARD_THRESHOLD")? {
            self.wildcard_threshold = value;
        }
        if let Some(value) = env_usize("SCULPT_INDENT_WIDTH")? {
            self.indent_width = value;
        }
        if let Some(value) = env_usize("SCULPT_SCAN_WORKERS")? {
            self.scan_workers = value;
        }
        if let Ok(raw) = std::env::var("SCULPT_DETECTORS") {
            self.detectors = parse_detector_list(&raw);
        }
        self.validate()
    }

    pub fn validate(&self) -> SculptResult<()> {
        if self.wildcard_threshold == 0 {
            return Err(SculptError::Config(
                "wildcard_threshold must be at least 1".to_string(),
            ));
        }
        for name in &self.detectors {
            if !KNOWN_DETECTORS.contains(&name.as_str()) {
                return Err(SculptError::Config(format!("unknown detector: {name}")));
            }
        }
        Ok(())
    }
}

fn env_usize(key: &str) -> SculptResult<Option<usize>> {
    match std::env::var(key) {
        Ok(val) => {
            let trimmed = val.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<usize>()
                .map(Some)
                .map_err(|e| SculptError::Config(format!("{key}={trimmed}: {e}")))
        }
        Err(_) => Ok(None),
    }
}

fn parse_detector_list(raw: &str) -> Vec<String> {
    let lowered = raw.trim().to_lowercase();
    if matches!(lowered.as_str(), "" | "none" | "off") {
        return Vec::new();
    }
    if lowered == "all" {
        return KNOWN_DETECTORS.iter().map(|d| d.to_string()).collect();
    }
    lowered
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SculptConfig::default();
        assert_eq!(config.wildcard_threshold, 5);
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.detectors.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_detector_list() {
        assert!(parse_detector_list("off").is_empty());
        assert_eq!(parse_detector_list("all").len(), KNOWN_DETECTORS.len());
        assert_eq!(
            parse_detector_list(" Unused-Imports , unused-parameters,"),
            vec!["unused-imports".to_string(), "unused-parameters".to_string()]
        );
    }

    #[test]
    fn test_validate_rejects_unknown_detector() {
        let config = SculptConfig {
            detectors: vec!["magic-numbers".to_string()],
            ..SculptConfig::default()
        };
        assert!(matches!(config.validate(), Err(SculptError::Config(_))));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"indent_width": 2}}"#).unwrap();
        let config = SculptConfig::load(file.path()).unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.wildcard_threshold, DEFAULT_WILDCARD_THRESHOLD);
    }
}
