//! `.critic.toml` configuration file support.
//!
//! Provides deserialization, discovery (walk up to the project root), and merging
//! into [`LintConfig`](crate::lint::LintConfig). Values set by the caller
//! always take precedence over file config.
//!
//! # Example config
//!
//! ```toml
//! [rules]
//! select = ["CRT001", "CRT002", "dup-arg"]
//! exclude = ["CRT005"]
//!
//! [rules.severity]
//! CRT001 = "error"
//! CRT008 = "hint"
//!
//! [analysis]
//! shared_constants = true
//!
//! [output]
//! format = "json"
//! max_diagnostics = 200
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::lint::{DiagnosticSeverity, OutputFormat, RuleCode};

/// Top-level `.critic.toml` configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LintFileConfig {
    /// Rule selection and severity overrides.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Constant resolution settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rule selection and severity overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Rules to enable, by code or name. If empty/absent, all rules are enabled.
    #[serde(default)]
    pub select: Vec<String>,

    /// Rules to exclude (takes precedence over `select`).
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-rule severity overrides.
    /// Keys are rule codes or names, values are "error", "warning", "info"
    /// or "hint".
    #[serde(default)]
    pub severity: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Resolve constants across all units (`true`, the default) or only
    /// within the unit that references them.
    #[serde(default)]
    pub shared_constants: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "text" or "json".
    #[serde(default)]
    pub format: Option<String>,

    /// Maximum diagnostics to report.
    #[serde(default)]
    pub max_diagnostics: Option<usize>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl LintFileConfig {
    /// Parse a `.critic.toml` file from a string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }

    /// Load and validate a `.critic.toml` file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate semantic constraints that TOML schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for code in self.rules.select.iter().chain(&self.rules.exclude) {
            if RuleCode::parse(code).is_none() {
                return Err(ConfigError::InvalidRuleCode(code.clone()));
            }
        }

        for (code, severity) in &self.rules.severity {
            if RuleCode::parse(code).is_none() {
                return Err(ConfigError::InvalidRuleCode(code.clone()));
            }
            if DiagnosticSeverity::parse(severity).is_none() {
                return Err(ConfigError::InvalidSeverity {
                    rule: code.clone(),
                    severity: severity.clone(),
                });
            }
        }

        if let Some(ref fmt) = self.output.format {
            if OutputFormat::parse(fmt).is_none() {
                return Err(ConfigError::InvalidFormat(fmt.clone()));
            }
        }

        if self.output.max_diagnostics == Some(0) {
            return Err(ConfigError::InvalidMaxDiagnostics);
        }

        Ok(())
    }

    /// Parsed `[rules] select`, or `None` when absent. Call after [`validate`](Self::validate).
    pub fn selected_rules(&self) -> Option<Vec<RuleCode>> {
        if self.rules.select.is_empty() {
            return None;
        }
        Some(self.rules.select.iter().filter_map(|c| RuleCode::parse(c)).collect())
    }

    pub fn excluded_rules(&self) -> Vec<RuleCode> {
        self.rules.exclude.iter().filter_map(|c| RuleCode::parse(c)).collect()
    }

    pub fn severity_overrides(&self) -> Vec<(RuleCode, DiagnosticSeverity)> {
        self.rules
            .severity
            .iter()
            .filter_map(|(code, sev)| {
                Some((RuleCode::parse(code)?, DiagnosticSeverity::parse(sev)?))
            })
            .collect()
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.format.as_deref().and_then(OutputFormat::parse)
    }
}

// ---------------------------------------------------------------------------
// Config file discovery
// ---------------------------------------------------------------------------

/// Name of the config file.
pub const CONFIG_FILE_NAME: &str = ".critic.toml";

/// Files or directories that mark the root of a PHP project.
const PROJECT_ROOT_MARKERS: &[&str] = &[".git", "composer.json"];

/// Discover a `.critic.toml` by walking up from `start` to the project
/// root: the first directory holding `.git` or `composer.json`.
///
/// `start` may be a directory or a file inside one. Returns `None` if no
/// config file exists at or below the project root.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let start = if start.is_file() { start.parent()? } else { start };

    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if PROJECT_ROOT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            debug!("No {} up to project root {}", CONFIG_FILE_NAME, dir.display());
            return None;
        }
    }
    None
}

/// Discover and load the config file, returning the parsed config and
/// its path. Returns `Ok(None)` if no config file is found.
pub fn discover_and_load_config(
    start_dir: &Path,
) -> Result<Option<(LintFileConfig, PathBuf)>, ConfigError> {
    match discover_config(start_dir) {
        Some(path) => {
            let config = LintFileConfig::load(&path)?;
            Ok(Some((config, path)))
        }
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from config file operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("unknown rule code '{0}' in config (valid: CRT001..CRT008 or a rule name)")]
    InvalidRuleCode(String),

    #[error("invalid severity '{severity}' for rule {rule} (valid: error, warning, info, hint)")]
    InvalidSeverity { rule: String, severity: String },

    #[error("invalid output format '{0}' (valid: text, json)")]
    InvalidFormat(String),

    #[error("max_diagnostics must be >= 1")]
    InvalidMaxDiagnostics,
}
