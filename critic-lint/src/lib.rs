//! Check catalog and lint engine for PHP syntax trees.
//!
//! Trees arrive as [`critic_repr::SourceUnit`] values, built by a host
//! parser or loaded from JSON. The engine indexes constant definitions,
//! freezes them, and runs the enabled checks over every unit in parallel.
//!
//! ```
//! use critic_lint::{LintConfig, LintEngine};
//! use critic_repr::builder::{binary, expr_stmt, int};
//! use critic_repr::{BinaryOp, SourceUnit};
//!
//! let unit = SourceUnit::new(
//!     "index.php",
//!     vec![expr_stmt(binary(BinaryOp::Equal, int("10"), int("20")))],
//! );
//! let diagnostics = LintEngine::new(LintConfig::default()).check(&[unit]);
//! assert_eq!(diagnostics[0].message, "always false condition");
//! ```

pub mod error;
pub mod lint;
pub mod lint_config;

pub use error::{LintError, Result};
pub use lint::{
    write_diagnostics, Diagnostic, DiagnosticSeverity, LintConfig, LintEngine, OutputFormat,
    RuleCode,
};
pub use lint_config::{
    discover_and_load_config, discover_config, ConfigError, LintFileConfig, CONFIG_FILE_NAME,
};
