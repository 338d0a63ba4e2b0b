//! Lint rule definitions and diagnostic types.

use std::fmt;
use std::path::PathBuf;

use critic_repr::{Expr, Range, Stmt};

use super::context::CheckContext;

/// Rule codes for PHP checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCode {
    /// CRT001: Condition that always evaluates to the same boolean.
    CRT001,
    /// CRT002: Identical operands on both sides of a binary operator.
    CRT002,
    /// CRT003: Identical first and second arguments of a string/math builtin.
    CRT003,
    /// CRT004: Two branches of an if/elseif/else chain with the same body.
    CRT004,
    /// CRT005: `strcmp(...)` compared with zero where a direct comparison works.
    CRT005,
    /// CRT006: `strncmp` length argument that does not match the literal length.
    CRT006,
    /// CRT007: `define` with the deprecated case-insensitivity flag.
    CRT007,
    /// CRT008: `strpos` with haystack and needle swapped.
    CRT008,
}

impl RuleCode {
    /// Parse a rule code from string (e.g., "CRT001").
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CRT001" => Some(RuleCode::CRT001),
            "CRT002" => Some(RuleCode::CRT002),
            "CRT003" => Some(RuleCode::CRT003),
            "CRT004" => Some(RuleCode::CRT004),
            "CRT005" => Some(RuleCode::CRT005),
            "CRT006" => Some(RuleCode::CRT006),
            "CRT007" => Some(RuleCode::CRT007),
            "CRT008" => Some(RuleCode::CRT008),
            _ => None,
        }
    }

    /// Parse either a code ("CRT002") or a rule name ("dup-sub-expr").
    pub fn parse(s: &str) -> Option<Self> {
        Self::parse_code(s).or_else(|| {
            Self::all()
                .iter()
                .copied()
                .find(|code| code.name().eq_ignore_ascii_case(s))
        })
    }

    /// All available rule codes.
    pub fn all() -> &'static [RuleCode] {
        &[
            RuleCode::CRT001,
            RuleCode::CRT002,
            RuleCode::CRT003,
            RuleCode::CRT004,
            RuleCode::CRT005,
            RuleCode::CRT006,
            RuleCode::CRT007,
            RuleCode::CRT008,
        ]
    }

    /// Short name for the rule.
    pub fn name(&self) -> &'static str {
        match self {
            RuleCode::CRT001 => "bad-cond",
            RuleCode::CRT002 => "dup-sub-expr",
            RuleCode::CRT003 => "dup-arg",
            RuleCode::CRT004 => "dup-branch-body",
            RuleCode::CRT005 => "simplify",
            RuleCode::CRT006 => "bad-call",
            RuleCode::CRT007 => "sloppy-arg",
            RuleCode::CRT008 => "arg-order",
        }
    }

    /// Detailed description of what the rule checks.
    pub fn description(&self) -> &'static str {
        match self {
            RuleCode::CRT001 => {
                "Reports conditions whose value is known statically: comparisons, \
                 logical operators, do-while conditions and switch case labels that \
                 fold to a constant boolean, plus contradictory range and equality \
                 tests on the same operand."
            }
            RuleCode::CRT002 => {
                "Reports binary operators such as `-`, `/`, `==` and `<` whose two \
                 operands are provably the same expression. The result is constant \
                 and usually points at a copy-paste mistake."
            }
            RuleCode::CRT003 => {
                "Reports calls to strpos, strncmp, strcmp, min, max and str_replace \
                 that pass the same expression as the first and second argument."
            }
            RuleCode::CRT004 => {
                "Reports if/elseif/else chains in which two branches have \
                 structurally identical bodies."
            }
            RuleCode::CRT005 => {
                "Suggests comparing strings directly instead of comparing the \
                 result of strcmp with zero."
            }
            RuleCode::CRT006 => {
                "Reports strncmp calls whose length argument differs from the \
                 length of the literal string being compared."
            }
            RuleCode::CRT007 => {
                "Reports define calls that pass the case_insensitive argument, \
                 which is deprecated and ignored by current runtimes."
            }
            RuleCode::CRT008 => {
                "Reports strpos calls whose first argument is a string literal and \
                 whose second is not: the haystack and needle are likely swapped."
            }
        }
    }

    /// Severity used when the configuration does not override it.
    pub fn default_severity(&self) -> DiagnosticSeverity {
        match self {
            RuleCode::CRT005 => DiagnosticSeverity::Info,
            _ => DiagnosticSeverity::Warning,
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RuleCode::CRT001 => "CRT001",
            RuleCode::CRT002 => "CRT002",
            RuleCode::CRT003 => "CRT003",
            RuleCode::CRT004 => "CRT004",
            RuleCode::CRT005 => "CRT005",
            RuleCode::CRT006 => "CRT006",
            RuleCode::CRT007 => "CRT007",
            RuleCode::CRT008 => "CRT008",
        };
        f.write_str(code)
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
    Hint,
}

impl DiagnosticSeverity {
    /// Parse "error", "warning", "info" or "hint" (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(DiagnosticSeverity::Error),
            "warning" => Some(DiagnosticSeverity::Warning),
            "info" => Some(DiagnosticSeverity::Info),
            "hint" => Some(DiagnosticSeverity::Hint),
            _ => None,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Info => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// A lint finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic.
    pub rule: RuleCode,
    /// Severity level.
    pub severity: DiagnosticSeverity,
    /// File path.
    pub file: PathBuf,
    /// Location in the file.
    pub range: Range,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with the rule's default severity.
    pub fn new(
        rule: RuleCode,
        file: impl Into<PathBuf>,
        range: Range,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            severity: rule.default_severity(),
            file: file.into(),
            range,
            message: message.into(),
        }
    }
}

/// A lint rule.
///
/// The engine calls the hooks for every node of a unit in pre-order.
/// Rules are stateless between calls and shared across worker threads.
pub trait Rule: Send + Sync {
    /// The rule code.
    fn code(&self) -> RuleCode;

    /// Inspect one expression.
    fn check_expr(&self, _expr: &Expr, _ctx: &CheckContext<'_>, _out: &mut Vec<Diagnostic>) {}

    /// Inspect one statement.
    fn check_stmt(&self, _stmt: &Stmt, _ctx: &CheckContext<'_>, _out: &mut Vec<Diagnostic>) {}
}
