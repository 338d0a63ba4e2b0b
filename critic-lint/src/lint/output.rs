//! Diagnostic rendering.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use serde::Serialize;

use super::rules::{Diagnostic, DiagnosticSeverity, RuleCode};

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per diagnostic: `file:line:col: severity[CODE] message`.
    #[default]
    Text,
    /// JSON envelope with diagnostics and a summary.
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

// ============================================================================
// SUMMARY STATISTICS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintSummary {
    pub total_diagnostics: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub hints: usize,
    pub by_rule: HashMap<RuleCode, usize>,
}

impl LintSummary {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Self::default();
        for diag in diagnostics {
            summary.add_diagnostic(diag);
        }
        summary
    }

    pub fn add_diagnostic(&mut self, diag: &Diagnostic) {
        self.total_diagnostics += 1;
        match diag.severity {
            DiagnosticSeverity::Error => self.errors += 1,
            DiagnosticSeverity::Warning => self.warnings += 1,
            DiagnosticSeverity::Info => self.infos += 1,
            DiagnosticSeverity::Hint => self.hints += 1,
        }
        *self.by_rule.entry(diag.rule).or_insert(0) += 1;
    }
}

/// Write `diagnostics` to `w` in `format`.
pub fn write_diagnostics<W: Write>(
    w: &mut W,
    diagnostics: &[Diagnostic],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(w, diagnostics),
        OutputFormat::Json => write_json(w, diagnostics),
    }
}

// ============================================================================
// TEXT FORMAT
// ============================================================================

fn write_text<W: Write>(w: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    for diag in diagnostics {
        writeln!(
            w,
            "{}:{}:{}: {}[{}] {}",
            diag.file.display(),
            diag.range.start.line,
            diag.range.start.col,
            diag.severity,
            diag.rule,
            diag.message
        )?;
    }
    Ok(())
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct JsonDiagnostic {
    code: String,
    code_name: &'static str,
    message: String,
    severity: String,
    file: String,
    location: JsonLocation,
}

#[derive(Serialize)]
struct JsonLocation {
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
}

/// Full JSON output envelope with diagnostics and summary.
#[derive(Serialize)]
struct JsonOutput {
    version: &'static str,
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    hints: usize,
    by_rule: BTreeMap<String, usize>,
}

fn write_json<W: Write>(w: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    let summary = LintSummary::from_diagnostics(diagnostics);

    let json_diags: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| JsonDiagnostic {
            code: d.rule.to_string(),
            code_name: d.rule.name(),
            message: d.message.clone(),
            severity: d.severity.to_string(),
            file: d.file.display().to_string(),
            location: JsonLocation {
                start_line: d.range.start.line,
                start_column: d.range.start.col,
                end_line: d.range.end.line,
                end_column: d.range.end.col,
            },
        })
        .collect();

    let output = JsonOutput {
        version: "1",
        diagnostics: json_diags,
        summary: JsonSummary {
            total: summary.total_diagnostics,
            errors: summary.errors,
            warnings: summary.warnings,
            infos: summary.infos,
            hints: summary.hints,
            by_rule: summary
                .by_rule
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        },
    };

    serde_json::to_writer_pretty(&mut *w, &output).map_err(io::Error::other)?;
    writeln!(w)?;
    Ok(())
}
