//! Lint engine that orchestrates constant indexing and rule checking.
//!
//! A run has two passes:
//! 1. **Index**: every unit is walked once and its constant definitions are
//!    recorded. The table is frozen before any rule runs.
//! 2. **Check**: units are checked in parallel with rayon. Each rule sees
//!    every statement and expression of a unit in pre-order.
//!
//! In project mode (the default) one table is built from all units and
//! shared read-only across workers. In per-unit mode every unit gets a table
//! built from its own definitions only.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use critic_repr::{Expr, SourceUnit, Stmt};
use php_critic::ConstantTable;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::checks::{
    ArgOrderRule, BadCallRule, BadCondRule, DupArgRule, DupBranchBodyRule, DupSubExprRule,
    SimplifyRule, SloppyArgRule,
};
use super::context::CheckContext;
use super::index::collect_constants;
use super::output::{write_diagnostics, OutputFormat};
use super::rules::{Diagnostic, DiagnosticSeverity, Rule, RuleCode};
use super::walker::{walk_unit, Visitor};
use crate::error::{LintError, Result};
use crate::lint_config::LintFileConfig;

// ---------------------------------------------------------------------------
// Rule cost ordering
// ---------------------------------------------------------------------------

/// Estimated cost tier for a rule. Lower = cheaper = runs first.
fn rule_cost(code: RuleCode) -> u8 {
    match code {
        // Tier 0: shape matching only
        RuleCode::CRT002 | RuleCode::CRT003 | RuleCode::CRT007 | RuleCode::CRT008 => 0,
        // Tier 1: constant folding
        RuleCode::CRT001 | RuleCode::CRT005 | RuleCode::CRT006 => 1,
        // Tier 2: deep subtree comparison
        RuleCode::CRT004 => 2,
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the lint engine.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Rules to enable (if None, all rules are enabled).
    pub select: Option<HashSet<RuleCode>>,
    /// Rules to ignore.
    pub ignore: HashSet<RuleCode>,
    /// Severity overrides.
    pub severity: HashMap<RuleCode, DiagnosticSeverity>,
    /// Maximum number of diagnostics to report. `None` means unlimited.
    pub max_diagnostics: Option<usize>,
    /// Resolve constants across all units instead of per unit.
    pub shared_constants: bool,
    /// Report format. `None` means plain text.
    pub output_format: Option<OutputFormat>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            select: None,
            ignore: HashSet::new(),
            severity: HashMap::new(),
            max_diagnostics: None,
            shared_constants: true,
            output_format: None,
        }
    }
}

/// Parse a comma-separated list of rule codes or names, dropping unknown ones.
fn parse_rule_list(list: &str, what: &str) -> HashSet<RuleCode> {
    let mut valid = HashSet::new();
    for raw in list.split(',') {
        let code = raw.trim();
        if code.is_empty() {
            continue;
        }
        match RuleCode::parse(code) {
            Some(rc) => {
                valid.insert(rc);
            }
            None => warn!("Unknown rule code '{}' in {} (ignored)", code, what),
        }
    }
    valid
}

impl LintConfig {
    /// Create a configuration from comma-separated `select` and `ignore` lists.
    ///
    /// Unknown codes are logged and dropped. If `select` is given but yields
    /// zero valid codes, [`has_empty_selection`](Self::has_empty_selection)
    /// returns true.
    pub fn new(select: Option<String>, ignore: Option<String>) -> Self {
        let select = select.map(|s| parse_rule_list(&s, "select"));
        if matches!(&select, Some(set) if set.is_empty()) {
            warn!("No valid rules selected, nothing will be checked");
        }
        let ignore = ignore
            .map(|s| parse_rule_list(&s, "ignore"))
            .unwrap_or_default();

        Self {
            select,
            ignore,
            ..Self::default()
        }
    }

    /// Builder: set the maximum number of diagnostics to report.
    pub fn with_max_diagnostics(mut self, max: Option<usize>) -> Self {
        self.max_diagnostics = max;
        self
    }

    /// Builder: choose project-wide or per-unit constant resolution.
    pub fn with_shared_constants(mut self, shared: bool) -> Self {
        self.shared_constants = shared;
        self
    }

    /// Builder: choose the report format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Builder: override the severity of one rule.
    pub fn with_severity(mut self, rule: RuleCode, severity: DiagnosticSeverity) -> Self {
        self.severity.insert(rule, severity);
        self
    }

    /// Fill in settings from a config file. Settings already present in
    /// `self` win.
    pub fn merge_file_config(mut self, file: &LintFileConfig) -> Self {
        if self.select.is_none() {
            self.select = file.selected_rules().map(|v| v.into_iter().collect());
        }
        self.ignore.extend(file.excluded_rules());
        for (rule, severity) in file.severity_overrides() {
            self.severity.entry(rule).or_insert(severity);
        }
        if self.max_diagnostics.is_none() {
            self.max_diagnostics = file.output.max_diagnostics;
        }
        if self.output_format.is_none() {
            self.output_format = file.output_format();
        }
        if let Some(shared) = file.analysis.shared_constants {
            self.shared_constants = shared;
        }
        self
    }

    /// Configuration taken from a config file alone.
    pub fn from_file_config(file: &LintFileConfig) -> Self {
        Self::default().merge_file_config(file)
    }

    /// Returns true when a selection was given but no valid rule codes
    /// were parsed, meaning the engine would check nothing.
    pub fn has_empty_selection(&self) -> bool {
        matches!(&self.select, Some(set) if set.is_empty())
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule: RuleCode) -> bool {
        if self.ignore.contains(&rule) {
            return false;
        }
        match &self.select {
            Some(selected) => selected.contains(&rule),
            None => true,
        }
    }

    /// Effective severity of `rule`.
    pub fn severity_for(&self, rule: RuleCode) -> DiagnosticSeverity {
        self.severity
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_severity())
    }
}

// ---------------------------------------------------------------------------
// Rule dispatch
// ---------------------------------------------------------------------------

/// Walker callback that runs a set of rules on every node of one unit.
pub struct RuleVisitor<'a> {
    file: &'a Path,
    table: &'a ConstantTable,
    rules: &'a [&'a dyn Rule],
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleVisitor<'a> {
    pub fn new(file: &'a Path, table: &'a ConstantTable, rules: &'a [&'a dyn Rule]) -> Self {
        Self {
            file,
            table,
            rules,
            diagnostics: Vec::new(),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Visitor for RuleVisitor<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt, namespace: &str) {
        let ctx = CheckContext::new(self.file, self.table, namespace);
        for rule in self.rules {
            rule.check_stmt(stmt, &ctx, &mut self.diagnostics);
        }
    }

    fn visit_expr(&mut self, expr: &Expr, namespace: &str) {
        let ctx = CheckContext::new(self.file, self.table, namespace);
        for rule in self.rules {
            rule.check_expr(expr, &ctx, &mut self.diagnostics);
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The main lint engine.
pub struct LintEngine {
    config: LintConfig,
    /// Rules sorted by cost (cheap first).
    rules: Vec<Box<dyn Rule>>,
}

impl LintEngine {
    /// Create a new lint engine with the given configuration.
    pub fn new(config: LintConfig) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = Vec::with_capacity(RuleCode::all().len());

        if config.is_rule_enabled(RuleCode::CRT001) {
            rules.push(Box::new(BadCondRule::new()));
        }
        if config.is_rule_enabled(RuleCode::CRT002) {
            rules.push(Box::new(DupSubExprRule::new()));
        }
        if config.is_rule_enabled(RuleCode::CRT003) {
            rules.push(Box::new(DupArgRule::new()));
        }
        if config.is_rule_enabled(RuleCode::CRT004) {
            rules.push(Box::new(DupBranchBodyRule::new()));
        }
        if config.is_rule_enabled(RuleCode::CRT005) {
            rules.push(Box::new(SimplifyRule::new()));
        }
        if config.is_rule_enabled(RuleCode::CRT006) {
            rules.push(Box::new(BadCallRule::new()));
        }
        if config.is_rule_enabled(RuleCode::CRT007) {
            rules.push(Box::new(SloppyArgRule::new()));
        }
        if config.is_rule_enabled(RuleCode::CRT008) {
            rules.push(Box::new(ArgOrderRule::new()));
        }

        // Stable sort keeps code order within a tier.
        rules.sort_by_key(|r| rule_cost(r.code()));

        Self { config, rules }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Codes of the enabled rules, in execution order.
    pub fn rule_codes(&self) -> Vec<RuleCode> {
        self.rules.iter().map(|r| r.code()).collect()
    }

    /// Check a set of units.
    ///
    /// Diagnostics are sorted by file, then position, then rule code, and
    /// truncated to `max_diagnostics`.
    pub fn check(&self, units: &[SourceUnit]) -> Vec<Diagnostic> {
        if self.config.has_empty_selection() {
            return Vec::new();
        }

        info!("Checking {} unit(s) with {} rule(s)", units.len(), self.rules.len());

        let mut diagnostics: Vec<Diagnostic> = if self.config.shared_constants {
            let table = collect_constants(units);
            units
                .par_iter()
                .flat_map_iter(|unit| self.check_unit(unit, &table))
                .collect()
        } else {
            units
                .par_iter()
                .flat_map_iter(|unit| {
                    let table = collect_constants(std::slice::from_ref(unit));
                    self.check_unit(unit, &table)
                })
                .collect()
        };

        // Parallel collection is unordered.
        diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.range.start.line.cmp(&b.range.start.line))
                .then_with(|| a.range.start.col.cmp(&b.range.start.col))
                .then_with(|| a.rule.cmp(&b.rule))
        });

        if let Some(max) = self.config.max_diagnostics {
            if diagnostics.len() > max {
                debug!("Truncating {} diagnostic(s) to {}", diagnostics.len(), max);
                diagnostics.truncate(max);
            }
        }

        info!("Found {} issue(s)", diagnostics.len());
        diagnostics
    }

    /// Check one unit against an already frozen table.
    pub fn check_unit(&self, unit: &SourceUnit, table: &ConstantTable) -> Vec<Diagnostic> {
        let rules: Vec<&dyn Rule> = self.rules.iter().map(|r| r.as_ref()).collect();
        let mut visitor = RuleVisitor::new(&unit.path, table, &rules);
        walk_unit(&unit.stmts, &mut visitor);

        let mut diagnostics = visitor.into_diagnostics();
        for diag in &mut diagnostics {
            diag.severity = self.config.severity_for(diag.rule);
        }
        debug!("{}: {} diagnostic(s)", unit.path.display(), diagnostics.len());
        diagnostics
    }

    /// Write `diagnostics` in the configured format.
    pub fn write_report<W: Write>(&self, w: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
        write_diagnostics(w, diagnostics, self.config.output_format.unwrap_or_default())
    }

    /// Load JSON-serialized units from `paths` and check them.
    pub fn check_paths(&self, paths: &[PathBuf]) -> Result<Vec<Diagnostic>> {
        let units = load_units(paths)?;
        Ok(self.check(&units))
    }
}

// ---------------------------------------------------------------------------
// Unit loading
// ---------------------------------------------------------------------------

/// Read one JSON-serialized [`SourceUnit`].
pub fn load_unit(path: &Path) -> Result<SourceUnit> {
    let content = fs::read_to_string(path).map_err(|source| LintError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LintError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read JSON-serialized units in parallel. Fails on the first unreadable file.
pub fn load_units(paths: &[PathBuf]) -> Result<Vec<SourceUnit>> {
    let units = paths
        .par_iter()
        .map(|p| load_unit(p))
        .collect::<Result<Vec<_>>>()?;
    debug!("Loaded {} unit(s)", units.len());
    Ok(units)
}
