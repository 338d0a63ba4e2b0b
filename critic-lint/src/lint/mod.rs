//! PHP check infrastructure.

mod checks;
mod context;
mod engine;
pub mod index;
mod output;
mod rules;
pub mod walker;

pub use checks::{
    ArgOrderRule, BadCallRule, BadCondRule, DupArgRule, DupBranchBodyRule, DupSubExprRule,
    SimplifyRule, SloppyArgRule,
};
pub use context::CheckContext;
pub use engine::{load_unit, load_units, LintConfig, LintEngine, RuleVisitor};
pub use index::{collect_constants, ConstantIndexer};
pub use output::{write_diagnostics, LintSummary, OutputFormat};
pub use rules::{Diagnostic, DiagnosticSeverity, Rule, RuleCode};
pub use walker::{walk_unit, Visitor};
