//! Per-node view handed to rules.

use std::path::Path;

use critic_repr::{Expr, Range};
use php_critic::{ConstantTable, Folder, Value};

use super::rules::{Diagnostic, RuleCode};

/// What a rule knows about the node it is looking at.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    file: &'a Path,
    folder: Folder<'a>,
}

impl<'a> CheckContext<'a> {
    pub fn new(file: &'a Path, table: &'a ConstantTable, namespace: &'a str) -> Self {
        Self {
            file,
            folder: Folder::new(table).with_namespace(namespace),
        }
    }

    /// File being checked.
    pub fn file(&self) -> &'a Path {
        self.file
    }

    /// Namespace enclosing the current node (`""` for the global one).
    pub fn namespace(&self) -> &'a str {
        self.folder.namespace()
    }

    /// Fold `expr` against the frozen constant table.
    pub fn fold(&self, expr: &Expr) -> Value {
        self.folder.fold(expr)
    }

    /// Build a diagnostic for this file.
    pub fn diagnostic(
        &self,
        rule: RuleCode,
        range: Range,
        message: impl Into<String>,
    ) -> Diagnostic {
        Diagnostic::new(rule, self.file, range, message)
    }
}
