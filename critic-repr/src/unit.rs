//! Compilation units.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::node::Stmt;

/// One parsed source file: the unit of constant collection and checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Path the host parsed the tree from.
    pub path: PathBuf,
    /// Top-level statements in source order.
    pub stmts: Vec<Stmt>,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, stmts: Vec<Stmt>) -> Self {
        Self {
            path: path.into(),
            stmts,
        }
    }
}
