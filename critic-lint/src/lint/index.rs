//! Constant collection pass.
//!
//! Records every `const NAME = expr;` declaration and every
//! `define(NAME, expr)` call into a [`ConstantTableBuilder`]. Values are
//! stored unevaluated; folding happens when a check looks a name up.

use critic_repr::{Expr, Expr_, SourceUnit, Stmt, Stmt_};
use php_critic::constant::{decode_literal, qualify};
use php_critic::{ConstantTable, ConstantTableBuilder};
use tracing::{debug, trace};

use super::checks::argument_value;
use super::walker::{walk_unit, Visitor};

/// Visitor that fills a builder.
pub struct ConstantIndexer<'b> {
    builder: &'b mut ConstantTableBuilder,
}

impl<'b> ConstantIndexer<'b> {
    pub fn new(builder: &'b mut ConstantTableBuilder) -> Self {
        Self { builder }
    }

    /// Add the constants of one unit.
    pub fn index_unit(&mut self, unit: &SourceUnit) {
        walk_unit(&unit.stmts, self);
    }

    fn index_define(&mut self, args: &[Expr], namespace: &str) {
        let [name, value, ..] = args else {
            trace!("define() with {} argument(s), skipped", args.len());
            return;
        };
        let (Some(name), Some(value)) = (argument_value(name), argument_value(value)) else {
            return;
        };
        let Some(key) = define_key(name, namespace) else {
            trace!("define() with a dynamic name, skipped");
            return;
        };
        self.builder.define_in(&key, value.clone(), namespace);
    }
}

/// Canonical key for the first argument of `define`.
///
/// A string names a global constant no matter where the call appears.
fn define_key(name: &Expr, namespace: &str) -> Option<String> {
    match &name.value {
        Expr_::String(lit) => {
            let bytes = decode_literal(lit)?;
            let text = String::from_utf8(bytes).ok()?;
            Some(qualify("", &text))
        }
        Expr_::Identifier(text) => Some(qualify(namespace, text)),
        Expr_::Name(name) | Expr_::ConstFetch(name) if name.fully_qualified => {
            Some(qualify("", &name.joined()))
        }
        Expr_::Name(name) | Expr_::ConstFetch(name) => Some(qualify(namespace, &name.joined())),
        _ => None,
    }
}

impl Visitor for ConstantIndexer<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt, namespace: &str) {
        if let Stmt_::Const(decls) = &stmt.value {
            for decl in decls {
                let key = qualify(namespace, &decl.name.value);
                self.builder.define_in(&key, decl.value.clone(), namespace);
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr, namespace: &str) {
        let Some(target) = expr.value.call_target() else {
            return;
        };
        if target.is_function("define") {
            self.index_define(expr.value.call_args(), namespace);
        }
    }
}

/// Collect the constants of `units` into one frozen table.
pub fn collect_constants(units: &[SourceUnit]) -> ConstantTable {
    let mut builder = ConstantTableBuilder::new();
    let mut indexer = ConstantIndexer::new(&mut builder);
    for unit in units {
        indexer.index_unit(unit);
    }
    debug!("Indexed {} constant(s) from {} unit(s)", builder.len(), units.len());
    builder.freeze()
}
