//! Constant symbol table.
//!
//! The table maps canonical constant names to their *defining expressions*.
//! Values are never stored: folding happens on lookup, so a constant can be
//! referenced before the statement that defines it.
//!
//! The write phase and the read phase are separate types. Constants are
//! collected into a [`ConstantTableBuilder`]; [`ConstantTableBuilder::freeze`]
//! turns it into a [`ConstantTable`], which has no mutating methods and is
//! the only form the evaluator accepts.

use critic_repr::{Expr, Name};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Canonical key for `name` declared or referenced in `namespace`.
///
/// Keys always start with `\`. `namespace` is the enclosing namespace as
/// text (`""` for the global one); surrounding separators are ignored.
///
/// ```
/// use php_critic::constant::qualify;
///
/// assert_eq!(qualify("", "FOO"), r"\FOO");
/// assert_eq!(qualify(r"\App\Config", "DEBUG"), r"\App\Config\DEBUG");
/// ```
#[must_use]
pub fn qualify(namespace: &str, name: &str) -> String {
    let namespace = namespace.trim_matches('\\');
    let name = name.trim_start_matches('\\');
    if namespace.is_empty() {
        format!("\\{name}")
    } else {
        format!("\\{namespace}\\{name}")
    }
}

/// Candidate keys for a constant reference, most specific first.
///
/// Fully qualified names resolve to themselves. Qualified names resolve
/// relative to the namespace. Unqualified names try the current namespace
/// and then fall back to the global one, as the runtime does.
#[must_use]
pub fn resolve_candidates(namespace: &str, name: &Name) -> Vec<String> {
    let joined = name.joined();
    if name.fully_qualified {
        return vec![qualify("", &joined)];
    }
    let local = qualify(namespace, &joined);
    if name.parts.len() == 1 && !namespace.trim_matches('\\').is_empty() {
        vec![local, qualify("", &joined)]
    } else {
        vec![local]
    }
}

/// One recorded definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDef {
    /// Defining expression, unevaluated.
    pub expr: Expr,
    /// Namespace the definition appeared in. Names inside `expr` resolve
    /// against it, not against the namespace of the reference.
    pub namespace: String,
}

/// Write-phase constant table.
#[derive(Debug, Default, Clone)]
pub struct ConstantTableBuilder {
    entries: FxHashMap<String, ConstantDef>,
}

impl ConstantTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `qualified` to `expr`, defined in the global namespace.
    /// The last definition of a name wins.
    pub fn define(&mut self, qualified: &str, expr: Expr) {
        self.define_in(qualified, expr, "");
    }

    /// Bind `qualified` to `expr` defined inside `namespace`.
    pub fn define_in(&mut self, qualified: &str, expr: Expr, namespace: &str) {
        let key = qualify("", qualified);
        let def = ConstantDef {
            expr,
            namespace: namespace.trim_matches('\\').to_owned(),
        };
        if self.entries.insert(key.clone(), def).is_some() {
            trace!("Constant {} redefined, keeping the last definition", key);
        }
    }

    /// Defining expression of `qualified`, if any.
    #[must_use]
    pub fn lookup(&self, qualified: &str) -> Option<&Expr> {
        self.entries.get(&qualify("", qualified)).map(|d| &d.expr)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End the write phase.
    #[must_use]
    pub fn freeze(self) -> ConstantTable {
        ConstantTable {
            entries: self.entries,
        }
    }
}

/// Read-only constant table.
#[derive(Debug, Default, Clone)]
pub struct ConstantTable {
    entries: FxHashMap<String, ConstantDef>,
}

impl ConstantTable {
    /// A table with no constants.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Defining expression of `qualified`, if any.
    #[must_use]
    pub fn lookup(&self, qualified: &str) -> Option<&Expr> {
        self.get(qualified).map(|d| &d.expr)
    }

    /// Full definition of `qualified`, if any.
    #[must_use]
    pub fn get(&self, qualified: &str) -> Option<&ConstantDef> {
        if qualified.starts_with('\\') {
            self.entries.get(qualified)
        } else {
            self.entries.get(&qualify("", qualified))
        }
    }

    #[must_use]
    pub fn contains(&self, qualified: &str) -> bool {
        self.get(qualified).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
