//! Expression evaluator.
//!
//! [`Folder`] reduces an expression to a [`Value`] against a frozen
//! [`ConstantTable`]. Both operands of every operator are folded before the
//! operator is applied; only the result of `&&`/`||` short-circuits, never
//! the evaluation. Calls, variables and every shape without a folding rule
//! are `Unknown`.
//!
//! Named constants are resolved through the table and their defining
//! expressions are folded recursively, in the namespace they were defined
//! in. A name that is reached again while its own definition is being
//! folded is a cycle and folds to `Unknown`. Resolution deeper than
//! [`MAX_CONSTANT_DEPTH`] also folds to `Unknown`.
//!
//! Within one call, a constant whose result does not depend on the path it
//! was reached through is folded once and memoized, so shared definitions
//! stay linear.

use critic_repr::{Expr, Expr_, Name};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::ops;
use super::strings::decode_literal;
use super::symbols::{resolve_candidates, ConstantTable};
use super::value::Value;

/// Longest chain of constant references followed before giving up.
pub const MAX_CONSTANT_DEPTH: usize = 256;

/// Constant evaluator bound to a table and a namespace context.
#[derive(Debug, Clone, Copy)]
pub struct Folder<'a> {
    table: &'a ConstantTable,
    namespace: &'a str,
}

/// Per-call resolution state.
#[derive(Default)]
struct Resolution {
    /// Constants being folded, with their depth on the resolution stack.
    visiting: FxHashMap<String, usize>,
    /// Results that hold no matter where resolution started.
    memo: FxHashMap<String, Value>,
    /// Shallowest stack depth a cycle jumped back to in the current subtree.
    cycle_floor: usize,
    /// Set once [`MAX_CONSTANT_DEPTH`] was hit. Nothing is memoized after.
    exhausted: bool,
}

impl<'a> Folder<'a> {
    /// Evaluator for code in the global namespace.
    #[must_use]
    pub fn new(table: &'a ConstantTable) -> Self {
        Self {
            table,
            namespace: "",
        }
    }

    /// Same table, different namespace context.
    #[must_use]
    pub fn with_namespace(self, namespace: &'a str) -> Self {
        Self { namespace, ..self }
    }

    #[must_use]
    pub fn namespace(&self) -> &'a str {
        self.namespace
    }

    #[must_use]
    pub fn table(&self) -> &'a ConstantTable {
        self.table
    }

    /// Fold `expr`. Total and deterministic for a given table.
    #[must_use]
    pub fn fold(&self, expr: &Expr) -> Value {
        let mut state = Resolution {
            cycle_floor: usize::MAX,
            ..Resolution::default()
        };
        self.fold_expr(expr, self.namespace, &mut state)
    }

    fn fold_expr(&self, expr: &Expr, namespace: &str, state: &mut Resolution) -> Value {
        match &expr.value {
            Expr_::Argument { value, .. } => self.fold_expr(value, namespace, state),
            Expr_::Lnumber(raw) => parse_int(raw).map_or(Value::Unknown, Value::Int),
            Expr_::Dnumber(raw) => parse_float(raw).map_or(Value::Unknown, Value::Float),
            Expr_::String(lit) => decode_literal(lit).map_or(Value::Unknown, Value::String),
            Expr_::Unary(op, operand) => {
                let x = self.fold_expr(operand, namespace, state);
                ops::unary(*op, &x)
            }
            Expr_::Binary(op, lhs, rhs) => {
                let x = self.fold_expr(lhs, namespace, state);
                let y = self.fold_expr(rhs, namespace, state);
                ops::binary(*op, &x, &y)
            }
            Expr_::ConstFetch(name) => self.fold_constant(name, namespace, state),
            Expr_::Variable(_)
            | Expr_::Identifier(_)
            | Expr_::Name(_)
            | Expr_::ClassConstFetch { .. }
            | Expr_::Ternary { .. }
            | Expr_::Assign(..)
            | Expr_::Index { .. }
            | Expr_::PropertyFetch { .. }
            | Expr_::Array(_)
            | Expr_::Call { .. } => Value::Unknown,
        }
    }

    fn fold_constant(&self, name: &Name, namespace: &str, state: &mut Resolution) -> Value {
        for key in resolve_candidates(namespace, name) {
            let Some(def) = self.table.get(&key) else {
                continue;
            };
            if let Some(value) = state.memo.get(&key) {
                return value.clone();
            }
            if let Some(&depth) = state.visiting.get(&key) {
                debug!("Cyclic constant definition through {}", key);
                state.cycle_floor = state.cycle_floor.min(depth);
                return Value::Unknown;
            }
            if state.exhausted {
                return Value::Unknown;
            }
            let depth = state.visiting.len();
            if depth >= MAX_CONSTANT_DEPTH {
                debug!("Constant {} nested deeper than {}", key, MAX_CONSTANT_DEPTH);
                state.exhausted = true;
                return Value::Unknown;
            }

            state.visiting.insert(key.clone(), depth);
            let outer_floor = std::mem::replace(&mut state.cycle_floor, usize::MAX);
            let value = self.fold_expr(&def.expr, &def.namespace, state);
            state.visiting.remove(&key);

            // A cycle back to an ancestor makes the result path dependent.
            if state.cycle_floor >= depth && !state.exhausted {
                state.memo.insert(key, value.clone());
            }
            state.cycle_floor = state.cycle_floor.min(outer_floor);
            return value;
        }
        builtin_constant(name).unwrap_or(Value::Unknown)
    }
}

/// Fold `expr` in the global namespace.
#[must_use]
pub fn fold(expr: &Expr, table: &ConstantTable) -> Value {
    Folder::new(table).fold(expr)
}

/// Fold `expr` as if it appeared inside `namespace`.
#[must_use]
pub fn fold_in(expr: &Expr, table: &ConstantTable, namespace: &str) -> Value {
    Folder::new(table).with_namespace(namespace).fold(expr)
}

/// `true` and `false`, unless the table defines them.
fn builtin_constant(name: &Name) -> Option<Value> {
    let [only] = name.parts.as_slice() else {
        return None;
    };
    if only.eq_ignore_ascii_case("true") {
        Some(Value::Bool(true))
    } else if only.eq_ignore_ascii_case("false") {
        Some(Value::Bool(false))
    } else {
        None
    }
}

/// Parse an integer literal: decimal, `0x`, `0b`, `0o` or leading-zero
/// octal, with optional `_` separators. Out-of-range literals fail.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(|&c| c != '_').collect();
    let (radix, body) = if let Some(rest) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, rest)
    } else if let Some(rest) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (2, rest)
    } else if let Some(rest) = digits
        .strip_prefix("0o")
        .or_else(|| digits.strip_prefix("0O"))
    {
        (8, rest)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits.as_str())
    };
    // from_str_radix accepts a sign, literals never carry one.
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    i64::from_str_radix(body, radix).ok()
}

/// Parse a float literal with optional `_` separators.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|&c| c != '_').collect();
    // Rejects `inf`, `NaN` and signs, which str::parse would accept.
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse().ok()
}
