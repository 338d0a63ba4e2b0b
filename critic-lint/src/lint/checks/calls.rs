//! Builtin call misuse: CRT005 to CRT008.

use critic_repr::{BinaryOp, Expr, Expr_};
use php_critic::Value;

use super::{argument_value, call_to};
use crate::lint::context::CheckContext;
use crate::lint::rules::{Diagnostic, Rule, RuleCode};

/// CRT005: `strcmp($a, $b) < 0` reads better as `$a < $b`.
pub struct SimplifyRule;

impl SimplifyRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimplifyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SimplifyRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT005
    }

    fn check_expr(&self, expr: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        let Expr_::Binary(op, lhs, rhs) = &expr.value else {
            return;
        };
        if !matches!(op, BinaryOp::Greater | BinaryOp::Smaller | BinaryOp::Identical) {
            return;
        }
        if ctx.fold(rhs) != Value::Int(0) || call_to(lhs, "strcmp").is_none() {
            return;
        }
        let sym = op.as_symbol();
        out.push(ctx.diagnostic(
            RuleCode::CRT005,
            expr.range,
            format!("can replace 'strcmp(s1, s2) {sym} 0' with 's1 {sym} s2'"),
        ));
    }
}

/// CRT006: `strncmp($s, "abc", 4)`.
pub struct BadCallRule;

impl BadCallRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BadCallRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for BadCallRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT006
    }

    fn check_expr(&self, expr: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        let Some([s1, s2, len_arg]) = call_to(expr, "strncmp") else {
            return;
        };
        let len_of = |arg: &Expr| match ctx.fold(arg) {
            Value::String(bytes) => Some(bytes.len()),
            _ => None,
        };
        let expected = match (len_of(s1), len_of(s2)) {
            (Some(a), Some(b)) => a.min(b),
            (Some(n), None) | (None, Some(n)) => n,
            (None, None) => return,
        };
        let Value::Int(actual) = ctx.fold(len_arg) else {
            return;
        };
        if usize::try_from(actual).ok() != Some(expected) {
            out.push(ctx.diagnostic(
                RuleCode::CRT006,
                len_arg.range,
                format!("expected length arg to be {expected}, got {actual}"),
            ));
        }
    }
}

/// CRT007: `define('X', 1, true)`.
pub struct SloppyArgRule;

impl SloppyArgRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SloppyArgRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SloppyArgRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT007
    }

    fn check_expr(&self, expr: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        if let Some([_, _, flag, ..]) = call_to(expr, "define") {
            out.push(ctx.diagnostic(
                RuleCode::CRT007,
                flag.range,
                "don't use case_insensitive argument",
            ));
        }
    }
}

/// CRT008: `strpos('needle', $haystack)`.
pub struct ArgOrderRule;

impl ArgOrderRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArgOrderRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ArgOrderRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT008
    }

    fn check_expr(&self, expr: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        let Some([haystack, needle]) = call_to(expr, "strpos") else {
            return;
        };
        let (Some(haystack), Some(needle)) = (argument_value(haystack), argument_value(needle))
        else {
            return;
        };
        if haystack.value.is_string_literal() && !needle.value.is_string_literal() {
            out.push(ctx.diagnostic(RuleCode::CRT008, expr.range, "suspicious args order"));
        }
    }
}
