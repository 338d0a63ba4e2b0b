//! CRT001: conditions whose value is known before the program runs.
//!
//! Three sources of findings:
//!
//! - a comparison or logical expression that folds to a boolean;
//! - the condition of a `do ... while` loop or a `case` label that folds
//!   to a boolean;
//! - a logical expression that does not fold but combines two tests on the
//!   same operand that cannot hold together (`$x == 1 && $x == 2`) or
//!   cannot both fail (`$x != 1 || $x != 2`).

use critic_repr::{BinaryOp, Expr, Expr_, Stmt, Stmt_};
use php_critic::constant::ops;
use php_critic::{same_simple_expr, Value};

use crate::lint::context::CheckContext;
use crate::lint::rules::{Diagnostic, Rule, RuleCode};

const ALWAYS_TRUE: &str = "always true condition";
const ALWAYS_FALSE: &str = "always false condition";

pub struct BadCondRule;

impl BadCondRule {
    pub fn new() -> Self {
        Self
    }

    /// Report `cond` when it folds to a boolean. Returns whether it did.
    fn check_folded(&self, cond: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) -> bool {
        match ctx.fold(cond) {
            Value::Bool(value) => {
                let message = if value { ALWAYS_TRUE } else { ALWAYS_FALSE };
                out.push(ctx.diagnostic(RuleCode::CRT001, cond.range, message));
                true
            }
            _ => false,
        }
    }

    fn check_conjunction(
        &self,
        cond: &Expr,
        lhs: &Expr,
        rhs: &Expr,
        ctx: &CheckContext<'_>,
        out: &mut Vec<Diagnostic>,
    ) {
        // $x < A && $x > B with A < B
        if let Some((a, b)) = paired_tests(lhs, BinaryOp::Smaller, rhs, BinaryOp::Greater) {
            if ops::less_than(&ctx.fold(a), &ctx.fold(b)) == Value::Bool(true) {
                out.push(ctx.diagnostic(RuleCode::CRT001, cond.range, ALWAYS_FALSE));
            }
        }
        // $x == A && $x == B with A != B
        if let Some((a, b)) = paired_tests(lhs, BinaryOp::Equal, rhs, BinaryOp::Equal) {
            if ops::equal(&ctx.fold(a), &ctx.fold(b)) == Value::Bool(false) {
                out.push(ctx.diagnostic(RuleCode::CRT001, cond.range, ALWAYS_FALSE));
            }
        }
    }

    fn check_disjunction(
        &self,
        cond: &Expr,
        lhs: &Expr,
        rhs: &Expr,
        ctx: &CheckContext<'_>,
        out: &mut Vec<Diagnostic>,
    ) {
        // $x != A || $x != B with A != B
        if let Some((a, b)) = paired_tests(lhs, BinaryOp::NotEqual, rhs, BinaryOp::NotEqual) {
            if ops::equal(&ctx.fold(a), &ctx.fold(b)) == Value::Bool(false) {
                out.push(ctx.diagnostic(RuleCode::CRT001, cond.range, ALWAYS_TRUE));
            }
        }
    }
}

impl Default for BadCondRule {
    fn default() -> Self {
        Self::new()
    }
}

/// For `lhs = X lop A` and `rhs = Y rop B` with `X` and `Y` the same simple
/// expression, the two right-hand sides `(A, B)`.
fn paired_tests<'e>(
    lhs: &'e Expr,
    lop: BinaryOp,
    rhs: &'e Expr,
    rop: BinaryOp,
) -> Option<(&'e Expr, &'e Expr)> {
    let Expr_::Binary(op, x, a) = &lhs.value else {
        return None;
    };
    if *op != lop {
        return None;
    }
    let Expr_::Binary(op, y, b) = &rhs.value else {
        return None;
    };
    if *op != rop || !same_simple_expr(x, y) {
        return None;
    }
    Some((a, b))
}

impl Rule for BadCondRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT001
    }

    fn check_expr(&self, expr: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        let Expr_::Binary(op, lhs, rhs) = &expr.value else {
            return;
        };
        if op.is_comparison() {
            self.check_folded(expr, ctx, out);
        } else if op.is_conjunction() {
            if !self.check_folded(expr, ctx, out) {
                self.check_conjunction(expr, lhs, rhs, ctx, out);
            }
        } else if op.is_disjunction() && !self.check_folded(expr, ctx, out) {
            self.check_disjunction(expr, lhs, rhs, ctx, out);
        }
    }

    fn check_stmt(&self, stmt: &Stmt, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        match &stmt.value {
            Stmt_::DoWhile { cond, .. } => {
                self.check_folded(cond, ctx, out);
            }
            Stmt_::Switch { subject, cases } => {
                // switch (true) { case $x > 0: ... } is an idiom, not a mistake.
                if matches!(ctx.fold(subject), Value::Bool(_)) {
                    return;
                }
                for cond in cases.iter().filter_map(|case| case.cond.as_ref()) {
                    self.check_folded(cond, ctx, out);
                }
            }
            _ => {}
        }
    }
}
