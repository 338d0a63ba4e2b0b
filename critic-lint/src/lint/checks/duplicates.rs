//! Copy-paste detectors: CRT002, CRT003 and CRT004.

use critic_repr::{BinaryOp, Expr, Expr_, Stmt, Stmt_};
use php_critic::{same_node, same_simple_expr};

use super::call_to;
use crate::lint::context::CheckContext;
use crate::lint::rules::{Diagnostic, Rule, RuleCode};

/// Operators whose result is constant when both sides are the same.
const DUP_OPERAND_OPS: &[BinaryOp] = &[
    BinaryOp::Div,
    BinaryOp::Mod,
    BinaryOp::Minus,
    BinaryOp::NotIdentical,
    BinaryOp::NotEqual,
    BinaryOp::Identical,
    BinaryOp::Equal,
    BinaryOp::Smaller,
    BinaryOp::SmallerOrEqual,
    BinaryOp::GreaterOrEqual,
    BinaryOp::Greater,
];

/// Builtins for which equal first and second arguments make no sense.
const DUP_ARG_FUNCTIONS: &[&str] = &["strpos", "strncmp", "strcmp", "min", "max", "str_replace"];

/// CRT002: `$a - $a`, `$i == $i` and friends.
pub struct DupSubExprRule;

impl DupSubExprRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DupSubExprRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DupSubExprRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT002
    }

    fn check_expr(&self, expr: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        let Expr_::Binary(op, lhs, rhs) = &expr.value else {
            return;
        };
        if DUP_OPERAND_OPS.contains(op) && same_simple_expr(lhs, rhs) {
            out.push(ctx.diagnostic(
                RuleCode::CRT002,
                expr.range,
                format!("suspiciously duplicated LHS and RHS of '{}'", op.as_symbol()),
            ));
        }
    }
}

/// CRT003: `strcmp($s, $s)`.
pub struct DupArgRule;

impl DupArgRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DupArgRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DupArgRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT003
    }

    fn check_expr(&self, expr: &Expr, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        let Some(args) = DUP_ARG_FUNCTIONS.iter().find_map(|f| call_to(expr, f)) else {
            return;
        };
        if let [first, second, ..] = args {
            if same_simple_expr(first, second) {
                out.push(ctx.diagnostic(
                    RuleCode::CRT003,
                    first.range,
                    "suspiciously duplicated argument",
                ));
            }
        }
    }
}

/// CRT004: two arms of one `if` chain doing the same thing.
pub struct DupBranchBodyRule;

impl DupBranchBodyRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DupBranchBodyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DupBranchBodyRule {
    fn code(&self) -> RuleCode {
        RuleCode::CRT004
    }

    fn check_stmt(&self, stmt: &Stmt, ctx: &CheckContext<'_>, out: &mut Vec<Diagnostic>) {
        let Stmt_::If {
            body,
            elseifs,
            else_,
            ..
        } = &stmt.value
        else {
            return;
        };

        let bodies: Vec<&Stmt> = std::iter::once(body.as_ref())
            .chain(elseifs.iter().map(|e| &e.body))
            .chain(else_.as_deref())
            .collect();

        for (i, first) in bodies.iter().enumerate() {
            for (j, second) in bodies.iter().enumerate().skip(i + 1) {
                if same_node(*first, *second) {
                    out.push(ctx.diagnostic(
                        RuleCode::CRT004,
                        stmt.range,
                        format!("duplicated <{i}> and <{j}> bodies"),
                    ));
                }
            }
        }
    }
}
