//! Structural expression equivalence.
//!
//! Two predicates with different recall:
//!
//! - [`same_simple_expr`] accepts only a short allow-list of shapes whose
//!   equality implies equal runtime values. Everything else, including two
//!   textually identical calls or arithmetic expressions, is "not provably
//!   equal". Used on small sub-expressions where a false positive would be
//!   noise.
//! - [`same_node`] also accepts full deep equality. Used on whole statement
//!   bodies.
//!
//! Neither looks at source ranges: located nodes compare by value only.

use critic_repr::{BinaryOp, Expr, Expr_, Stmt, Stmt_, VarName};

/// Are `a` and `b` guaranteed to evaluate to the same value?
///
/// Recognized shapes:
/// - variables with the same name (dynamic names recurse)
/// - identifiers with the same text
/// - integer literals with the same *source text* (`0x10` and `16` differ)
/// - index accesses with equivalent base and dimension
/// - call arguments with the same spread/reference flags and equivalent values
/// - `!=` comparisons with pairwise equivalent operands
#[must_use]
pub fn same_simple_expr(a: &Expr, b: &Expr) -> bool {
    match (&a.value, &b.value) {
        (
            Expr_::Argument {
                value: x,
                variadic: xv,
                by_ref: xr,
            },
            Expr_::Argument {
                value: y,
                variadic: yv,
                by_ref: yr,
            },
        ) => xv == yv && xr == yr && same_simple_expr(x, y),
        (
            Expr_::Index {
                base: xb,
                dim: Some(xd),
            },
            Expr_::Index {
                base: yb,
                dim: Some(yd),
            },
        ) => same_simple_expr(xb, yb) && same_simple_expr(xd, yd),
        (Expr_::Variable(x), Expr_::Variable(y)) => match (x, y) {
            (VarName::Ident(x), VarName::Ident(y)) => x == y,
            (VarName::Dynamic(x), VarName::Dynamic(y)) => same_simple_expr(x, y),
            _ => false,
        },
        (Expr_::Identifier(x), Expr_::Identifier(y)) => x == y,
        (Expr_::Lnumber(x), Expr_::Lnumber(y)) => x == y,
        (
            Expr_::Binary(BinaryOp::NotEqual, xl, xr),
            Expr_::Binary(BinaryOp::NotEqual, yl, yr),
        ) => same_simple_expr(xl, yl) && same_simple_expr(xr, yr),
        _ => false,
    }
}

/// A node [`same_node`] can compare.
pub trait SyntaxNode: PartialEq {
    /// The node as an expression, when it is one.
    fn as_expr(&self) -> Option<&Expr>;
}

impl SyntaxNode for Expr {
    fn as_expr(&self) -> Option<&Expr> {
        Some(self)
    }
}

impl SyntaxNode for Stmt {
    fn as_expr(&self) -> Option<&Expr> {
        match &self.value {
            Stmt_::Expr(e) => Some(e),
            _ => None,
        }
    }
}

/// [`same_simple_expr`] or full structural equality.
#[must_use]
pub fn same_node<N: SyntaxNode>(a: &N, b: &N) -> bool {
    let simple = match (a.as_expr(), b.as_expr()) {
        (Some(x), Some(y)) => same_simple_expr(x, y),
        _ => false,
    };
    simple || a == b
}
