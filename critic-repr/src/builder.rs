//! Constructors for synthetic nodes.
//!
//! Hosts that already own a parser convert into these types directly; the
//! helpers here keep hand-built trees (tests, benchmarks, fixtures) readable.
//! Every node is created with a synthetic range; use [`WithLoc::with_range`]
//! or [`at`] to attach a position.

use super::location::{Pos, WithLoc};
use super::node::{Case, ConstDecl, ElseIf, Expr, Expr_, Name, Stmt, Stmt_, StringLit, VarName};
use super::operators::{BinaryOp, UnaryOp};

/// Attach a single-point position to a node.
pub fn at<T>(node: WithLoc<T>, line: u32, col: u32) -> WithLoc<T> {
    let value = node.into_inner();
    WithLoc::at(value, Pos::new(line, col))
}

/// Integer literal from its source text.
pub fn int(raw: impl Into<String>) -> Expr {
    Expr_::Lnumber(raw.into()).into()
}

/// Float literal from its source text.
pub fn float(raw: impl Into<String>) -> Expr {
    Expr_::Dnumber(raw.into()).into()
}

/// Double-quoted string literal; `body` is the text between the quotes.
pub fn dq(body: &str) -> Expr {
    Expr_::String(StringLit::new(format!("\"{body}\""))).into()
}

/// Single-quoted string literal; `body` is the text between the quotes.
pub fn sq(body: &str) -> Expr {
    Expr_::String(StringLit::new(format!("'{body}'"))).into()
}

/// Variable `$name` (pass the name without the sigil).
pub fn var(name: impl Into<String>) -> Expr {
    Expr_::Variable(VarName::Ident(name.into())).into()
}

/// Dynamic variable `$$inner`.
pub fn var_var(inner: Expr) -> Expr {
    Expr_::Variable(VarName::Dynamic(Box::new(inner))).into()
}

/// Bare identifier.
pub fn ident(text: impl Into<String>) -> Expr {
    Expr_::Identifier(text.into()).into()
}

/// Named constant reference; accepts `FOO`, `Ns\FOO` and `\Ns\FOO`.
pub fn constant(name: &str) -> Expr {
    Expr_::ConstFetch(Name::parse(name)).into()
}

/// Unary operation.
pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr_::Unary(op, Box::new(operand)).into()
}

/// Binary operation.
pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr_::Binary(op, Box::new(lhs), Box::new(rhs)).into()
}

/// Index access `base[dim]`.
pub fn index(base: Expr, dim: Expr) -> Expr {
    Expr_::Index {
        base: Box::new(base),
        dim: Some(Box::new(dim)),
    }
    .into()
}

/// Plain call argument.
pub fn arg(value: Expr) -> Expr {
    Expr_::Argument {
        value: Box::new(value),
        variadic: false,
        by_ref: false,
    }
    .into()
}

/// Call of a named function; arguments are wrapped automatically.
pub fn call(function: &str, args: Vec<Expr>) -> Expr {
    Expr_::Call {
        func: Box::new(Expr_::Name(Name::parse(function)).into()),
        args: args.into_iter().map(arg).collect(),
    }
    .into()
}

/// Assignment `target = value`.
pub fn assign(target: Expr, value: Expr) -> Expr {
    Expr_::Assign(Box::new(target), Box::new(value)).into()
}

/// Expression statement.
pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt_::Expr(expr).into()
}

/// Braced block.
pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt_::Block(stmts).into()
}

/// `if` statement with optional `elseif` arms and `else` body.
pub fn if_stmt(cond: Expr, body: Stmt, elseifs: Vec<(Expr, Stmt)>, else_: Option<Stmt>) -> Stmt {
    Stmt_::If {
        cond,
        body: Box::new(body),
        elseifs: elseifs
            .into_iter()
            .map(|(cond, body)| ElseIf { cond, body })
            .collect(),
        else_: else_.map(Box::new),
    }
    .into()
}

/// `do body while (cond);`
pub fn do_while(body: Stmt, cond: Expr) -> Stmt {
    Stmt_::DoWhile {
        body: Box::new(body),
        cond,
    }
    .into()
}

/// `switch` statement; a `None` case condition is `default:`.
pub fn switch(subject: Expr, cases: Vec<(Option<Expr>, Vec<Stmt>)>) -> Stmt {
    Stmt_::Switch {
        subject,
        cases: cases
            .into_iter()
            .map(|(cond, body)| Case { cond, body })
            .collect(),
    }
    .into()
}

/// `const NAME = value;`
pub fn const_stmt(name: &str, value: Expr) -> Stmt {
    Stmt_::Const(vec![ConstDecl {
        name: WithLoc::synthetic(name.to_owned()),
        value,
    }])
    .into()
}

/// `namespace Name;`
pub fn namespace(name: &str) -> Stmt {
    Stmt_::Namespace {
        name: Some(Name::parse(name)),
        body: None,
    }
    .into()
}

/// `namespace Name { body }`
pub fn namespace_block(name: &str, body: Vec<Stmt>) -> Stmt {
    Stmt_::Namespace {
        name: Some(Name::parse(name)),
        body: Some(body),
    }
    .into()
}
