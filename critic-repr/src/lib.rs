//! Syntax tree representation for php-critic.
//!
//! The analysis engines never parse source text. A host parser produces these
//! nodes (directly, or as JSON through serde) and hands whole compilation
//! units to the lint engine.

pub mod builder;
mod location;
mod node;
mod operators;
mod unit;

pub use location::{Pos, Range, WithLoc};
pub use node::{
    Case, ConstDecl, ElseIf, Expr, Expr_, Name, QuoteStyle, Stmt, Stmt_, StringLit, VarName,
};
pub use operators::{BinaryOp, UnaryOp};
pub use unit::SourceUnit;
