//! php-critic: the analysis engines behind the critic checks.
//!
//! - [`constant`]: conservative constant folding over PHP expressions,
//!   including named constant resolution and string literal decoding.
//! - [`equivalence`]: structural "same value" predicates used to find
//!   duplicated sub-expressions and branch bodies.
//!
//! Both engines are pure and never fail. Whatever cannot be proven is
//! [`Value::Unknown`] or `false`.

pub mod constant;
pub mod equivalence;

pub use constant::{fold, fold_in, ConstantTable, ConstantTableBuilder, Folder, Value};
pub use equivalence::{same_node, same_simple_expr, SyntaxNode};

/// Re-exported syntax tree crate.
pub use critic_repr as repr;
