//! Check catalog.
//!
//! - [`conditions`]: CRT001 statically known conditions
//! - [`duplicates`]: CRT002 to CRT004 duplicated operands, arguments and bodies
//! - [`calls`]: CRT005 to CRT008 misuse of string and definition builtins

mod calls;
mod conditions;
mod duplicates;

pub use calls::{ArgOrderRule, BadCallRule, SimplifyRule, SloppyArgRule};
pub use conditions::BadCondRule;
pub use duplicates::{DupArgRule, DupBranchBodyRule, DupSubExprRule};

use critic_repr::{Expr, Expr_};

/// Arguments of a call to the global function `function`, or `None` when
/// `expr` is some other shape.
pub(crate) fn call_to<'e>(expr: &'e Expr, function: &str) -> Option<&'e [Expr]> {
    let name = expr.value.call_target()?;
    name.is_function(function).then(|| expr.value.call_args())
}

/// Value passed by a call argument. Hosts are expected to wrap every call
/// argument; a bare expression in argument position yields `None`.
pub(crate) fn argument_value(arg: &Expr) -> Option<&Expr> {
    match &arg.value {
        Expr_::Argument { value, .. } => Some(value),
        _ => None,
    }
}
