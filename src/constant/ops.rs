//! Operator table over the value lattice.
//!
//! Every function here is total: incompatible operand kinds produce
//! [`Value::Unknown`], never a panic. Operators compare and combine values of
//! the *same* kind only; the analyzed language's loose coercions (numeric
//! strings, int/float promotion in comparisons) are not modeled.

use std::cmp::Ordering;

use critic_repr::{BinaryOp, UnaryOp};

use super::value::Value;

/// Logical or. A known-true operand decides the result even when the other
/// side is unknown.
#[must_use]
pub fn or(x: &Value, y: &Value) -> Value {
    match (x.to_bool(), y.to_bool()) {
        (Some(true), _) | (_, Some(true)) => Value::Bool(true),
        (Some(a), Some(b)) => Value::Bool(a || b),
        _ => Value::Unknown,
    }
}

/// Logical and. A known-false operand decides the result even when the
/// other side is unknown.
#[must_use]
pub fn and(x: &Value, y: &Value) -> Value {
    match (x.to_bool(), y.to_bool()) {
        (Some(false), _) | (_, Some(false)) => Value::Bool(false),
        (Some(a), Some(b)) => Value::Bool(a && b),
        _ => Value::Unknown,
    }
}

/// Numeric `+`. Integer overflow promotes to float, as the runtime does.
#[must_use]
pub fn add(x: &Value, y: &Value) -> Value {
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => a
            .checked_add(*b)
            .map_or_else(|| Value::Float(*a as f64 + *b as f64), Value::Int),
        (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
        _ => Value::Unknown,
    }
}

/// Numeric `-`. Integer overflow promotes to float.
#[must_use]
pub fn sub(x: &Value, y: &Value) -> Value {
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => a
            .checked_sub(*b)
            .map_or_else(|| Value::Float(*a as f64 - *b as f64), Value::Int),
        (Value::Float(a), Value::Float(b)) => Value::Float(a - b),
        _ => Value::Unknown,
    }
}

/// String concatenation `.`.
#[must_use]
pub fn concat(x: &Value, y: &Value) -> Value {
    match (x.to_php_string(), y.to_php_string()) {
        (Some(a), Some(b)) => {
            let mut out = Vec::with_capacity(a.len() + b.len());
            out.extend_from_slice(&a);
            out.extend_from_slice(&b);
            Value::String(out)
        }
        _ => Value::Unknown,
    }
}

#[must_use]
pub fn bit_or(x: &Value, y: &Value) -> Value {
    match (x.to_int(), y.to_int()) {
        (Some(a), Some(b)) => Value::Int(a | b),
        _ => Value::Unknown,
    }
}

#[must_use]
pub fn bit_and(x: &Value, y: &Value) -> Value {
    match (x.to_int(), y.to_int()) {
        (Some(a), Some(b)) => Value::Int(a & b),
        _ => Value::Unknown,
    }
}

/// Strict `===`, folded only for two ints, two floats or two strings.
///
/// `Bool === Bool` stays unknown on purpose.
#[must_use]
pub fn identical(x: &Value, y: &Value) -> Value {
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => Value::Bool(a == b),
        (Value::Float(a), Value::Float(b)) => Value::Bool(a == b),
        (Value::String(a), Value::String(b)) => Value::Bool(a == b),
        _ => Value::Unknown,
    }
}

/// Loose `==`. Loose coercion is not modeled, so this is [`identical`].
#[must_use]
pub fn equal(x: &Value, y: &Value) -> Value {
    identical(x, y)
}

/// Order two values of the same kind. Strings compare bytewise.
fn compare(x: &Value, y: &Value) -> Option<Ordering> {
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Apply `pred` to the ordering of two same-kind values.
///
/// Two floats with no ordering (one is `NaN`) compare false under every
/// relational operator.
fn relation(x: &Value, y: &Value, pred: fn(Ordering) -> bool) -> Value {
    match (x, y) {
        (Value::Float(_), Value::Float(_)) => Value::Bool(compare(x, y).is_some_and(pred)),
        _ => compare(x, y).map_or(Value::Unknown, |ord| Value::Bool(pred(ord))),
    }
}

#[must_use]
pub fn greater_than(x: &Value, y: &Value) -> Value {
    relation(x, y, Ordering::is_gt)
}

#[must_use]
pub fn less_than(x: &Value, y: &Value) -> Value {
    relation(x, y, Ordering::is_lt)
}

#[must_use]
pub fn greater_or_equal(x: &Value, y: &Value) -> Value {
    relation(x, y, Ordering::is_ge)
}

#[must_use]
pub fn less_or_equal(x: &Value, y: &Value) -> Value {
    relation(x, y, Ordering::is_le)
}

#[must_use]
pub fn not(x: &Value) -> Value {
    x.to_bool().map_or(Value::Unknown, |b| Value::Bool(!b))
}

/// Arithmetic negation. Booleans are cast to int first.
#[must_use]
pub fn neg(x: &Value) -> Value {
    match x {
        Value::Int(i) => i
            .checked_neg()
            .map_or_else(|| Value::Float(-(*i as f64)), Value::Int),
        Value::Float(f) => Value::Float(-f),
        Value::Bool(true) => Value::Int(-1),
        Value::Bool(false) => Value::Int(0),
        Value::String(_) | Value::Unknown => Value::Unknown,
    }
}

/// Fold a binary operator application over already folded operands.
///
/// Operators without a folding rule produce `Unknown`.
#[must_use]
pub fn binary(op: BinaryOp, x: &Value, y: &Value) -> Value {
    match op {
        BinaryOp::Plus => add(x, y),
        BinaryOp::Minus => sub(x, y),
        BinaryOp::Concat => concat(x, y),
        BinaryOp::BitwiseOr => bit_or(x, y),
        BinaryOp::BitwiseAnd => bit_and(x, y),
        BinaryOp::BooleanAnd | BinaryOp::LogicalAnd => and(x, y),
        BinaryOp::BooleanOr | BinaryOp::LogicalOr => or(x, y),
        BinaryOp::Identical => identical(x, y),
        BinaryOp::NotIdentical => not(&identical(x, y)),
        BinaryOp::Equal => equal(x, y),
        BinaryOp::NotEqual => not(&equal(x, y)),
        BinaryOp::Greater => greater_than(x, y),
        BinaryOp::Smaller => less_than(x, y),
        BinaryOp::GreaterOrEqual => greater_or_equal(x, y),
        BinaryOp::SmallerOrEqual => less_or_equal(x, y),
        BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod
        | BinaryOp::Pow
        | BinaryOp::BitwiseXor
        | BinaryOp::ShiftLeft
        | BinaryOp::ShiftRight
        | BinaryOp::LogicalXor
        | BinaryOp::Spaceship
        | BinaryOp::Coalesce => Value::Unknown,
    }
}

/// Fold a unary operator application over an already folded operand.
#[must_use]
pub fn unary(op: UnaryOp, x: &Value) -> Value {
    match op {
        UnaryOp::Not => not(x),
        UnaryOp::Minus => neg(x),
        UnaryOp::Plus => match x {
            Value::Int(_) | Value::Float(_) => x.clone(),
            _ => Value::Unknown,
        },
        UnaryOp::BitwiseNot => match x {
            Value::Int(i) => Value::Int(!i),
            _ => Value::Unknown,
        },
    }
}
