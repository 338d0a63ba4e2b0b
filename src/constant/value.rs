//! Abstract values produced by constant folding.
//!
//! # Lattice
//!
//! ```text
//!                   Unknown
//!      /      /        |         \       \
//!   Int(n) Float(f) String(s) Bool(b)   ...
//! ```
//!
//! `Unknown` is the only element that does not describe a concrete runtime
//! value. It absorbs under nearly every operator and also signals an operand
//! type mismatch inside an operator. There is no error channel: anything the
//! evaluator cannot prove becomes `Unknown`.

use std::borrow::Cow;
use std::fmt;

/// Statically known value of an expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Cannot be determined statically.
    #[default]
    Unknown,
    /// Integer constant (64-bit signed)
    Int(i64),
    /// Floating-point constant (64-bit)
    Float(f64),
    /// String constant, already unescaped. Strings are byte sequences:
    /// `"\xff"` is a valid one-byte string that is not UTF-8.
    String(Vec<u8>),
    /// Boolean constant
    Bool(bool),
}

impl Value {
    /// String value from UTF-8 text.
    pub fn str(s: &str) -> Self {
        Value::String(s.as_bytes().to_vec())
    }

    /// Truthiness under the language's boolean cast.
    ///
    /// - `Bool` is itself
    /// - `Int`/`Float` are false iff exactly zero (`NaN` is true)
    /// - `String` is false iff empty or exactly `"0"`
    ///
    /// `None` means the conversion is undefined and the caller must
    /// propagate `Unknown`.
    #[must_use]
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            Value::Float(f) => Some(*f != 0.0),
            Value::String(s) => Some(!(s.is_empty() || s.as_slice() == b"0")),
            Value::Unknown => None,
        }
    }

    /// Integer cast used by the bitwise operators.
    ///
    /// Floats truncate toward zero. Non-finite floats and floats outside the
    /// `i64` range have platform-dependent results and stay undefined here.
    /// Strings are not converted.
    #[must_use]
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            Value::Float(f) => {
                let t = f.trunc();
                // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
                (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then(|| t as i64)
            }
            Value::String(_) | Value::Unknown => None,
        }
    }

    /// String cast used by concatenation.
    ///
    /// Float formatting depends on runtime precision settings, so floats
    /// are left undefined.
    #[must_use]
    pub fn to_php_string(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Int(i) => Some(Cow::Owned(i.to_string().into_bytes())),
            Value::Bool(true) => Some(Cow::Borrowed(b"1")),
            Value::Bool(false) => Some(Cow::Borrowed(b"")),
            Value::Float(_) | Value::Unknown => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unknown => write!(f, "unknown"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(fl) => write!(f, "{fl:?}"),
            Value::String(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::str(v)
    }
}
