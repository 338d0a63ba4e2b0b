//! Operator types
//!
//! One variant per operator node kind of the analyzed language. `and`/`or`
//! keep their own variants: they bind looser than `&&`/`||` but evaluate the same.

use serde::{Deserialize, Serialize};

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical not `!x`
    Not,
    /// Arithmetic negation `-x`
    Minus,
    /// Numeric identity `+x`
    Plus,
    /// Bitwise not `~x`
    BitwiseNot,
}

impl UnaryOp {
    /// Parse from text
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "!" => Some(Self::Not),
            "-" => Some(Self::Minus),
            "+" => Some(Self::Plus),
            "~" => Some(Self::BitwiseNot),
            _ => None,
        }
    }

    /// Format as symbol
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::BitwiseNot => "~",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// String concatenation `.`
    Concat,

    // Bitwise
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,

    // Logical
    /// `&&`
    BooleanAnd,
    /// `||`
    BooleanOr,
    /// `and`
    LogicalAnd,
    /// `or`
    LogicalOr,
    /// `xor`
    LogicalXor,

    // Comparison
    /// Loose equality `==`
    Equal,
    /// Loose inequality `!=` or `<>`
    NotEqual,
    /// Strict equality `===`
    Identical,
    /// Strict inequality `!==`
    NotIdentical,
    /// `<`
    Smaller,
    /// `<=`
    SmallerOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<=>`
    Spaceship,

    /// Null coalescing `??`
    Coalesce,
}

impl BinaryOp {
    /// Parse from text
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Minus),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "%" => Some(Self::Mod),
            "**" => Some(Self::Pow),
            "." => Some(Self::Concat),
            "&" => Some(Self::BitwiseAnd),
            "|" => Some(Self::BitwiseOr),
            "^" => Some(Self::BitwiseXor),
            "<<" => Some(Self::ShiftLeft),
            ">>" => Some(Self::ShiftRight),
            "&&" => Some(Self::BooleanAnd),
            "||" => Some(Self::BooleanOr),
            "and" => Some(Self::LogicalAnd),
            "or" => Some(Self::LogicalOr),
            "xor" => Some(Self::LogicalXor),
            "==" => Some(Self::Equal),
            "!=" | "<>" => Some(Self::NotEqual),
            "===" => Some(Self::Identical),
            "!==" => Some(Self::NotIdentical),
            "<" => Some(Self::Smaller),
            "<=" => Some(Self::SmallerOrEqual),
            ">" => Some(Self::Greater),
            ">=" => Some(Self::GreaterOrEqual),
            "<=>" => Some(Self::Spaceship),
            "??" => Some(Self::Coalesce),
            _ => None,
        }
    }

    /// Format as symbol
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Concat => ".",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::BooleanAnd => "&&",
            Self::BooleanOr => "||",
            Self::LogicalAnd => "and",
            Self::LogicalOr => "or",
            Self::LogicalXor => "xor",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Identical => "===",
            Self::NotIdentical => "!==",
            Self::Smaller => "<",
            Self::SmallerOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Spaceship => "<=>",
            Self::Coalesce => "??",
        }
    }

    /// Is this a comparison operator producing a boolean?
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::Identical
                | Self::NotIdentical
                | Self::Smaller
                | Self::SmallerOrEqual
                | Self::Greater
                | Self::GreaterOrEqual
        )
    }

    /// Is this a short-circuit logical operator (`&&`, `||`, `and`, `or`)?
    pub const fn is_logical(self) -> bool {
        matches!(
            self,
            Self::BooleanAnd | Self::BooleanOr | Self::LogicalAnd | Self::LogicalOr
        )
    }

    /// Is this a conjunction (`&&` or `and`)?
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::BooleanAnd | Self::LogicalAnd)
    }

    /// Is this a disjunction (`||` or `or`)?
    pub const fn is_disjunction(self) -> bool {
        matches!(self, Self::BooleanOr | Self::LogicalOr)
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_symbol())
    }
}
