//! Source location tracking
//!
//! Nodes carry their source span through [`WithLoc`]. The span is metadata:
//! two located values compare equal when their inner values do.

use serde::{Deserialize, Serialize};

/// Source position: line and column, both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in UTF-8 code points)
    pub col: u32,
}

impl Pos {
    /// Create a new position
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Synthetic/unknown position
    pub const SYNTHETIC: Self = Self { line: 0, col: 0 };

    /// Is this a synthetic (unknown) position?
    pub const fn is_synthetic(self) -> bool {
        self.line == 0
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_synthetic() {
            write!(f, "<synthetic>")
        } else {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}

/// Source range: start to end position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Pos,
    pub end: Pos,
}

impl Range {
    /// Create a new range
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    /// Create a range spanning a single position
    pub const fn point(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Synthetic/unknown range
    pub const SYNTHETIC: Self = Self {
        start: Pos::SYNTHETIC,
        end: Pos::SYNTHETIC,
    };

    /// Is this a synthetic (unknown) range?
    pub const fn is_synthetic(self) -> bool {
        self.start.is_synthetic()
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_synthetic() || self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Wrapper that attaches a source range to any value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithLoc<T> {
    /// The underlying value
    pub value: T,
    /// Source range
    #[serde(default)]
    pub range: Range,
}

impl<T> WithLoc<T> {
    /// Create a new located value
    pub const fn new(value: T, range: Range) -> Self {
        Self { value, range }
    }

    /// Create a synthetic (no location) value
    pub fn synthetic(value: T) -> Self {
        Self {
            value,
            range: Range::SYNTHETIC,
        }
    }

    /// Create with just a position (zero-width range)
    pub fn at(value: T, pos: Pos) -> Self {
        Self {
            value,
            range: Range::point(pos),
        }
    }

    /// Replace the range, keeping the value
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Get the inner value, discarding location
    pub fn into_inner(self) -> T {
        self.value
    }
}

// Ranges are ignored: two identical subtrees at different places are equal.
impl<T: PartialEq> PartialEq for WithLoc<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Default> Default for WithLoc<T> {
    fn default() -> Self {
        Self::synthetic(T::default())
    }
}

impl<T> std::ops::Deref for WithLoc<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> From<T> for WithLoc<T> {
    fn from(value: T) -> Self {
        Self::synthetic(value)
    }
}
