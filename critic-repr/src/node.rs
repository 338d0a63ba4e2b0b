//! Expression and statement node types.
//!
//! The taxonomy is closed: the analysis engines match on it exhaustively and
//! treat every shape they do not understand as opaque. Literals keep their
//! source text so that numeral and escape rules are applied by the consumer.

use serde::{Deserialize, Serialize};

use super::location::WithLoc;
use super::operators::{BinaryOp, UnaryOp};

/// Expression with source location
pub type Expr = WithLoc<Expr_>;

/// Statement with source location
pub type Stmt = WithLoc<Stmt_>;

/// Expression underlying type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr_ {
    // === Literals ===
    /// Integer literal, raw source text `42`, `0x2A`, `1_000`
    Lnumber(String),
    /// Float literal, raw source text `1.5`, `1e3`
    Dnumber(String),
    /// Quoted string literal
    String(StringLit),

    // === Names ===
    /// Variable `$x` or `$$x`
    Variable(VarName),
    /// Bare identifier (property names, labels)
    Identifier(String),
    /// Possibly qualified name in call position `strlen`, `\Foo\bar`
    Name(Name),
    /// Named constant reference `FOO`, `\Foo\BAR`
    ConstFetch(Name),
    /// Class constant `Foo::BAR`
    ClassConstFetch { class: Box<Expr>, constant: String },

    // === Operations ===
    /// Unary operation `-x`, `!x`
    Unary(UnaryOp, Box<Expr>),
    /// Binary operation `x + y`, `a && b`
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// Ternary `c ? a : b`, short form `c ?: b` has no `then`
    Ternary {
        cond: Box<Expr>,
        then: Option<Box<Expr>>,
        else_: Box<Expr>,
    },
    /// Assignment `x = e`
    Assign(Box<Expr>, Box<Expr>),

    // === Data Access ===
    /// Index access `$a[i]`, append target `$a[]` has no dimension
    Index {
        base: Box<Expr>,
        dim: Option<Box<Expr>>,
    },
    /// Property access `$obj->name`
    PropertyFetch { object: Box<Expr>, property: Box<Expr> },
    /// Array literal `[1, 2, 3]`
    Array(Vec<Expr>),

    // === Calls ===
    /// Function call `f($x, $y)`; every element of `args` is an `Argument`
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// Call argument wrapper `$x`, `...$xs`, `&$x`
    Argument {
        value: Box<Expr>,
        variadic: bool,
        by_ref: bool,
    },
}

impl Expr_ {
    /// Strip an `Argument` wrapper, if any.
    pub fn unwrap_argument(&self) -> &Expr_ {
        match self {
            Self::Argument { value, .. } => value.value.unwrap_argument(),
            other => other,
        }
    }

    /// Is this a quoted string literal?
    pub fn is_string_literal(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// If this is a call to a plain named function, the function name.
    pub fn call_target(&self) -> Option<&Name> {
        match self {
            Self::Call { func, .. } => match &func.value {
                Self::Name(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Arguments of a call, empty for every other shape.
    pub fn call_args(&self) -> &[Expr] {
        match self {
            Self::Call { args, .. } => args,
            _ => &[],
        }
    }
}

/// Variable name: static identifier or a dynamic `$$expr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarName {
    /// `$name`, stored without the sigil
    Ident(String),
    /// `$$expr` / `${expr}`
    Dynamic(Box<Expr>),
}

/// Quoting form of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStyle {
    /// `'...'`: only `\\` and `\'` are escapes, no interpolation
    Single,
    /// `"..."`: full escape set and `$var` interpolation
    Double,
}

impl QuoteStyle {
    /// The quote character.
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }

    /// Does this quoting form interpolate variables?
    pub const fn interpolates(self) -> bool {
        matches!(self, Self::Double)
    }
}

/// String literal as written in the source, quotes included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringLit {
    pub raw: String,
}

impl StringLit {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Raw text without the optional binary-string `b` prefix.
    fn unprefixed(&self) -> &str {
        self.raw
            .strip_prefix(['b', 'B'])
            .filter(|rest| rest.starts_with(['\'', '"']))
            .unwrap_or(&self.raw)
    }

    /// Quoting form, or `None` when the raw text is not a well-formed quoted literal.
    pub fn quote(&self) -> Option<QuoteStyle> {
        let text = self.unprefixed();
        let style = if text.starts_with('"') {
            QuoteStyle::Double
        } else if text.starts_with('\'') {
            QuoteStyle::Single
        } else {
            return None;
        };
        let closed = text.len() >= 2 && text.ends_with(style.as_char());
        closed.then_some(style)
    }

    /// Text between the quotes, escapes still encoded.
    pub fn body(&self) -> Option<&str> {
        self.quote()?;
        let text = self.unprefixed();
        text.get(1..text.len() - 1)
    }
}

/// Possibly qualified name `foo`, `Foo\bar`, `\Foo\bar`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    pub parts: Vec<String>,
    /// Written with a leading `\`
    #[serde(default)]
    pub fully_qualified: bool,
}

impl Name {
    /// Single-segment unqualified name.
    pub fn simple(ident: impl Into<String>) -> Self {
        Self {
            parts: vec![ident.into()],
            fully_qualified: false,
        }
    }

    /// Parse `Foo\Bar` or `\Foo\Bar`. Empty segments are dropped.
    pub fn parse(text: &str) -> Self {
        let fully_qualified = text.starts_with('\\');
        let parts = text
            .split('\\')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Self {
            parts,
            fully_qualified,
        }
    }

    /// Segments joined with `\`, without a leading separator.
    pub fn joined(&self) -> String {
        self.parts.join("\\")
    }

    /// Does this name denote the global function `function`?
    ///
    /// Function names are case-insensitive; only single-segment names match.
    pub fn is_function(&self, function: &str) -> bool {
        matches!(self.parts.as_slice(), [only] if only.eq_ignore_ascii_case(function))
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.fully_qualified {
            f.write_str("\\")?;
        }
        f.write_str(&self.joined())
    }
}

/// Statement underlying type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt_ {
    /// Expression statement `e;`
    Expr(Expr),
    /// Braced block `{ ... }`
    Block(Vec<Stmt>),
    /// `if (c) ... elseif (c) ... else ...`
    If {
        cond: Expr,
        body: Box<Stmt>,
        elseifs: Vec<ElseIf>,
        else_: Option<Box<Stmt>>,
    },
    /// `while (c) ...`
    While { cond: Expr, body: Box<Stmt> },
    /// `do ... while (c);`
    DoWhile { body: Box<Stmt>, cond: Expr },
    /// `switch (e) { case ...: ... default: ... }`
    Switch { subject: Expr, cases: Vec<Case> },
    /// `const A = 1, B = 2;`
    Const(Vec<ConstDecl>),
    /// `namespace Foo;` (no body) or `namespace Foo { ... }`
    Namespace {
        name: Option<Name>,
        body: Option<Vec<Stmt>>,
    },
    /// `function f($a, $b) { ... }`
    Function {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// `return e;`
    Return(Option<Expr>),
    /// `echo a, b;`
    Echo(Vec<Expr>),
    /// Empty statement `;`
    Nop,
}

/// `elseif (cond) body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseIf {
    pub cond: Expr,
    pub body: Stmt,
}

/// One `case cond:` arm; `default:` has no condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub cond: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// One `NAME = value` entry of a `const` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstDecl {
    pub name: WithLoc<String>,
    pub value: Expr,
}
