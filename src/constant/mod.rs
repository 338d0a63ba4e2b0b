//! Constant folding.
//!
//! - [`value`]: the abstract value lattice and its conversions
//! - [`ops`]: operator semantics over the lattice
//! - [`symbols`]: the two-phase constant symbol table
//! - [`strings`]: string literal decoding
//! - [`fold`]: the evaluator tying the pieces together
//!
//! # Example
//!
//! ```
//! use critic_repr::builder::{binary, constant, int};
//! use critic_repr::BinaryOp;
//! use php_critic::constant::{fold, ConstantTableBuilder, Value};
//!
//! let mut constants = ConstantTableBuilder::new();
//! constants.define("LIMIT", int("10"));
//! let table = constants.freeze();
//!
//! let cond = binary(BinaryOp::Greater, constant("LIMIT"), int("20"));
//! assert_eq!(fold(&cond, &table), Value::Bool(false));
//! ```

pub mod fold;
pub mod ops;
pub mod strings;
pub mod symbols;
pub mod value;

pub use fold::{fold, fold_in, Folder, MAX_CONSTANT_DEPTH};
pub use strings::{decode_literal, interpret_string, is_dynamic};
pub use symbols::{qualify, ConstantDef, ConstantTable, ConstantTableBuilder};
pub use value::Value;
