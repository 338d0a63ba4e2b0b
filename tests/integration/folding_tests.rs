//! Constant folding integration tests.
//!
//! Exercises the evaluator through the public API only: tables are built
//! with the builder, frozen and then queried.

use php_critic::constant::{ops, Value};
use php_critic::repr::builder::*;
use php_critic::repr::{BinaryOp, Expr, Expr_, Name, UnaryOp};
use php_critic::constant::MAX_CONSTANT_DEPTH;
use php_critic::{fold, fold_in, ConstantTable, ConstantTableBuilder, Folder};

fn empty() -> ConstantTable {
    ConstantTable::empty()
}

// =============================================================================
// Lattice Properties
// =============================================================================

#[test]
fn test_or_and_short_circuit_by_knowledge() {
    assert_eq!(ops::or(&Value::Bool(true), &Value::Unknown), Value::Bool(true));
    assert_eq!(ops::and(&Value::Bool(false), &Value::Unknown), Value::Bool(false));
    assert_eq!(ops::or(&Value::Unknown, &Value::Unknown), Value::Unknown);
}

#[test]
fn test_identical_does_not_fold_bools() {
    assert_eq!(
        ops::identical(&Value::Bool(true), &Value::Bool(true)),
        Value::Unknown
    );
    assert_eq!(ops::identical(&Value::Int(5), &Value::Int(5)), Value::Bool(true));
    assert_eq!(ops::identical(&Value::Int(5), &Value::Int(6)), Value::Bool(false));
}

#[test]
fn test_operators_never_panic() {
    let values = [
        Value::Unknown,
        Value::Int(i64::MIN),
        Value::Int(i64::MAX),
        Value::Int(0),
        Value::Float(f64::NAN),
        Value::Float(f64::INFINITY),
        Value::str(""),
        Value::String(vec![0xff]),
        Value::Bool(true),
    ];
    let binary_ops = [
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Concat,
        BinaryOp::BitwiseAnd,
        BinaryOp::BitwiseOr,
        BinaryOp::BooleanAnd,
        BinaryOp::BooleanOr,
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::Identical,
        BinaryOp::NotIdentical,
        BinaryOp::Smaller,
        BinaryOp::Greater,
        BinaryOp::Div,
    ];
    for x in &values {
        for op in [UnaryOp::Not, UnaryOp::Minus, UnaryOp::Plus, UnaryOp::BitwiseNot] {
            let _ = ops::unary(op, x);
        }
        for y in &values {
            for op in binary_ops {
                let _ = ops::binary(op, x, y);
            }
        }
    }
}

// =============================================================================
// Evaluator
// =============================================================================

#[test]
fn test_every_shape_folds() {
    let shapes: Vec<Expr> = vec![
        int("1"),
        float("1.0"),
        dq("x"),
        sq("x"),
        var("x"),
        var_var(var("x")),
        ident("x"),
        constant("X"),
        unary(UnaryOp::Not, var("x")),
        binary(BinaryOp::Spaceship, int("1"), int("2")),
        index(var("x"), int("0")),
        call("f", vec![int("1")]),
        arg(int("1")),
        assign(var("x"), int("1")),
        Expr_::Array(vec![int("1")]).into(),
        Expr_::Name(Name::simple("f")).into(),
        Expr_::Ternary {
            cond: Box::new(constant("true")),
            then: None,
            else_: Box::new(int("1")),
        }
        .into(),
        Expr_::PropertyFetch {
            object: Box::new(var("x")),
            property: Box::new(ident("y")),
        }
        .into(),
        Expr_::ClassConstFetch {
            class: Box::new(ident("Foo")),
            constant: "BAR".to_owned(),
        }
        .into(),
        float("1e"),
    ];
    let table = empty();
    for e in &shapes {
        let first = fold(e, &table);
        assert_eq!(first, fold(e, &table), "fold is not deterministic for {e:?}");
    }
}

#[test]
fn test_conditions() {
    let table = empty();
    assert_eq!(
        fold(&binary(BinaryOp::Equal, int("10"), int("20")), &table),
        Value::Bool(false)
    );
    let lhs = binary(BinaryOp::Minus, int("11"), int("1"));
    let rhs = binary(BinaryOp::Plus, int("9"), int("1"));
    assert_eq!(
        fold(&binary(BinaryOp::Equal, lhs, rhs), &table),
        Value::Bool(true)
    );
    assert_eq!(
        fold(&binary(BinaryOp::Equal, var("x"), int("20")), &table),
        Value::Unknown
    );
}

#[test]
fn test_string_decoding_through_fold() {
    let table = empty();
    assert_eq!(fold(&dq(r"\n"), &table), Value::str("\n"));
    assert_eq!(fold(&dq(r"\\n"), &table), Value::str(r"\n"));
    assert_eq!(fold(&dq(r"\x41"), &table), Value::str("A"));
    assert_eq!(fold(&dq(r"\xZZ"), &table), Value::Unknown);
    assert_eq!(fold(&dq(r"$name!"), &table), Value::Unknown);
    assert_eq!(fold(&dq(r"\$name!"), &table), Value::str("$name!"));
}

// =============================================================================
// Constant Table
// =============================================================================

#[test]
fn test_constant_chain() {
    let mut builder = ConstantTableBuilder::new();
    builder.define("A", int("1"));
    builder.define("B", constant("A"));
    builder.define("C", binary(BinaryOp::Concat, sq("v"), constant("B")));
    let table = builder.freeze();

    assert_eq!(fold(&constant("B"), &table), Value::Int(1));
    assert_eq!(fold(&constant("C"), &table), Value::str("v1"));
}

#[test]
fn test_mutual_recursion_terminates() {
    let mut builder = ConstantTableBuilder::new();
    builder.define("PING", binary(BinaryOp::BooleanOr, constant("PONG"), var("x")));
    builder.define("PONG", unary(UnaryOp::Not, constant("PING")));
    let table = builder.freeze();

    assert_eq!(fold(&constant("PING"), &table), Value::Unknown);
    assert_eq!(fold(&constant("PONG"), &table), Value::Unknown);
}

#[test]
fn test_cycle_guard_keeps_known_short_circuit() {
    let mut builder = ConstantTableBuilder::new();
    builder.define("LOOP", binary(BinaryOp::BooleanOr, constant("LOOP"), constant("true")));
    let table = builder.freeze();
    assert_eq!(fold(&constant("LOOP"), &table), Value::Bool(true));
}

#[test]
fn test_diamond_definitions_stay_linear() {
    // FLAGS_n = FLAGS_{n-1} | FLAGS_{n-1}, each level referenced twice.
    let mut builder = ConstantTableBuilder::new();
    builder.define("FLAGS_0", int("0b101"));
    for i in 1..=40 {
        let prev = constant(&format!("FLAGS_{}", i - 1));
        builder.define(
            &format!("FLAGS_{i}"),
            binary(BinaryOp::BitwiseOr, prev.clone(), prev),
        );
    }
    let table = builder.freeze();

    let cond = binary(BinaryOp::Identical, constant("FLAGS_40"), int("5"));
    assert_eq!(fold(&cond, &table), Value::Bool(true));
}

#[test]
fn test_deep_chain_is_unknown_not_a_crash() {
    let mut builder = ConstantTableBuilder::new();
    builder.define("LEVEL_0", sq("root"));
    for i in 1..20_000 {
        builder.define(&format!("LEVEL_{i}"), constant(&format!("LEVEL_{}", i - 1)));
    }
    let table = builder.freeze();

    assert_eq!(fold(&constant("LEVEL_19999"), &table), Value::Unknown);
    let shallow = format!("LEVEL_{}", MAX_CONSTANT_DEPTH / 2);
    assert_eq!(fold(&constant(&shallow), &table), Value::str("root"));
}

#[test]
fn test_folder_namespace_context() {
    let mut builder = ConstantTableBuilder::new();
    builder.define_in(r"\App\MODE", sq("prod"), "App");
    let table = builder.freeze();

    let folder = Folder::new(&table).with_namespace("App");
    assert_eq!(folder.namespace(), "App");
    assert_eq!(folder.fold(&constant("MODE")), Value::str("prod"));
    assert_eq!(fold_in(&constant("MODE"), &table, ""), Value::Unknown);
}
