//! End-to-end checks over small hand-built programs.
//!
//! Each program is written out in PHP above the tree that encodes it.

use critic_lint::lint::collect_constants;
use critic_lint::{Diagnostic, LintConfig, LintEngine, RuleCode};
use critic_repr::builder::*;
use critic_repr::{BinaryOp, SourceUnit, Stmt, UnaryOp};

// ============================================================================
// HELPERS
// ============================================================================

fn engine() -> LintEngine {
    LintEngine::new(LintConfig::default())
}

fn single_file_reports(stmts: Vec<Stmt>) -> Vec<Diagnostic> {
    engine().check(&[SourceUnit::new("first.php", stmts)])
}

/// Index every unit, but report only on `checked`, the way stub files
/// with builtin definitions are used.
fn multi_file_reports(stubs: Vec<Vec<Stmt>>, checked: Vec<Stmt>) -> Vec<Diagnostic> {
    let mut units: Vec<SourceUnit> = stubs
        .into_iter()
        .enumerate()
        .map(|(i, stmts)| SourceUnit::new(format!("stub{i}.php"), stmts))
        .collect();
    units.push(SourceUnit::new("checked.php", checked));
    let table = collect_constants(&units);
    let checked = units.last().unwrap();
    engine().check_unit(checked, &table)
}

/// Every report matches exactly one expected message and vice versa.
/// Order does not matter.
fn match_reports(reports: &[Diagnostic], expect: &[&str]) {
    let mut have: Vec<&str> = reports.iter().map(|d| d.message.as_str()).collect();
    let mut want = expect.to_vec();
    have.sort_unstable();
    want.sort_unstable();
    assert_eq!(have, want, "reports: {reports:#?}");
}

fn neg(n: &str) -> critic_repr::Expr {
    unary(UnaryOp::Minus, int(n))
}

fn discard(e: critic_repr::Expr) -> Stmt {
    expr_stmt(assign(var("_"), e))
}

// ============================================================================
// CONDITIONS
// ============================================================================

#[test]
fn bad_cond_and() {
    // namespace Foo;
    // const FIVE = 5;
    // $x = 10;
    // $_ = $x < -5 && $x > 5;
    // $_ = ($x < -5) && $x > 5;
    // $_ = $x < -5 && ($x > 5);
    // $_ = $x < -5+1 && ($x > 5+1);
    // $_ = $x == 4 && $x == FIVE;
    let lt_gt = |lo, hi| {
        binary(
            BinaryOp::BooleanAnd,
            binary(BinaryOp::Smaller, var("x"), lo),
            binary(BinaryOp::Greater, var("x"), hi),
        )
    };
    let reports = single_file_reports(vec![
        namespace("Foo"),
        const_stmt("FIVE", int("5")),
        expr_stmt(assign(var("x"), int("10"))),
        discard(lt_gt(neg("5"), int("5"))),
        discard(lt_gt(neg("5"), int("5"))),
        discard(lt_gt(neg("5"), int("5"))),
        discard(lt_gt(
            binary(BinaryOp::Plus, neg("5"), int("1")),
            binary(BinaryOp::Plus, int("5"), int("1")),
        )),
        discard(binary(
            BinaryOp::BooleanAnd,
            binary(BinaryOp::Equal, var("x"), int("4")),
            binary(BinaryOp::Equal, var("x"), constant("FIVE")),
        )),
    ]);

    match_reports(&reports, &["always false condition"; 5]);
}

#[test]
fn bad_cond_or() {
    // $x = 10;
    // $_ = $x != 10 || $x != 5;
    // $_ = $x != 9 || $x != 9;
    let neq_neq = |a, b| {
        binary(
            BinaryOp::BooleanOr,
            binary(BinaryOp::NotEqual, var("x"), a),
            binary(BinaryOp::NotEqual, var("x"), b),
        )
    };
    let reports = single_file_reports(vec![
        expr_stmt(assign(var("x"), int("10"))),
        discard(neq_neq(int("10"), int("5"))),
        discard(neq_neq(int("9"), int("9"))),
    ]);

    match_reports(&reports, &["always true condition"]);
}

#[test]
fn folded_conditions() {
    // if (10 == 20) {}
    // if (11 - 1 == 9 + 1) {}
    // if ($x == 20) {}
    let reports = single_file_reports(vec![
        if_stmt(binary(BinaryOp::Equal, int("10"), int("20")), block(vec![]), vec![], None),
        if_stmt(
            binary(
                BinaryOp::Equal,
                binary(BinaryOp::Minus, int("11"), int("1")),
                binary(BinaryOp::Plus, int("9"), int("1")),
            ),
            block(vec![]),
            vec![],
            None,
        ),
        if_stmt(binary(BinaryOp::Equal, var("x"), int("20")), block(vec![]), vec![], None),
    ]);

    match_reports(&reports, &["always false condition", "always true condition"]);
}

#[test]
fn conditions_through_constant_chain() {
    // define('A', 1);
    // define('B', A);
    // const C = B + 1;
    // if (C === 2) {}
    let reports = single_file_reports(vec![
        expr_stmt(call("define", vec![sq("A"), int("1")])),
        expr_stmt(call("define", vec![sq("B"), constant("A")])),
        const_stmt("C", binary(BinaryOp::Plus, constant("B"), int("1"))),
        if_stmt(binary(BinaryOp::Identical, constant("C"), int("2")), block(vec![]), vec![], None),
    ]);

    match_reports(&reports, &["always true condition"]);
}

#[test]
fn self_referential_constant_is_quiet() {
    // const LOOP = LOOP + 1;
    // if (LOOP > 0) {}
    let reports = single_file_reports(vec![
        const_stmt("LOOP", binary(BinaryOp::Plus, constant("LOOP"), int("1"))),
        if_stmt(binary(BinaryOp::Greater, constant("LOOP"), int("0")), block(vec![]), vec![], None),
    ]);

    assert!(reports.is_empty(), "{reports:#?}");
}

// ============================================================================
// DUPLICATES
// ============================================================================

#[test]
fn dup_sub_expr() {
    // $_ = $i - $i;
    // $_ = $i % $i;
    // $_ = $i / $i;
    // $_ = $xs[$i] < $xs[$i];
    // $_ = ($i & $mask) == $mask;
    let reports = single_file_reports(vec![
        discard(binary(BinaryOp::Minus, var("i"), var("i"))),
        discard(binary(BinaryOp::Mod, var("i"), var("i"))),
        discard(binary(BinaryOp::Div, var("i"), var("i"))),
        discard(binary(
            BinaryOp::Smaller,
            index(var("xs"), var("i")),
            index(var("xs"), var("i")),
        )),
        discard(binary(
            BinaryOp::Equal,
            binary(BinaryOp::BitwiseAnd, var("i"), var("mask")),
            var("mask"),
        )),
    ]);

    match_reports(
        &reports,
        &[
            "suspiciously duplicated LHS and RHS of '-'",
            "suspiciously duplicated LHS and RHS of '%'",
            "suspiciously duplicated LHS and RHS of '/'",
            "suspiciously duplicated LHS and RHS of '<'",
        ],
    );
}

#[test]
fn dup_args() {
    // $_ = strcmp($s, $s);
    // $_ = str_replace($from, $from, $subject);
    // $_ = max($a, $b);
    let reports = single_file_reports(vec![
        discard(call("strcmp", vec![var("s"), var("s")])),
        discard(call("str_replace", vec![var("from"), var("from"), var("subject")])),
        discard(call("max", vec![var("a"), var("b")])),
    ]);

    match_reports(
        &reports,
        &["suspiciously duplicated argument", "suspiciously duplicated argument"],
    );
}

#[test]
fn dup_branch_bodies() {
    // if ($a) { f(); } elseif ($b) { g(); } elseif ($c) { f(); } else { g(); }
    let f = || block(vec![expr_stmt(call("f", vec![]))]);
    let g = || block(vec![expr_stmt(call("g", vec![]))]);
    let reports = single_file_reports(vec![if_stmt(
        var("a"),
        f(),
        vec![(var("b"), g()), (var("c"), f())],
        Some(g()),
    )]);

    match_reports(
        &reports,
        &["duplicated <0> and <2> bodies", "duplicated <1> and <3> bodies"],
    );
}

// ============================================================================
// CALLS
// ============================================================================

#[test]
fn arg_order() {
    // stub: function strpos($str, $substr) {}
    // $str = "abc";
    // $_ = strpos("http://", $str); // Bad
    // $_ = strpos($str, "http://"); // OK
    let stub = vec![Stmt::from(critic_repr::Stmt_::Function {
        name: "strpos".into(),
        params: vec!["str".into(), "substr".into()],
        body: vec![],
    })];
    let reports = multi_file_reports(
        vec![stub],
        vec![
            expr_stmt(assign(var("str"), dq("abc"))),
            discard(call("strpos", vec![dq("http://"), var("str")])),
            discard(call("strpos", vec![var("str"), dq("http://")])),
        ],
    );

    match_reports(&reports, &["suspicious args order"]);
}

#[test]
fn define_arg3() {
    // stub: define("true", 1 === 1); define("false", 1 === 0);
    // define("THE_CONST_TRUE", 1, true);
    // define("THE_CONST_FALSE", 0, false);
    let stub = vec![
        expr_stmt(call(
            "define",
            vec![dq("true"), binary(BinaryOp::Identical, int("1"), int("1"))],
        )),
        expr_stmt(call(
            "define",
            vec![dq("false"), binary(BinaryOp::Identical, int("1"), int("0"))],
        )),
    ];
    let reports = multi_file_reports(
        vec![stub],
        vec![
            expr_stmt(call("define", vec![dq("THE_CONST_TRUE"), int("1"), constant("true")])),
            expr_stmt(call("define", vec![dq("THE_CONST_FALSE"), int("0"), constant("false")])),
        ],
    );

    match_reports(
        &reports,
        &["don't use case_insensitive argument", "don't use case_insensitive argument"],
    );
    assert!(reports.iter().all(|d| d.rule == RuleCode::CRT007));
}

#[test]
fn strncmp_length_and_strcmp_simplify() {
    // const PREFIX = 'http';
    // $_ = strncmp($url, PREFIX, 5);
    // $_ = strncmp($url, PREFIX, 4);
    // $_ = strcmp($a, $b) < 0;
    let reports = single_file_reports(vec![
        const_stmt("PREFIX", sq("http")),
        discard(call("strncmp", vec![var("url"), constant("PREFIX"), int("5")])),
        discard(call("strncmp", vec![var("url"), constant("PREFIX"), int("4")])),
        discard(binary(
            BinaryOp::Smaller,
            call("strcmp", vec![var("a"), var("b")]),
            int("0"),
        )),
    ]);

    match_reports(
        &reports,
        &[
            "expected length arg to be 4, got 5",
            "can replace 'strcmp(s1, s2) < 0' with 's1 < s2'",
        ],
    );
}

#[test]
fn malformed_calls_never_panic() {
    let reports = single_file_reports(vec![
        discard(call("define", vec![])),
        discard(call("strpos", vec![])),
        discard(call("strncmp", vec![sq("a")])),
        discard(call("strcmp", vec![var("s")])),
        discard(call("min", vec![])),
    ]);
    assert!(reports.is_empty(), "{reports:#?}");
}
