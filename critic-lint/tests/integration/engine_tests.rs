//! Engine runs over units stored on disk, driven by a `.critic.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use critic_lint::{
    discover_and_load_config, write_diagnostics, DiagnosticSeverity, LintConfig, LintEngine,
    LintError, OutputFormat, RuleCode, CONFIG_FILE_NAME,
};
use critic_repr::builder::*;
use critic_repr::{BinaryOp, SourceUnit};
use tempfile::TempDir;

fn write_unit(dir: &TempDir, name: &str, unit: &SourceUnit) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(unit).unwrap()).unwrap();
    path
}

/// `defs.php` defines MODE in one unit, `app.php` tests it in another.
fn project(dir: &TempDir) -> Vec<PathBuf> {
    let defs = SourceUnit::new(
        "defs.php",
        vec![expr_stmt(call("define", vec![sq("MODE"), sq("prod")]))],
    );
    let app = SourceUnit::new(
        "app.php",
        vec![
            if_stmt(
                at(binary(BinaryOp::Identical, constant("MODE"), sq("dev")), 2, 5),
                block(vec![]),
                vec![],
                None,
            ),
            expr_stmt(at(binary(BinaryOp::Minus, var("n"), var("n")), 4, 1)),
        ],
    );
    vec![write_unit(dir, "defs.json", &defs), write_unit(dir, "app.json", &app)]
}

fn config_from(dir: &Path) -> LintConfig {
    match discover_and_load_config(dir).unwrap() {
        Some((file, _)) => LintConfig::from_file_config(&file),
        None => LintConfig::default(),
    }
}

#[test]
fn check_paths_resolves_constants_across_units() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    let paths = project(&dir);

    let engine = LintEngine::new(config_from(dir.path()));
    let diags = engine.check_paths(&paths).unwrap();

    let found: Vec<(RuleCode, u32)> = diags.iter().map(|d| (d.rule, d.range.start.line)).collect();
    assert_eq!(found, vec![(RuleCode::CRT001, 2), (RuleCode::CRT002, 4)]);
    assert_eq!(diags[0].message, "always false condition");
}

#[test]
fn config_file_selects_rules_and_severity() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[rules]\nselect = [\"bad-cond\"]\n\n[rules.severity]\nbad-cond = \"error\"\n",
    )
    .unwrap();
    let paths = project(&dir);

    let engine = LintEngine::new(config_from(dir.path()));
    assert_eq!(engine.rule_codes(), vec![RuleCode::CRT001]);

    let diags = engine.check_paths(&paths).unwrap();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
}

#[test]
fn config_file_disables_shared_constants() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[analysis]\nshared_constants = false\n",
    )
    .unwrap();
    let paths = project(&dir);

    let engine = LintEngine::new(config_from(dir.path()));
    let diags = engine.check_paths(&paths).unwrap();
    assert!(diags.iter().all(|d| d.rule != RuleCode::CRT001), "{diags:#?}");
}

#[test]
fn unreadable_unit_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = project(&dir);
    paths.push(dir.path().join("missing.json"));

    let err = LintEngine::new(LintConfig::default())
        .check_paths(&paths)
        .unwrap_err();
    assert!(matches!(err, LintError::FileRead { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn text_and_json_reports() {
    let dir = tempfile::tempdir().unwrap();
    let paths = project(&dir);
    let engine = LintEngine::new(LintConfig::default());
    let diags = engine.check_paths(&paths).unwrap();

    let mut text = Vec::new();
    engine.write_report(&mut text, &diags).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec![
            "app.php:2:5: warning[CRT001] always false condition",
            "app.php:4:1: warning[CRT002] suspiciously duplicated LHS and RHS of '-'",
        ]
    );

    let mut json = Vec::new();
    write_diagnostics(&mut json, &diags, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["diagnostics"][1]["code_name"], "dup-sub-expr");
}

#[test]
fn config_file_selects_report_format() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[output]\nformat = \"json\"\n").unwrap();
    let paths = project(&dir);

    let engine = LintEngine::new(config_from(dir.path()));
    assert_eq!(engine.config().output_format, Some(OutputFormat::Json));
    let diags = engine.check_paths(&paths).unwrap();

    let mut report = Vec::new();
    engine.write_report(&mut report, &diags).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&report).unwrap();
    assert_eq!(value["version"], "1");
    assert_eq!(value["summary"]["by_rule"]["CRT001"], 1);

    // An explicit format beats the file.
    let text_engine = LintEngine::new(
        LintConfig::default()
            .with_output_format(OutputFormat::Text)
            .merge_file_config(&discover_and_load_config(dir.path()).unwrap().unwrap().0),
    );
    let mut report = Vec::new();
    text_engine.write_report(&mut report, &diags).unwrap();
    assert!(String::from_utf8(report).unwrap().starts_with("app.php:2:5:"));
}

#[test]
fn deep_constant_chain_is_checked_without_crashing() {
    let mut stmts = vec![const_stmt("LEVEL_0", int("1"))];
    for i in 1..20_000 {
        stmts.push(const_stmt(
            &format!("LEVEL_{i}"),
            constant(&format!("LEVEL_{}", i - 1)),
        ));
    }
    stmts.push(expr_stmt(binary(BinaryOp::Equal, constant("LEVEL_19999"), int("1"))));
    stmts.push(expr_stmt(binary(BinaryOp::Equal, constant("LEVEL_3"), int("1"))));
    let units = vec![
        SourceUnit::new("deep.php", stmts),
        SourceUnit::new("other.php", vec![expr_stmt(binary(BinaryOp::Equal, int("1"), int("2")))]),
    ];

    let diags = LintEngine::new(LintConfig::default()).check(&units);
    let messages: Vec<(&str, &str)> = diags
        .iter()
        .map(|d| (d.file.to_str().unwrap_or_default(), d.message.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            ("deep.php", "always true condition"),
            ("other.php", "always false condition"),
        ]
    );
}
