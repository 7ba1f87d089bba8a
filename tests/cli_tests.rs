use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_keyevolve");

struct TestContext {
    _dir: TempDir,
    corpus_dir: PathBuf,
    config_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let corpus_dir = dir.path().join("corpus");
        std::fs::create_dir(&corpus_dir).unwrap();

        let mut a = File::create(corpus_dir.join("a.txt")).unwrap();
        writeln!(a, "the quick brown fox jumps over the lazy dog").unwrap();
        let mut b = File::create(corpus_dir.join("b.txt")).unwrap();
        writeln!(b, "Pack my box with five dozen liquor jugs!").unwrap();

        let config_path = dir.path().join("config.json");
        let mut cfg = File::create(&config_path).unwrap();
        writeln!(
            cfg,
            r#"{{ "search": {{ "population_size": 3, "generations": 2 }} }}"#
        )
        .unwrap();

        Self {
            _dir: dir,
            corpus_dir,
            config_path,
        }
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn extract_score(output: &str) -> Option<f64> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Score:"))
        .and_then(|s| s.trim().parse().ok())
}

#[test]
fn test_cli_search_execution() {
    let ctx = TestContext::new();
    let output = run(&[
        "search",
        "--corpus",
        ctx.corpus_dir.to_str().unwrap(),
        "--population-size",
        "4",
        "--generations",
        "3",
        "--seed",
        "7",
        "--show-shift",
    ]);

    let out = stdout(&output);
    assert!(
        output.status.success(),
        "STDERR:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let score = extract_score(&out).expect("score line missing");
    assert!(score > 0.0);
    assert!(out.contains("NON-SHIFT"));
    assert!(out.contains("\nSHIFT"));
}

#[test]
fn test_cli_search_is_deterministic() {
    let args = [
        "search",
        "--text",
        "hello world, this is a reproducible corpus",
        "--population-size",
        "5",
        "--generations",
        "5",
        "--optimize-shape",
        "--seed",
        "12345",
    ];

    let a = stdout(&run(&args));
    let b = stdout(&run(&args));
    let score_a = extract_score(&a);
    assert!(score_a.is_some(), "Failed to parse score from output:\n{}", a);
    assert_eq!(score_a, extract_score(&b), "Determinism check failed");
    assert_eq!(a, b);
}

#[test]
fn test_cli_validate_lists_catalog() {
    let output = run(&["validate", "--text", "the quick brown fox"]);
    assert!(output.status.success());
    let out = stdout(&output);
    for name in ["qwerty", "dvorak", "colemak", "workman"] {
        assert!(out.contains(name), "{} missing from report", name);
    }
}

#[test]
fn test_cli_validate_filter() {
    let output = run(&["validate", "--text", "abc", "--layout", "Colemak"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("colemak"));
    assert!(!out.contains("dvorak"));
}

#[test]
fn test_cli_config_file_with_override() {
    let ctx = TestContext::new();
    let output = run(&[
        "search",
        "--config",
        ctx.config_path.to_str().unwrap(),
        "--corpus",
        ctx.corpus_dir.to_str().unwrap(),
        "--generations",
        "1",
        "--seed",
        "3",
    ]);
    assert!(
        output.status.success(),
        "STDERR:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(extract_score(&stdout(&output)).is_some());
}

#[test]
fn test_cli_rejects_bad_rate() {
    let output = run(&["search", "--text", "abc", "--mutation-rate", "1.5"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("mutation_rate"));
}

#[test]
fn test_cli_missing_corpus_fails() {
    let output = run(&["validate", "--corpus", "/no/such/corpus/dir"]);
    assert!(!output.status.success());
}

fn write_layout(ctx: &TestContext) -> PathBuf {
    let path = ctx.corpus_dir.parent().unwrap().join("split.json");
    let mut f = File::create(&path).unwrap();
    writeln!(
        f,
        r#"{{ "rows": [["qwert", "QWERT"], ["asdfg", "ASDFG"], ["zxcvb", "ZXCVB"]], "home_keys": "asdf" }}"#
    )
    .unwrap();
    path
}

#[test]
fn test_cli_validate_applies_home_keys() {
    let output = run(&["validate", "--text", "fjfj", "--home-keys", "fj"]);
    assert!(
        output.status.success(),
        "STDERR:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert_eq!(out.matches("Home keys: fj\n").count(), 4);

    let output = run(&["validate", "--text", "abc", "--home-keys", "€"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_layout_file() {
    let ctx = TestContext::new();
    let layout_path = write_layout(&ctx);
    let layout_arg = layout_path.to_str().unwrap();

    let output = run(&[
        "validate",
        "--text",
        "sad craft",
        "--layout-file",
        layout_arg,
        "--layout",
        "split",
    ]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("split.json"));
    assert!(out.contains("Home keys: asdf"));
    assert!(!out.contains("qwerty"));

    let output = run(&[
        "search",
        "--text",
        "sad craft",
        "--layout-file",
        layout_arg,
        "--population-size",
        "3",
        "--generations",
        "2",
        "--seed",
        "9",
    ]);
    assert!(
        output.status.success(),
        "STDERR:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(extract_score(&out).is_some());
    assert!(!out.contains('`'));
}
