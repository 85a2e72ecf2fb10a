use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const DATE: &str = "2026-10-14";

fn cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_docstring-md")));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn titled(cmd: &mut assert_cmd::Command) -> &mut assert_cmd::Command {
    cmd.args(["-t", "Example", "--description", "An excellent project!", "--date", DATE])
}

// -- single-document mode --

#[test]
fn single_document_matches_expected() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .args(["-o", "docs"])
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("docs/API.md")).unwrap();
    let expected = fs::read_to_string(fixture_path("mathlib.expected.md")).unwrap();
    assert_eq!(output, expected);
    assert!(!dir.path().join("docs/index.md").exists());
}

#[test]
fn stdout_mode_writes_no_files() {
    let dir = TempDir::new().unwrap();
    let expected = fs::read_to_string(fixture_path("mathlib.expected.md")).unwrap();

    titled(&mut cmd(&dir))
        .arg("--stdout")
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success()
        .stdout(expected);

    assert!(!dir.path().join("API.md").exists());
}

#[test]
fn missing_docstrings_are_reported() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .arg("--stdout")
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success()
        .stderr(predicate::str::contains("no docstring found for mathlib.helper"));
}

#[test]
fn custom_single_document_name() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".dsm.cfg"),
        r#"{"single_doc_name": "REFERENCE.md"}"#,
    )
    .unwrap();

    titled(&mut cmd(&dir))
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success();

    assert!(dir.path().join("REFERENCE.md").exists());
    assert!(!dir.path().join("API.md").exists());
}

// -- multi-file mode --

#[test]
fn multi_file_mode_writes_index() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .args(["--multi", "-o", "out"])
        .arg(fixture_path("mathlib.py"))
        .arg(fixture_path("shapes.py"))
        .assert()
        .success();

    let out = dir.path().join("out");
    let mathlib = fs::read_to_string(out.join("mathlib.md")).unwrap();
    assert!(mathlib.starts_with("# Example\n\nAn excellent project!\n\n## FILE: mathlib\n"));
    assert!(!mathlib.contains("## Index"));

    let shapes = fs::read_to_string(out.join("shapes.md")).unwrap();
    assert!(shapes.contains("### CLASS: shapes.Circle\n\nA circle.\n"));
    assert!(shapes.contains("### FUNCTION: shapes.Circle.area\n"));
    assert!(shapes.contains("**Returns:**\n- the area"));
    assert!(!shapes.contains("__init__"));

    let index = fs::read_to_string(out.join("index.md")).unwrap();
    assert!(index.contains("- [mathlib](mathlib.md#file-mathlib): Math helpers.\n"));
    assert!(index.contains("  - [mathlib.add](mathlib.md#function-mathlibadd)\n"));
    assert!(index.contains("  - [shapes.Circle](shapes.md#class-shapescircle)\n"));
    assert!(index.contains("    - [shapes.Circle.area](shapes.md#function-shapescirclearea)\n"));
    assert!(index.ends_with("14 October 2026*\n"));
}

#[test]
fn directory_scan_skips_excluded_files() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("pkg")).unwrap();
    fs::write(src.join("pkg/util.py"), "\"\"\"Utilities.\"\"\"\n").unwrap();
    fs::write(src.join("pkg/__init__.py"), "\"\"\"Package.\"\"\"\n").unwrap();
    fs::write(src.join("test_util.py"), "\"\"\"Tests.\"\"\"\n").unwrap();

    titled(&mut cmd(&dir))
        .args(["--multi", "src"])
        .assert()
        .success();

    assert!(dir.path().join("pkg.util.md").exists());
    assert!(!dir.path().join("test_util.md").exists());
    let index = fs::read_to_string(dir.path().join("index.md")).unwrap();
    assert!(index.contains("- [pkg.util](pkg.util.md#file-pkgutil): Utilities."));
    assert!(!index.contains("Package."));
}

// -- options --

#[test]
fn show_source_appends_code() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .args(["--stdout", "-c"])
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success()
        .stdout(predicate::str::contains("```python\ndef add(a, b):\n"))
        .stdout(predicate::str::contains("    return a + b\n```\n"));
}

#[test]
fn source_links_point_at_files() {
    let dir = TempDir::new().unwrap();
    let source = fixture_path("mathlib.py");

    titled(&mut cmd(&dir))
        .args(["--stdout", "--source-links"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("## FILE: [mathlib]({})", source)))
        .stdout(predicate::str::contains(format!("[source]({})", source)));
}

// -- configuration --

#[test]
fn missing_title_fails() {
    let dir = TempDir::new().unwrap();

    cmd(&dir)
        .args(["--description", "Text", "--stdout"])
        .arg(fixture_path("mathlib.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("title must be defined"));
}

#[test]
fn saved_settings_are_reused() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .args(["--save", "--stdout"])
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success();

    let saved = fs::read_to_string(dir.path().join(".dsm.cfg")).unwrap();
    assert!(saved.contains("\"title\": \"Example\""));

    cmd(&dir)
        .args(["--stdout", "--date", DATE])
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Example\n\nAn excellent project!\n"));
}

#[test]
fn unknown_config_keys_warn() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".dsm.cfg"), r#"{"colour": "blue"}"#).unwrap();

    titled(&mut cmd(&dir))
        .arg("--stdout")
        .arg(fixture_path("mathlib.py"))
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring unknown configuration key: colour"));
}

// -- tree input --

#[test]
fn tree_input_renders() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .args(["--stdout", "--tree"])
        .arg(fixture_path("units.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("## FILE: net\n\nNetworking helpers.\n"))
        .stdout(predicate::str::contains(
            "### FUNCTION: net.connect\n\nOpen a connection.\n\n**Args:**\n- host: remote host\n\n**Returns:**\n- the socket\n",
        ));
}

#[test]
fn malformed_tree_writes_nothing() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .args(["-o", "docs", "--tree"])
        .arg(fixture_path("malformed.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot render documentation tree"));

    assert!(!dir.path().join("docs/API.md").exists());
}

#[test]
fn tree_and_inputs_conflict() {
    let dir = TempDir::new().unwrap();

    titled(&mut cmd(&dir))
        .args(["--tree", "units.json", "mod.py"])
        .assert()
        .failure();
}
