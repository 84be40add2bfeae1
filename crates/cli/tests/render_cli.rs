use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

const PARAMS: &str = r#"
a:
  type: calculation
  expression: "2"
b:
  type: calculation
  expression: "a * 3"
x:
  type: input
  inputType: number
  default: 5
"#;

#[test]
fn render_substitutes_calculations() {
    let dir = TempDir::new().unwrap();
    let template = write_file(&dir, "doc.md", "# Report\n\nb is ${b}\n");
    let params = write_file(&dir, "params.yaml", PARAMS);

    Command::cargo_bin("cdoc")
        .unwrap()
        .args([
            "render",
            "--template",
            template.to_str().unwrap(),
            "--params",
            params.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Report</h1>"))
        .stdout(predicate::str::contains("b is 6"));
}

#[test]
fn render_leaves_anchor_for_inputs() {
    let dir = TempDir::new().unwrap();
    let template = write_file(&dir, "doc.md", "choose ${x}\n");
    let params = write_file(&dir, "params.yaml", PARAMS);

    Command::cargo_bin("cdoc")
        .unwrap()
        .args([
            "render",
            "--template",
            template.to_str().unwrap(),
            "--params",
            params.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<a href=\"#eval-x\">x</a>"));
}

#[test]
fn render_honours_stored_values() {
    let dir = TempDir::new().unwrap();
    let template = write_file(&dir, "doc.md", "y is ${y}\n");
    let params = write_file(
        &dir,
        "params.yaml",
        r#"
x:
  type: input
  inputType: number
  default: 5
y:
  type: calculation
  expression: "x * 2"
"#,
    );
    let values = write_file(&dir, "values.yaml", "x: 10\n");

    Command::cargo_bin("cdoc")
        .unwrap()
        .args([
            "render",
            "--template",
            template.to_str().unwrap(),
            "--params",
            params.to_str().unwrap(),
            "--values",
            values.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("y is 20"));
}

#[test]
fn render_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let template = write_file(&dir, "doc.md", "b is ${b}\n");
    let params = write_file(&dir, "params.yaml", PARAMS);
    let output = dir.path().join("out.html");

    Command::cargo_bin("cdoc")
        .unwrap()
        .args([
            "render",
            "--template",
            template.to_str().unwrap(),
            "--params",
            params.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let html = fs::read_to_string(output).unwrap();
    assert!(html.contains("b is 6"));
}

#[test]
fn render_emits_math_markup() {
    let dir = TempDir::new().unwrap();
    let template = write_file(&dir, "doc.md", "$$E = \\eval{b}$$\n");
    let params = write_file(&dir, "params.yaml", PARAMS);

    Command::cargo_bin("cdoc")
        .unwrap()
        .args([
            "render",
            "--template",
            template.to_str().unwrap(),
            "--params",
            params.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("math display"))
        .stdout(predicate::str::contains("E = 6"));
}

#[test]
fn render_fails_on_unbalanced_math_fence() {
    let dir = TempDir::new().unwrap();
    let template = write_file(&dir, "doc.md", "broken $$x^2\n");
    let params = write_file(&dir, "params.yaml", PARAMS);

    Command::cargo_bin("cdoc")
        .unwrap()
        .args([
            "render",
            "--template",
            template.to_str().unwrap(),
            "--params",
            params.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated math region"));
}

#[test]
fn render_fails_on_undeclared_placeholder() {
    let dir = TempDir::new().unwrap();
    let template = write_file(&dir, "doc.md", "${ghost}\n");
    let params = write_file(&dir, "params.yaml", PARAMS);

    Command::cargo_bin("cdoc")
        .unwrap()
        .args([
            "render",
            "--template",
            template.to_str().unwrap(),
            "--params",
            params.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}
