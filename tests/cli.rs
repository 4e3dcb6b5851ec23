// End-to-end checks of the jsontree binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::NamedTempFile;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn jsontree() -> Command {
    Command::cargo_bin("jsontree").unwrap()
}

#[test]
fn cli_without_arguments_prints_usage() {
    jsontree()
        .assert()
        .success()
        .stdout(contains("Usage: jsontree input_json"));
}

#[test]
fn cli_reports_unopenable_file() {
    jsontree()
        .arg("definitely/not/here.json")
        .assert()
        .code(1)
        .stderr(contains("Could not open file definitely/not/here.json"));
}

#[test]
fn cli_dumps_tokens_and_tree() {
    let file = json_file("{\"a\": [1, true]}\n");
    let expected = "\
line: 1: {
line: 1: a
line: 1: :
line: 1: [
line: 1: 1.000000
line: 1: ,
line: 1: TRUE
line: 1: ]
line: 1: }
OBJECT
\tPAIR
\t\tSTRING: a
\t\tARRAY
\t\t\tNUMBER: 1.000000
\t\t\tTRUE
";
    jsontree().arg(file.path()).assert().success().stdout(expected);
}

#[test]
fn cli_prints_trailing_tokens_before_the_tree() {
    let file = json_file("[]\nnull\n");
    jsontree()
        .arg(file.path())
        .assert()
        .success()
        .stdout("line: 1: [\nline: 1: ]\nline: 2: NULL\nline: 2: NULL\nARRAY\n");
}

#[test]
fn cli_parse_failure_prints_no_tree_and_still_succeeds() {
    let file = json_file("[1,\n");
    jsontree()
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("ARRAY").not())
        .stdout(contains("line: 1: ["));
}

#[test]
fn cli_lex_failure_is_reported_on_stderr() {
    let file = json_file("[1, #]\n");
    jsontree()
        .arg(file.path())
        .assert()
        .success()
        .stdout("")
        .stderr(contains("Unexpected character '#' at line 1, column 5"));
}

#[test]
fn cli_rejects_overlong_lines() {
    let file = json_file("[1, 2, 3, 4, 5]\n");
    jsontree()
        .arg("--max-line-len")
        .arg("8")
        .arg(file.path())
        .assert()
        .success()
        .stdout("")
        .stderr(contains("exceeds the maximum line length of 8 bytes"));
}

#[test]
fn cli_depth_limit() {
    let file = json_file("[[[1]]]\n");
    jsontree()
        .arg("--max-depth")
        .arg("2")
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("ARRAY").not());
}

#[test]
fn cli_accepts_the_largest_line_len() {
    let file = json_file("[1]\n");
    jsontree()
        .arg("--max-line-len")
        .arg(usize::MAX.to_string())
        .arg(file.path())
        .assert()
        .success()
        .stdout("line: 1: [\nline: 1: 1.000000\nline: 1: ]\nARRAY\n\tNUMBER: 1.000000\n");
}

#[test]
fn cli_reads_numbers_with_bare_markers() {
    let file = json_file("[1., 2e]\n");
    jsontree()
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("ARRAY\n\tNUMBER: 1.000000\n\tNUMBER: 2.000000\n"));
}
