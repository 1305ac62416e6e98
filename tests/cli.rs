//! Tests for the `jlc` binary: exit codes and the messages printed for each
//! outcome.

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn jlc() -> Command {
    Command::cargo_bin("jlc").unwrap()
}

#[test]
fn cli_accepts_valid_program_from_stdin() {
    jlc()
        .write_stdin("int main() { printInt(42); return 0; }")
        .assert()
        .success()
        .stderr(contains("OK"));
}

#[test]
fn cli_reports_parse_failure() {
    jlc()
        .write_stdin("int main() {\n  return 0\n}\n")
        .assert()
        .failure()
        .stderr(contains("Parsing failed").and(contains("SyntaxError")));
}

#[test]
fn cli_reports_semantic_failure() {
    jlc()
        .write_stdin("int main() {\n  string x;\n  x++;\n  return 0;\n}\n")
        .assert()
        .failure()
        .stderr(contains(
            "Compilation failed: BadAssignIncDecType at line 3: ( x ++ )",
        ));
}

#[test]
fn cli_reads_file_and_emits_tree() {
    let path = std::env::temp_dir().join("jlc_cli_emit_tree.jl");
    fs::write(&path, "int main() { return 1 + 2; }").unwrap();

    jlc()
        .arg(&path)
        .arg("--emit-tree")
        .assert()
        .success()
        .stdout(contains("( ( int main ( ) ( ( return ( ( 1 ) + ( 2 ) ) ) ) ) )"));

    let _ = fs::remove_file(path);
}

#[test]
fn cli_emits_typed_ast() {
    jlc()
        .arg("--emit-ast")
        .write_stdin("int main() { return 0; }")
        .assert()
        .success()
        .stdout(contains("FnDecl").and(contains("has_return: true")));
}

#[test]
fn cli_fails_on_missing_file() {
    jlc()
        .arg("does/not/exist.jl")
        .assert()
        .failure()
        .stderr(contains("Failed to read input"));
}

#[test]
fn cli_verbose_prints_timings() {
    jlc()
        .arg("--verbose")
        .write_stdin("int main() { return 0; }")
        .assert()
        .success()
        .stderr(contains("Tokenized in").and(contains("Type checked in")));
}
