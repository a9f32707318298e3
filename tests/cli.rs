//! End-to-end tests of the real `rocks` binary: argv dispatch, process exit
//! codes, and file I/O. Unlike the other `tests/*.rs` files, these drive
//! the compiled executable itself rather than `Rocks` directly, so they
//! exercise `main.rs`'s argument handling and `std::fs::read_to_string`.

use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;

fn script(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".rocks").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn running_a_valid_script_exits_zero_and_prints_to_stdout() {
    let file = script("print 1 + 1;");
    Command::cargo_bin("rocks")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn syntax_error_exits_65() {
    let file = script("var = ;");
    Command::cargo_bin("rocks").unwrap().arg(file.path()).assert().code(65);
}

#[test]
fn runtime_error_exits_70() {
    let file = script("print \"ok\"; print 1 / 0; print \"unreached\";");
    Command::cargo_bin("rocks")
        .unwrap()
        .arg(file.path())
        .assert()
        .code(70)
        .stdout("ok\n");
}

#[test]
fn too_many_arguments_exits_64_with_usage_message() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("one")
        .arg("two")
        .assert()
        .code(64)
        .stderr(contains("Usage"));
}

#[test]
fn unreadable_script_exits_66() {
    Command::cargo_bin("rocks").unwrap().arg("/no/such/file.rocks").assert().code(66);
}
