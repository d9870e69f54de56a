use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Test: top-level help lists every command group.
#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("bookverse")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("books"))
        .stdout(predicate::str::contains("config"));
}

/// Test: books help lists the read and admin subcommands.
#[test]
fn test_books_help_lists_subcommands() {
    cargo_bin_cmd!("bookverse")
        .args(["books", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("categories"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"));
}

/// Test: version flag works.
#[test]
fn test_version_flag() {
    cargo_bin_cmd!("bookverse")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookverse"));
}
