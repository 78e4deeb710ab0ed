use assert_cmd::Command;
use predicates::prelude::*;

fn pegcalc() -> Command {
    Command::cargo_bin("pegcalc").unwrap()
}

#[test]
fn evaluates_lines_in_one_session() {
    pegcalc()
        .args(["--no-tree", "x = 5", "x + 1", "(x - 1) * 2 / 4"])
        .assert()
        .success()
        .stdout("5\n6\n2\n");
}

#[test]
fn reports_errors_and_keeps_going() {
    pegcalc()
        .args(["--no-tree", "1/0", "y", "2+", "8-2-2"])
        .assert()
        .success()
        .stdout("divide by 0 error\nundefined variable: 'y'\nsyntax error...\n4\n");
}

#[test]
fn prints_syntax_tree_by_default() {
    pegcalc()
        .arg("1+2")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("+ START[ADDITIVE]\n"))
        .stdout(predicate::str::contains("  - ADDITIVE_OPERATOR (+)\n"))
        .stdout(predicate::str::ends_with("3\n"));
}
