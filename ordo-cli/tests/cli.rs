use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn ordo() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ordo"));
    command.env_remove("ORDO_PROFILE").env_remove("RUST_LOG");
    command
}

#[test]
fn sorts_stdin_by_chained_keys() {
    ordo()
        .args(["-t", ",", "-k", "1", "-k", "2"])
        .write_stdin("Lee,Ann\nLee,Bob\nHan,Zoe\n")
        .assert()
        .success()
        .stdout("Han,Zoe\nLee,Ann\nLee,Bob\n");
}

#[test]
fn writes_numeric_descending_to_file() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("scores.csv");
    fs::write(&input_path, "ann,3\nbob,\ncid,10\ndee,1\n").expect("write input");
    let output_path = dir.path().join("nested/out.csv");

    ordo()
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .args(["--delimiter", ",", "--key", "2:int:desc"])
        .assert()
        .success();

    let sorted = fs::read_to_string(&output_path).expect("read output");
    assert_eq!(sorted, "cid,10\nann,3\ndee,1\nbob,\n");
}

#[test]
fn reverses_whole_lines_without_keys() {
    ordo()
        .arg("--reverse")
        .write_stdin("b\na\nc\n")
        .assert()
        .success()
        .stdout("c\nb\na\n");
}

#[test]
fn drops_equal_neighbours_with_unique() {
    ordo()
        .args(["-u", "-k", "1:fold"])
        .write_stdin("b 1\nA 2\na 3\nB 4\n")
        .assert()
        .success()
        .stdout("A 2\nb 1\n");
}

#[test]
fn applies_profile_settings() {
    let dir = tempdir().expect("tempdir");
    let profile_path = dir.path().join("profile.toml");
    fs::write(
        &profile_path,
        "delimiter = \":\"\nkeys = [\"3:int\", \"1\"]\n",
    )
    .expect("write profile");

    ordo()
        .arg("--profile")
        .arg(&profile_path)
        .write_stdin("root:x:0\nbin:x:2\ndaemon:x:1\nadm:x:2\n")
        .assert()
        .success()
        .stdout("root:x:0\ndaemon:x:1\nadm:x:2\nbin:x:2\n");
}

#[test]
fn reads_profile_from_environment() {
    let dir = tempdir().expect("tempdir");
    let profile_path = dir.path().join("profile.toml");
    fs::write(&profile_path, "keys = [\"2:int\"]\nreverse = true\n").expect("write profile");

    ordo()
        .env("ORDO_PROFILE", &profile_path)
        .write_stdin("a 1\nb 3\nc 2\n")
        .assert()
        .success()
        .stdout("b 3\nc 2\na 1\n");
}

#[test]
fn reports_missing_profile() {
    let dir = tempdir().expect("tempdir");
    ordo()
        .arg("--profile")
        .arg(dir.path().join("missing.toml"))
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read profile"));
}

#[test]
fn check_accepts_sorted_input() {
    ordo()
        .args(["--check", "-k", "1:int"])
        .write_stdin("1\n2\n2\n10\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn check_reports_first_disorder() {
    ordo()
        .args(["--check", "-k", "1:int"])
        .write_stdin("1\n10\n2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("disorder at line 3"));
}

#[test]
fn check_with_unique_rejects_duplicates() {
    ordo()
        .args(["--check", "--unique"])
        .write_stdin("a\nb\nb\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("disorder at line 3"));
}

#[test]
fn reports_malformed_numeric_field() {
    ordo()
        .args(["-k", "1:int"])
        .write_stdin("1\ntwo\n3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2, field 1"));
}

#[test]
fn reports_invalid_key() {
    ordo()
        .args(["-k", "0"])
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sort key '0'"));
}

#[test]
fn single_verbose_flag_enables_debug_logging() {
    ordo()
        .args(["-v", "-k", "1"])
        .write_stdin("b\na\n")
        .assert()
        .success()
        .stdout("a\nb\n")
        .stderr(predicate::str::contains("resolved settings"));
}

#[test]
fn quiet_by_default() {
    ordo()
        .write_stdin("b\na\n")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn blank_numeric_cells_sort_as_absent() {
    ordo()
        .args(["-t", ",", "-k", "2:int"])
        .write_stdin("a,3\nb, \nc,1\n")
        .assert()
        .success()
        .stdout("b, \nc,1\na,3\n");
}
