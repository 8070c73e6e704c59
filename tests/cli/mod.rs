//! Tests for the sqlframe binary
//!
//! Each test scripts a short pipeline as a series of invocations against a
//! database file in a temporary directory.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::{create_custom_csv, create_temp_dir, movies_csv, prepare_test_file};

fn sqlframe(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sqlframe").unwrap();
    cmd.arg("-d").arg(db);
    cmd
}

#[test]
fn test_load_map_query() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let file = prepare_test_file(temp_dir.path())?;
    let db = temp_dir.path().join("people.db");

    sqlframe(&db)
        .args(["exec", "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT, age INTEGER, tag TEXT);"])
        .assert()
        .success();

    sqlframe(&db)
        .args(["load", "people"])
        .arg(&file)
        .args(["--rename", "Full Name=name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 rows into people"));

    sqlframe(&db)
        .args([
            "map", "people", "--key", "id", "--from", "name", "--to", "tag", "--where", "age > 30",
            "--transform", "sanitize",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 2 rows"));

    sqlframe(&db)
        .args(["query", "SELECT id, name, tag FROM people ORDER BY id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id,name,tag"))
        .stdout(predicate::str::contains("1,Alice,alice"))
        .stdout(predicate::str::contains("2,Bob O'Hara,\n"))
        .stdout(predicate::str::contains("3,Charlie,charlie"));

    Ok(())
}

#[test]
fn test_scalar_and_columns() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let db = temp_dir.path().join("t.db");

    sqlframe(&db)
        .args(["exec", "CREATE TABLE t (a INTEGER, b TEXT)"])
        .assert()
        .success();

    // empty table: no columns can be discovered
    sqlframe(&db)
        .args(["columns", "t"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    sqlframe(&db)
        .args(["exec", "INSERT INTO t(a, b) VALUES (7, 'x')"])
        .assert()
        .success();

    sqlframe(&db)
        .args(["columns", "t"])
        .assert()
        .success()
        .stdout("a\nb\n");

    sqlframe(&db)
        .args(["scalar", "SELECT a FROM t"])
        .assert()
        .success()
        .stdout("7\n");

    sqlframe(&db)
        .args(["scalar", "SELECT a FROM t WHERE a > 100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query returned no rows"));

    Ok(())
}

#[test]
fn test_shape_mismatch_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let file = create_custom_csv(temp_dir.path(), "bad.csv", "a,b\n1,2\n3\n")?;
    let db = temp_dir.path().join("bad.db");

    sqlframe(&db)
        .args(["exec", "CREATE TABLE t (a, b)"])
        .assert()
        .success();

    sqlframe(&db)
        .args(["load", "t"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 2 has 1 fields, header has 2"));

    Ok(())
}

#[test]
fn test_demo() {
    Command::cargo_bin("sqlframe")
        .unwrap()
        .arg("demo")
        .arg(movies_csv())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "id,original_title,revenue_adj,revenue_adj_log",
        ))
        .stdout(predicate::str::contains("Jurassic World"))
        .stdout(predicate::str::contains("Mad Max: Fury Road"));
}

#[test]
fn test_verbose_logs_statements() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let db = temp_dir.path().join("v.db");

    sqlframe(&db)
        .env_remove("RUST_LOG")
        .args(["-v", "exec", "CREATE TABLE v (a)"])
        .assert()
        .success()
        .stderr(predicate::str::contains("CREATE TABLE v (a)"));

    Ok(())
}

#[test]
fn test_exec_runs_several_statements() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let db = temp_dir.path().join("batch.db");

    sqlframe(&db)
        .args(["exec", "CREATE TABLE t (a); INSERT INTO t(a) VALUES (1);"])
        .assert()
        .success();

    sqlframe(&db)
        .args(["scalar", "SELECT COUNT(*) FROM t"])
        .assert()
        .success()
        .stdout("1\n");

    sqlframe(&db)
        .args(["query", "SELECT a FROM t WHERE a > 100"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}
