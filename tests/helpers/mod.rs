//! Test helpers for sqlframe integration tests
//!
//! Scratch files, a seeded store, and a store wrapper that records the
//! order in which reads and writes reach the database.

use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rusqlite::Connection;
use sqlframe::{GlueResult, Row, Store, Value};
use tempfile::TempDir;

/// Helper function to create a temp directory for tests, respecting CARGO_TARGET_TMPDIR if set
pub fn create_temp_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    if let Ok(cargo_target_tmpdir) = env::var("CARGO_TARGET_TMPDIR") {
        fs::create_dir_all(&cargo_target_tmpdir)?;
        Ok(TempDir::new_in(cargo_target_tmpdir)?)
    } else {
        Ok(TempDir::new()?)
    }
}

/// Helper function to create a standard test CSV file with people data
pub fn prepare_test_file(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    create_custom_csv(dir, "people.csv", "id,Full Name,age\n1,Alice,32\n2,Bob O'Hara,25\n3,Charlie,35\n")
}

/// Helper function to create a test CSV file with custom data
pub fn create_custom_csv(
    dir: &Path,
    filename: &str,
    content: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Path to the sample movie file shipped with the crate
pub fn movies_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/movies.csv")
}

/// Read every row of a query as plain values
pub fn fetch_all(conn: &mut Connection, sql: &str) -> Vec<Vec<Value>> {
    let mut rows = Vec::new();
    conn.query_rows(sql, &mut |row| {
        rows.push(row.into_values());
        Ok(())
    })
    .unwrap();
    rows
}

/// What reached the store, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Query(String),
    RowRead(Vec<Value>),
    QueryDone,
    Execute(String),
    Transform(Value),
}

/// Shared, append-only event log
pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// Store wrapper that logs every read and write before forwarding it
pub struct RecordingStore {
    pub inner: Connection,
    pub log: EventLog,
}

impl RecordingStore {
    pub fn new(inner: Connection) -> Self {
        RecordingStore {
            inner,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }
}

impl Store for RecordingStore {
    fn execute_sql(&mut self, sql: &str) -> GlueResult<usize> {
        self.log.borrow_mut().push(Event::Execute(sql.to_string()));
        self.inner.execute_sql(sql)
    }

    fn query_rows(
        &mut self,
        sql: &str,
        visit: &mut dyn FnMut(Row<'_>) -> GlueResult<()>,
    ) -> GlueResult<()> {
        self.log.borrow_mut().push(Event::Query(sql.to_string()));
        let log = Rc::clone(&self.log);
        self.inner.query_rows(sql, &mut |row| {
            log.borrow_mut().push(Event::RowRead(row.values().to_vec()));
            visit(row)
        })?;
        self.log.borrow_mut().push(Event::QueryDone);
        Ok(())
    }
}
