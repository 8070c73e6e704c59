//! Store boundary for sqlframe
//!
//! Every operation in this crate talks to the relational store through the
//! [`Store`] trait: execute a statement, or run a query and visit each row.
//! Rows carry the result's column names alongside their values, so they can
//! be read by position or by name.
//!
//! The store handle is always owned by the caller and passed in explicitly.
//! Implementations are provided for `rusqlite::Connection` and
//! `rusqlite::Transaction`.

use rusqlite::{Connection, Transaction};
use tracing::debug;

use crate::error::GlueResult;
use crate::value::Value;

/// One result row, addressable by position and by column name
#[derive(Debug, Clone)]
pub struct Row<'a> {
    columns: &'a [String],
    values: Vec<Value>,
}

impl<'a> Row<'a> {
    pub fn new(columns: &'a [String], values: Vec<Value>) -> Self {
        Row { columns, values }
    }

    /// Column names of the result this row belongs to
    pub fn keys(&self) -> &'a [String] {
        self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Look a value up by column name (first match wins)
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|column| column == name)
            .and_then(|index| self.values.get(index))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Cursor-style interface to a relational store
///
/// Both methods block until the store has finished; `query_rows` drains the
/// whole result before returning.
pub trait Store {
    /// Execute a statement that returns no rows
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows changed, as reported by the store
    /// * `Err` - Store errors, passed through
    fn execute_sql(&mut self, sql: &str) -> GlueResult<usize>;

    /// Run a query and hand every row to `visit`, in result order
    ///
    /// An error returned by `visit` stops the iteration and is returned.
    fn query_rows(
        &mut self,
        sql: &str,
        visit: &mut dyn FnMut(Row<'_>) -> GlueResult<()>,
    ) -> GlueResult<()>;
}

fn execute_on(conn: &Connection, sql: &str) -> GlueResult<usize> {
    debug!(sql, "execute");
    Ok(conn.execute(sql, [])?)
}

fn query_on(
    conn: &Connection,
    sql: &str,
    visit: &mut dyn FnMut(Row<'_>) -> GlueResult<()>,
) -> GlueResult<()> {
    debug!(sql, "query");
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for index in 0..width {
            values.push(Value::from(row.get_ref(index)?));
        }
        visit(Row::new(&columns, values))?;
    }
    Ok(())
}

impl Store for Connection {
    fn execute_sql(&mut self, sql: &str) -> GlueResult<usize> {
        execute_on(self, sql)
    }

    fn query_rows(
        &mut self,
        sql: &str,
        visit: &mut dyn FnMut(Row<'_>) -> GlueResult<()>,
    ) -> GlueResult<()> {
        query_on(self, sql, visit)
    }
}

/// Lets a whole pipeline run inside one transaction and be committed once
impl Store for Transaction<'_> {
    fn execute_sql(&mut self, sql: &str) -> GlueResult<usize> {
        execute_on(self, sql)
    }

    fn query_rows(
        &mut self,
        sql: &str,
        visit: &mut dyn FnMut(Row<'_>) -> GlueResult<()>,
    ) -> GlueResult<()> {
        query_on(self, sql, visit)
    }
}
