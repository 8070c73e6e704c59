//! Query helpers for sqlframe
//!
//! Three ways of reading from the store:
//!
//! - [`query_to_frame`] materializes any query into a [`Frame`]
//! - [`query_scalar`] reduces a query to one value
//! - [`field_names`] lists the columns of an existing table
//!
//! Column names always come from the metadata of the first returned row, so
//! a query that returns nothing yields no column names either.

use tracing::debug;

use crate::error::{GlueError, GlueResult};
use crate::frame::Frame;
use crate::store::Store;
use crate::value::Value;

/// Run `sql` and collect the result column by column
///
/// A query returning zero rows gives an empty frame with no columns, even
/// when the store knows the result's column names. Result columns sharing a
/// name collapse into one frame column holding the later column's values.
///
/// # Example
/// ```
/// # use rusqlite::Connection;
/// # use sqlframe::query::query_to_frame;
/// let mut conn = Connection::open_in_memory().unwrap();
/// let frame = query_to_frame(&mut conn, "SELECT 1 AS one, 'a' AS letter").unwrap();
/// assert_eq!(frame.columns(), ["one".to_string(), "letter".to_string()]);
/// assert_eq!(frame.height(), 1);
/// ```
pub fn query_to_frame<S: Store + ?Sized>(store: &mut S, sql: &str) -> GlueResult<Frame> {
    let mut frame: Option<Frame> = None;
    store.query_rows(sql, &mut |row| {
        let frame = frame.get_or_insert_with(|| Frame::with_columns(row.keys().to_vec()));
        frame.push_row(row.into_values())
    })?;

    let frame = frame.unwrap_or_default();
    debug!(columns = frame.width(), rows = frame.height(), "materialized query");
    Ok(frame)
}

/// Run `sql` and return a single value
///
/// Meant for queries producing one row with one column, such as counts or
/// id lookups. When more cells come back, the last cell of the last row is
/// returned and the rest are discarded.
///
/// # Returns
/// * `Ok(Value)` - The last cell seen
/// * `Err(GlueError::EmptyResult)` - The query returned no rows
pub fn query_scalar<S: Store + ?Sized>(store: &mut S, sql: &str) -> GlueResult<Value> {
    let mut result: Option<Value> = None;
    store.query_rows(sql, &mut |row| {
        if let Some(last) = row.into_values().pop() {
            result = Some(last);
        }
        Ok(())
    })?;
    result.ok_or_else(|| GlueError::EmptyResult(sql.to_string()))
}

/// Column names of an existing table
///
/// The names are read from a one-row probe of the table, so an empty table
/// yields an empty list.
pub fn field_names<S: Store + ?Sized>(store: &mut S, table: &str) -> GlueResult<Vec<String>> {
    let sql = format!("SELECT * FROM {} WHERE 1 LIMIT 1;", table);
    let mut columns = Vec::new();
    store.query_rows(&sql, &mut |row| {
        columns.extend(row.keys().iter().cloned());
        Ok(())
    })?;
    Ok(columns)
}
