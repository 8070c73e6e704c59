//! SQL statement construction for sqlframe
//!
//! Statements are rendered as literal SQL text by string concatenation:
//! no parameter binding is involved, and table names and filter clauses are
//! pasted in verbatim. Callers that pass untrusted text here are open to SQL
//! injection. Only string values are escaped, by doubling single quotes.
//!
//! The rendered text shape is exact:
//!
//! ```text
//! INSERT INTO <table>(<c1>, <c2>) VALUES (<v1>, <v2>);
//! UPDATE <table> SET <c1> = <v1>, <c2> = <v2> WHERE <filter>;
//! ```
//!
//! Floats are written in their shortest round-trip decimal form. SQLite's
//! literal parser is not correctly rounded, so values at extreme magnitudes
//! (e.g. `-3.444418313650998e-109`) can read back one ULP off.

use tracing::warn;

use crate::error::{GlueError, GlueResult};
use crate::row::RowMapping;
use crate::value::Value;

/// Escape a string for embedding inside a single-quoted SQL literal
///
/// # Example
/// ```
/// # use sqlframe::sql_builder::escape;
/// assert_eq!(escape("O'Brien"), "O''Brien");
/// ```
pub fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

/// Render a value as a SQL literal
///
/// Returns `None` for value kinds that have no literal form here (NULL and
/// BLOB).
pub fn render_literal(value: &Value) -> Option<String> {
    match value {
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(format!("{:?}", f)),
        Value::String(s) => Some(format!("'{}'", escape(s))),
        Value::Null | Value::Blob(_) => None,
    }
}

/// A rendered statement together with the per-entry problems found while
/// rendering it
///
/// An entry whose value could not be rendered still contributes its column
/// name, with an empty value slot, so the SQL text is malformed in the same
/// place the problem occurred.
#[derive(Debug)]
pub struct Statement {
    sql: String,
    errors: Vec<GlueError>,
}

impl Statement {
    /// The rendered SQL text, malformed or not
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Errors reported for individual entries
    pub fn errors(&self) -> &[GlueError] {
        &self.errors
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Take the SQL text, failing with the first entry error if any
    pub fn into_sql(self) -> GlueResult<String> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.sql),
        }
    }
}

fn render_entry(column: &str, value: &Value, errors: &mut Vec<GlueError>) -> String {
    match render_literal(value) {
        Some(literal) => literal,
        None => {
            warn!(column, kind = value.kind(), "unrecognized value type");
            errors.push(GlueError::UnrecognizedValue {
                column: column.to_string(),
                kind: value.kind(),
            });
            String::new()
        }
    }
}

/// Render an INSERT for one row
///
/// An empty mapping yields `INSERT INTO <table>() VALUES ();`, which no
/// store accepts.
///
/// # Example
/// ```
/// # use sqlframe::row::RowMapping;
/// # use sqlframe::sql_builder::render_insert;
/// let mut row = RowMapping::new();
/// row.insert("name", "O'Hara");
/// row.insert("age", 41);
/// assert_eq!(
///     render_insert("people", &row).sql(),
///     "INSERT INTO people(name, age) VALUES ('O''Hara', 41);"
/// );
/// ```
pub fn render_insert(table: &str, row: &RowMapping) -> Statement {
    let mut errors = Vec::new();
    let mut fields = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());

    for (column, value) in row.iter() {
        fields.push(column.to_string());
        values.push(render_entry(column, value, &mut errors));
    }

    let sql = format!(
        "INSERT INTO {}({}) VALUES ({});",
        table,
        fields.join(", "),
        values.join(", ")
    );
    Statement { sql, errors }
}

/// Render an UPDATE of the rows matching `filter`
///
/// The filter is raw SQL placed after `WHERE`.
pub fn render_update(table: &str, row: &RowMapping, filter: &str) -> Statement {
    let mut errors = Vec::new();
    let assignments: Vec<String> = row
        .iter()
        .map(|(column, value)| format!("{} = {}", column, render_entry(column, value, &mut errors)))
        .collect();

    let sql = format!(
        "UPDATE {} SET {} WHERE {};",
        table,
        assignments.join(", "),
        filter
    );
    Statement { sql, errors }
}
