//! CSV loading module for sqlframe
//!
//! This module pulls comma-delimited files into an existing store table.
//! It provides functionality for:
//!
//! - Renaming header labels through a caller-supplied rename table
//! - Reading rename tables from a two-column CSV file
//! - Inserting every data record with its own INSERT statement
//!
//! The destination table must already exist with compatible columns. The
//! loader does not create tables and does not coerce types: every cell is
//! inserted as a string literal, and the store's declared column types
//! decide what is actually stored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{GlueError, GlueResult};
use crate::row::RowMapping;
use crate::sql_builder::render_insert;
use crate::store::Store;

/// Header label → column name replacements applied by the loader
pub type Renames = HashMap<String, String>;

/// Outcome of a CSV load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Effective column names, after renames
    pub columns: Vec<String>,
    /// Number of INSERT statements executed
    pub rows_inserted: usize,
}

/// One line of a rename file
#[derive(Debug, Deserialize)]
struct RenameRule {
    from: String,
    to: String,
}

/// Load a CSV file into an existing table
///
/// # Arguments
/// * `store` - Store holding the destination table
/// * `path` - Comma-delimited file with a header row
/// * `table` - Destination table name, used verbatim
/// * `renames` - Header replacements; labels not listed are kept as they are
///
/// # Returns
/// * `Ok(LoadReport)` if every record was inserted
/// * `Err` on I/O or CSV parse errors, a record whose field count differs
///   from the header (`ShapeMismatch`), or a store error. Records inserted
///   before the failure stay in the table.
pub fn load_csv<S, P>(store: &mut S, path: P, table: &str, renames: &Renames) -> GlueResult<LoadReport>
where
    S: Store + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), table, "loading csv");
    let file = File::open(path)?;
    load_csv_reader(store, BufReader::new(file), table, renames)
}

/// Load CSV data from any reader into an existing table
///
/// Same behavior as [`load_csv`], for data that does not live in a file.
pub fn load_csv_reader<S, R>(
    store: &mut S,
    reader: R,
    table: &str,
    renames: &Renames,
) -> GlueResult<LoadReport>
where
    S: Store + ?Sized,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|label| renames.get(label).cloned().unwrap_or_else(|| label.to_string()))
        .collect();

    let mut rows_inserted = 0;
    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;

        if record.len() != columns.len() {
            return Err(GlueError::ShapeMismatch {
                // header is record 0
                record: index as u64 + 1,
                expected: columns.len(),
                found: record.len(),
            });
        }

        let row: RowMapping = columns
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.as_str(), cell))
            .collect();

        let sql = render_insert(table, &row).into_sql()?;
        store.execute_sql(&sql)?;
        rows_inserted += 1;
    }

    debug!(table, rows_inserted, "csv load complete");
    Ok(LoadReport {
        columns,
        rows_inserted,
    })
}

/// Read a rename table from a CSV file with a `from,to` header
pub fn load_renames<P: AsRef<Path>>(path: P) -> GlueResult<Renames> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut renames = Renames::new();
    for result in reader.deserialize() {
        let rule: RenameRule = result?;
        renames.insert(rule.from, rule.to);
    }
    Ok(renames)
}
