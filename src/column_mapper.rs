//! Column mapping for sqlframe
//!
//! Derives one column from another by running every value through a Rust
//! function, something SQL alone cannot express. The work happens in two
//! phases: the matching `(key, source)` pairs are read into memory first,
//! and only once the read is fully drained are the UPDATE statements issued.
//! No write ever happens while the scan over the table is still open.

use tracing::{debug, warn};

use crate::error::{GlueError, GlueResult};
use crate::row::RowMapping;
use crate::sql_builder::render_update;
use crate::store::Store;
use crate::value::Value;

/// What a column mapping should read and write
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap<'a> {
    /// Table to read from and update
    pub table: &'a str,
    /// Integer primary key used to address each row in its UPDATE
    pub primary_key: &'a str,
    /// Raw SQL condition selecting the rows to map
    pub filter: &'a str,
    /// Column whose values are fed to the transform
    pub source: &'a str,
    /// Column receiving the transformed values
    pub destination: &'a str,
}

/// Map `source` into `destination` for every row matching `filter`
///
/// The transform may fail; the first failure stops the mapping and is
/// returned as `GlueError::Transform`. Rows updated before the failure keep
/// their new values.
///
/// The key is pasted into each UPDATE's WHERE clause as bare text, so the
/// primary key must be an integer column. Any other key type gives
/// malformed or wrong WHERE clauses. A NULL or BLOB key has no literal form
/// and stops the mapping with `GlueError::UnrecognizedValue`.
///
/// # Returns
/// * `Ok(usize)` - Number of UPDATE statements executed
pub fn map_column_with<S, F, E>(store: &mut S, map: ColumnMap<'_>, mut transform: F) -> GlueResult<usize>
where
    S: Store + ?Sized,
    F: FnMut(Value) -> Result<Value, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let select = format!(
        "SELECT {}, {} FROM {} WHERE {};",
        map.primary_key, map.source, map.table, map.filter
    );

    let mut pending: Vec<(Value, Value)> = Vec::new();
    store.query_rows(&select, &mut |row| {
        let mut values = row.into_values().into_iter();
        let key = values.next().unwrap_or(Value::Null);
        let source = values.next().unwrap_or(Value::Null);
        pending.push((key, source));
        Ok(())
    })?;
    debug!(table = map.table, rows = pending.len(), "buffered rows for mapping");

    let mut updated = 0;
    for (key, source) in pending {
        if matches!(key, Value::Null | Value::Blob(_)) {
            warn!(column = map.primary_key, kind = key.kind(), "unusable row key");
            return Err(GlueError::UnrecognizedValue {
                column: map.primary_key.to_string(),
                kind: key.kind(),
            });
        }
        let new_value = transform(source).map_err(|err| GlueError::Transform {
            key: key.to_string(),
            source: err.into(),
        })?;

        let mut payload = RowMapping::new();
        payload.insert(map.destination, new_value);
        let filter = format!("{} = {}", map.primary_key, key);
        let sql = render_update(map.table, &payload, &filter).into_sql()?;
        store.execute_sql(&sql)?;
        updated += 1;
    }

    debug!(table = map.table, updated, "column mapping complete");
    Ok(updated)
}

/// Map a column through a transform that cannot fail
pub fn map_column<S, F>(store: &mut S, map: ColumnMap<'_>, mut transform: F) -> GlueResult<usize>
where
    S: Store + ?Sized,
    F: FnMut(Value) -> Value,
{
    map_column_with(store, map, |value| {
        Ok::<Value, std::convert::Infallible>(transform(value))
    })
}
