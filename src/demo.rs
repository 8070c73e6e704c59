//! Example pipeline for sqlframe
//!
//! Shows the intended composition of the glue operations on a movie
//! dataset (TMDB export layout): create the table, load the CSV with the
//! `cast` column renamed, add a derived column, fill it with a mapping,
//! and hand the store back to the caller for querying.

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::column_mapper::{map_column_with, ColumnMap};
use crate::csv_loader::{load_csv, Renames};
use crate::error::GlueResult;
use crate::store::Store;
use crate::transform::Transform;

/// Table the example data is loaded into
pub const EXAMPLE_TABLE: &str = "example";

const CREATE_EXAMPLE: &str = "CREATE TABLE example (
    id INTEGER PRIMARY KEY,
    imdb_id TEXT,
    popularity REAL,
    budget INTEGER,
    revenue INTEGER,
    original_title TEXT,
    performers TEXT,
    homepage TEXT,
    director TEXT,
    tagline TEXT,
    keywords TEXT,
    overview TEXT,
    runtime INTEGER,
    genres TEXT,
    production_companies TEXT,
    release_date TEXT,
    vote_count INTEGER,
    vote_average REAL,
    release_year INTEGER,
    budget_adj REAL,
    revenue_adj REAL
);";

/// Build an in-memory store holding the example movie table
///
/// `cast` is a reserved word in SQL, so that header is loaded into the
/// `performers` column. After loading, `revenue_adj_log` is added and set to
/// `ln(1 + revenue_adj)` for every row.
pub fn set_up_example_db<P: AsRef<Path>>(csv_file: P) -> GlueResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    {
        let mut tx = conn.transaction()?;
        tx.execute_sql(CREATE_EXAMPLE)?;

        let renames: Renames = [("cast".to_string(), "performers".to_string())]
            .into_iter()
            .collect();
        let report = load_csv(&mut tx, csv_file, EXAMPLE_TABLE, &renames)?;

        tx.execute_sql("ALTER TABLE example ADD COLUMN revenue_adj_log REAL;")?;
        let map = ColumnMap {
            table: EXAMPLE_TABLE,
            primary_key: "id",
            filter: "1",
            source: "revenue_adj",
            destination: "revenue_adj_log",
        };
        let updated = map_column_with(&mut tx, map, |value| Transform::Log1p.apply(value))?;

        tx.commit()?;
        info!(loaded = report.rows_inserted, updated, "example database ready");
    }
    Ok(conn)
}
