//! Error handling for sqlframe
//!
//! This module defines the error type shared by every sqlframe operation.
//! Store errors, file errors and the handful of data-shape problems the
//! glue layer can detect all funnel into one enum so callers can match on
//! the failure kind instead of scanning log output.
//!
//! The module uses thiserror to minimize boilerplate code.

use thiserror::Error;

/// GlueError represents all possible errors that can occur in sqlframe
///
/// The variants fall into four groups:
/// - value rendering (`UnrecognizedValue`)
/// - empty results (`EmptyResult`)
/// - CSV shape problems (`ShapeMismatch`)
/// - errors bubbling up from the store, the filesystem, the CSV parser or a
///   caller-supplied transform
#[derive(Error, Debug)]
pub enum GlueError {
    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while parsing delimited file data
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error reported by the relational store, passed through unmodified
    #[error("Store error: {0}")]
    StoreError(#[from] rusqlite::Error),

    /// A field value of a kind the statement builder cannot render
    #[error("Unrecognized value type for column '{column}': {kind}")]
    UnrecognizedValue { column: String, kind: &'static str },

    /// A query expected to produce a value produced no rows
    #[error("Query returned no rows: {0}")]
    EmptyResult(String),

    /// A CSV record whose cell count differs from the header
    #[error("Record {record} has {found} fields, header has {expected}")]
    ShapeMismatch {
        record: u64,
        expected: usize,
        found: usize,
    },

    /// A column transform failed for the row with the given key
    #[error("Transform failed for key {key}: {source}")]
    Transform {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error for type mismatches or conversion failures
    #[error("Type error: {0}")]
    TypeError(String),
}

/// Result type alias for operations that can produce a GlueError
pub type GlueResult<T> = std::result::Result<T, GlueError>;
