//! CLI argument parsing module for sqlframe
//!
//! This module defines the command-line interface of the `sqlframe`
//! binary using clap. Each subcommand drives one library operation against
//! a SQLite database, so a pipeline can be scripted as a series of
//! invocations:
//!
//! ```text
//! sqlframe -d movies.db exec "CREATE TABLE movies (id INTEGER PRIMARY KEY, title TEXT)"
//! sqlframe -d movies.db load movies data/movies.csv --rename "original_title=title"
//! sqlframe -d movies.db query "SELECT title FROM movies"
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::config::MEMORY_DB;
use crate::transform::Transform;

/// Command-line arguments for sqlframe
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Move tables between CSV files, SQLite and printed frames"
)]
pub struct SqlframeArgs {
    /// SQLite database file to operate on
    ///
    /// Defaults to a private in-memory database, which only makes sense for
    /// the `demo` subcommand.
    #[clap(short, long, default_value = MEMORY_DB, help = "SQLite database file")]
    pub database: PathBuf,

    /// Enable verbose diagnostic output
    ///
    /// Sets the log level to debug unless RUST_LOG says otherwise. Every
    /// statement sent to the store is logged on stderr.
    #[clap(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute one or more `;`-separated statements that return no rows
    Exec {
        /// SQL text, executed verbatim
        sql: String,
    },

    /// Load a CSV file into an existing table
    Load {
        /// Destination table
        table: String,
        /// Comma-delimited file with a header row
        file: PathBuf,
        /// Rename a header label, as original=replacement
        #[clap(long = "rename", value_name = "FROM=TO")]
        renames: Vec<String>,
        /// CSV file of renames with a from,to header
        #[clap(long = "renames", value_name = "FILE")]
        rename_file: Option<PathBuf>,
    },

    /// Fill one column from another through a built-in transform
    Map {
        /// Table to update
        table: String,
        /// Integer primary key column
        #[clap(long)]
        key: String,
        /// Source column
        #[clap(long)]
        from: String,
        /// Destination column
        #[clap(long)]
        to: String,
        /// Raw SQL condition selecting the rows to map
        #[clap(long = "where", default_value = "1")]
        filter: String,
        /// Transform applied to each source value
        #[clap(long, value_enum)]
        transform: Transform,
    },

    /// Run a query and print the result as CSV
    Query {
        sql: String,
    },

    /// Run a query and print its single value
    Scalar {
        sql: String,
    },

    /// Print the column names of a table, one per line
    Columns {
        table: String,
    },

    /// Build the example movie database from a CSV file and print it
    Demo {
        /// Movie CSV in TMDB export layout
        file: PathBuf,
    },
}

/// Parse command-line arguments into the SqlframeArgs structure
pub fn parse_args() -> Result<SqlframeArgs> {
    Ok(SqlframeArgs::parse())
}

/// Split a `FROM=TO` rename argument
pub fn parse_rename(spec: &str) -> Result<(String, String)> {
    match spec.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(anyhow!("Invalid rename '{}', expected FROM=TO", spec)),
    }
}
