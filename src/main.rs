//! sqlframe - move tables between CSV files, SQLite and printed frames
//!
//! Each invocation opens one SQLite database, runs one subcommand against
//! it and exits. Statements run in SQLite's autocommit mode, so every
//! completed step is persisted before the next invocation.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Install the log subscriber
//! 3. Open the database
//! 4. Run the subcommand, printing any result to stdout

use std::io::{self, Write};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sqlframe::cli::{self, Command};
use sqlframe::column_mapper::{map_column_with, ColumnMap};
use sqlframe::config::AppConfig;
use sqlframe::csv_loader::{load_csv, load_renames, Renames};
use sqlframe::demo::{set_up_example_db, EXAMPLE_TABLE};
use sqlframe::query::{field_names, query_scalar, query_to_frame};

fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn collect_renames(renames: &[String], rename_file: Option<&std::path::Path>) -> Result<Renames> {
    let mut table = match rename_file {
        Some(path) => load_renames(path)
            .with_context(|| format!("Failed to read renames from {}", path.display()))?,
        None => Renames::new(),
    };
    for spec in renames {
        let (from, to) = cli::parse_rename(spec)?;
        table.insert(from, to);
    }
    Ok(table)
}

fn run(conn: &mut Connection, command: Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Exec { sql } => {
            debug!(sql = %sql, "execute batch");
            conn.execute_batch(&sql)
                .with_context(|| format!("Failed to execute SQL: {sql}"))?;
        }
        Command::Load {
            table,
            file,
            renames,
            rename_file,
        } => {
            let renames = collect_renames(&renames, rename_file.as_deref())?;
            let report = load_csv(conn, &file, &table, &renames)
                .with_context(|| format!("Failed to load {} into {}", file.display(), table))?;
            writeln!(out, "Loaded {} rows into {}", report.rows_inserted, table)?;
        }
        Command::Map {
            table,
            key,
            from,
            to,
            filter,
            transform,
        } => {
            let map = ColumnMap {
                table: &table,
                primary_key: &key,
                filter: &filter,
                source: &from,
                destination: &to,
            };
            let updated = map_column_with(conn, map, |value| transform.apply(value))
                .with_context(|| format!("Failed to map {from} to {to} in {table}"))?;
            writeln!(out, "Updated {updated} rows")?;
        }
        Command::Query { sql } => {
            let frame = query_to_frame(conn, &sql)
                .with_context(|| format!("Failed to execute SQL: {sql}"))?;
            frame.write_csv(&mut out)?;
        }
        Command::Scalar { sql } => {
            let value = query_scalar(conn, &sql)
                .with_context(|| format!("Failed to execute SQL: {sql}"))?;
            writeln!(out, "{value}")?;
        }
        Command::Columns { table } => {
            for column in field_names(conn, &table)
                .with_context(|| format!("Failed to read columns of {table}"))?
            {
                writeln!(out, "{column}")?;
            }
        }
        Command::Demo { file } => {
            let mut example = set_up_example_db(&file)
                .with_context(|| format!("Failed to build example database from {}", file.display()))?;
            let sql = format!(
                "SELECT id, original_title, revenue_adj, revenue_adj_log FROM {EXAMPLE_TABLE} ORDER BY id;"
            );
            query_to_frame(&mut example, &sql)?.write_csv(&mut out)?;
        }
    }
    Ok(())
}

/// Main entry point for the sqlframe utility
fn main() -> Result<()> {
    let args = cli::parse_args()?;
    let config = AppConfig::new(args.verbose, args.database.clone());
    init_tracing(&config);
    debug!(?args, "arguments");

    let mut conn = Connection::open(config.database())
        .with_context(|| format!("Failed to open database {}", config.database().display()))?;
    if config.is_in_memory() {
        debug!("using a private in-memory database");
    }

    run(&mut conn, args.command)
}
