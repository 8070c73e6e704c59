//! Configuration module for sqlframe
//!
//! This module provides a centralized configuration structure for the binary.
//! Settings are gathered once from the command line and passed down to the
//! code that needs them rather than living in global state.

use std::path::{Path, PathBuf};

/// Path that opens a private in-memory store
pub const MEMORY_DB: &str = ":memory:";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output
    verbose: bool,

    /// SQLite database file, or `:memory:`
    database: PathBuf,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show verbose output
    /// * `database` - SQLite database path
    pub fn new(verbose: bool, database: PathBuf) -> Self {
        Self { verbose, database }
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get the database path
    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Whether the store lives only for this process
    pub fn is_in_memory(&self) -> bool {
        self.database.as_os_str() == MEMORY_DB
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
