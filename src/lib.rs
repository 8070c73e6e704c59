//! sqlframe library crate
//!
//! Glue for one-off data pipelines that shuttle tables between CSV files,
//! a relational store and in-memory frames. The library provides:
//!
//! - Literal INSERT/UPDATE rendering from ordered row mappings
//! - Identifier sanitizing for awkward labels
//! - Row-by-row CSV loading into an existing table, with header renames
//! - Column mapping through arbitrary Rust functions
//! - Query materialization into column-major frames
//! - Scalar queries and table column introspection
//!
//! Every operation takes the store handle explicitly; the caller owns the
//! connection and decides when to commit.

pub mod cli;
pub mod column_mapper;
pub mod config;
pub mod csv_loader;
pub mod demo;
pub mod error;
pub mod frame;
pub mod naming;
pub mod query;
pub mod row;
pub mod sql_builder;
pub mod store;
pub mod transform;
pub mod value;

pub use error::{GlueError, GlueResult};
pub use frame::Frame;
pub use row::RowMapping;
pub use store::{Row, Store};
pub use value::Value;
