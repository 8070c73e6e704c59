//! Top-level test module for sqlframe
//!
//! This file organizes the integration tests into categories.

mod cli;
mod column_mapper;
mod helpers;
