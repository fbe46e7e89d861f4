//! Skillmap CLI library.
//!
//! This library provides the pieces behind the `skillmap` binary: configuration
//! loading, the load / assign / validate / prune / save batch, command
//! execution and report formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{open_store, BatchReport, Pipeline, StageSelection};
