//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the viewfinder binary.

mod commands;
mod run;

pub use commands::{Cli, Commands, ProcessArgs};
pub use run::run_session;
