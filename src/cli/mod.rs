//! CLI module
//!
//! Command-line interface for scaffolding an API from a sample document.
//!
//! # Commands
//!
//! - `generate` - Infer models and write the scaffold files
//! - `inspect` - Print the inferred schema as JSON

mod commands;
mod runner;

pub use commands::{Cli, Commands, NamingStrategy};
pub use runner::Runner;
