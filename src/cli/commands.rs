//! CLI commands and argument parsing

use crate::schema::ModelNaming;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate a FastAPI scaffold from a sample JSON document
#[derive(Parser, Debug)]
#[command(name = "json-scaffold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer models from a sample and write the scaffold
    Generate {
        /// Sample document (JSON, or YAML by extension)
        #[arg(short, long)]
        json: PathBuf,

        /// HTTP methods (comma-separated, e.g. GET,POST)
        #[arg(short, long)]
        methods: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Class name of the root model
        #[arg(long)]
        model_name: Option<String>,

        /// Route path for the generated handlers
        #[arg(short, long)]
        path: Option<String>,

        /// Nested model naming strategy
        #[arg(long, value_enum)]
        naming: Option<NamingStrategy>,

        /// Fail on lists whose elements have different shapes
        #[arg(long)]
        strict: bool,

        /// Directory with template overrides
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Print the files instead of writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the inferred schema of a sample as JSON
    Inspect {
        /// Sample document (JSON, or YAML by extension)
        #[arg(short, long)]
        json: PathBuf,

        /// Nested model naming strategy
        #[arg(long, value_enum)]
        naming: Option<NamingStrategy>,

        /// Fail on lists whose elements have different shapes
        #[arg(long)]
        strict: bool,
    },
}

/// Nested model naming strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NamingStrategy {
    /// PascalCase field names with numeric suffixes on collision
    FieldPath,
    /// Every nested model is named SubModel
    Legacy,
}

impl From<NamingStrategy> for ModelNaming {
    fn from(strategy: NamingStrategy) -> Self {
        match strategy {
            NamingStrategy::FieldPath => ModelNaming::FieldPath,
            NamingStrategy::Legacy => ModelNaming::Legacy,
        }
    }
}
