// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # JSON Scaffold
//!
//! Infers typed data models from a sample JSON document and generates a
//! FastAPI project skeleton around them: Pydantic models, route handlers,
//! router registration and test stubs.
//!
//! ## Features
//!
//! - **Type Inference**: Primitive, list, nested model and unknown types
//! - **Nested Models**: Every nested object becomes a named model, with
//!   dependencies ordered before the models that use them
//! - **Strict Loading**: Duplicate keys, non-string keys and non-object roots
//!   are rejected
//! - **Templates**: Built-in scaffold templates, overridable from a directory
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use json_scaffold::{load_sample, Generator, GeneratorConfig, SchemaInferrer, Result};
//!
//! fn main() -> Result<()> {
//!     let sample = load_sample("order.json")?;
//!     let config = GeneratorConfig::default();
//!
//!     let schema = SchemaInferrer::new()
//!         .with_reserved_name(config.model_name.as_str())
//!         .infer(&sample.root);
//!
//!     let files = Generator::new(config).generate(&sample.root, &schema)?;
//!     json_scaffold::write_scaffold("generated", &files)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌─────────────┐   ┌──────────┐
//! │  Loader  │ → │    Schema    │ → │  Generator  │ → │  Output  │
//! │ JSON/YAML│   │  inference   │   │  templates  │   │  writer  │
//! └──────────┘   └──────────────┘   └─────────────┘   └──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Type inference from JSON values
pub mod schema;

/// Sample document loading
pub mod loader;

/// Template interpolation
pub mod template;

/// Scaffold rendering
pub mod generator;

/// Scaffold file output
pub mod output;

/// Generator configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use generator::Generator;
pub use loader::{load_sample, load_sample_from_str, Sample, SampleFormat};
pub use output::{write_scaffold, GeneratedFile};
pub use schema::{
    camel_to_snake, derive_model_name, extract_fields, infer_type, ExtractedSchema, FieldMap,
    ModelNaming, ModelRegistry, SchemaInferrer, TypeDescriptor,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
