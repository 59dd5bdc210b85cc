//! Sample loader module
//!
//! Reads the sample document the schema is inferred from.
//!
//! # Overview
//!
//! The loader module provides:
//! - `Sample` - A validated, non-empty root object
//! - JSON parsing that rejects duplicate keys at any depth
//! - YAML parsing (by file extension) with string-key checks

mod parser;
mod types;

pub use parser::{load_sample, load_sample_from_str, validate_root, MAX_JSON_DEPTH};
pub use types::{Sample, SampleFormat};
