//! Output module
//!
//! Writes rendered scaffold files below an output directory.
//!
//! # Layout
//!
//! ```text
//! <output>/
//! ├── api_router.py
//! ├── routes/<route_module>.py
//! ├── schemas/<model_module>.py
//! └── tests/test_<route_module>.py
//! ```

mod writer;

pub use writer::{write_scaffold, GeneratedFile, ScaffoldWriter, SCAFFOLD_DIRS};
