//! Schema inference module
//!
//! Infers field types from a sample JSON object.
//!
//! # Features
//!
//! - **Type Inference**: Maps every JSON value to a [`TypeDescriptor`]
//! - **Field Naming**: Converts camelCase/PascalCase keys to snake_case
//! - **Nested Models**: Collects nested objects into a flat model registry
//! - **Deep Input**: Iterative traversal, no native recursion per level
//! - **Diagnostics**: Reports heterogeneous lists, nulls and name collisions

mod inference;
mod naming;
mod types;

pub use inference::{
    derive_model_name, extract_fields, infer_type, SchemaInferrer, LEGACY_MODEL_NAME,
    RESERVED_MODEL_NAMES,
};
pub use naming::{camel_to_snake, to_pascal_case};
pub use types::{
    Diagnostic, DiagnosticKind, ExtractedSchema, FieldMap, ModelNaming, ModelRegistry,
    PrimitiveKind, TypeDescriptor,
};

#[cfg(test)]
mod tests;
