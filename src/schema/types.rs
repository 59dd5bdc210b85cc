//! Schema types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive JSON kinds a field can be inferred as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Boolean,
    Integer,
    Float,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::String => write!(f, "string"),
            PrimitiveKind::Boolean => write!(f, "boolean"),
            PrimitiveKind::Integer => write!(f, "integer"),
            PrimitiveKind::Float => write!(f, "float"),
        }
    }
}

/// Inferred type of a single field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A scalar value
    Primitive(PrimitiveKind),
    /// A list, typed by its first element (`Unknown` when the sample list is empty)
    ListOf(Box<TypeDescriptor>),
    /// A nested object registered in the [`ModelRegistry`] under this name
    ModelRef(String),
    /// Null or anything else without a recognisable shape
    Unknown,
}

impl TypeDescriptor {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Boolean)
    }

    pub fn integer() -> Self {
        Self::Primitive(PrimitiveKind::Integer)
    }

    pub fn float() -> Self {
        Self::Primitive(PrimitiveKind::Float)
    }

    /// Wrap an element descriptor in a list
    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::ListOf(Box::new(element))
    }

    /// Reference a nested model by name
    pub fn model_ref(name: impl Into<String>) -> Self {
        Self::ModelRef(name.into())
    }

    /// Name of the model this descriptor points at, looking through lists
    pub fn referenced_model(&self) -> Option<&str> {
        match self {
            Self::ModelRef(name) => Some(name),
            Self::ListOf(element) => element.referenced_model(),
            Self::Primitive(_) | Self::Unknown => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::ListOf(element) => write!(f, "list<{element}>"),
            Self::ModelRef(name) => write!(f, "{name}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Field name (snake_case) to inferred type, in document order
pub type FieldMap = IndexMap<String, TypeDescriptor>;

/// Nested model name to its own field map
pub type ModelRegistry = IndexMap<String, FieldMap>;

/// How nested objects are named in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelNaming {
    /// Every nested object is `SubModel`; later registrations overwrite earlier ones
    Legacy,
    /// PascalCased field name, numbered on collision (`Address`, `Address2`)
    #[default]
    FieldPath,
}

/// Kind of non-fatal finding reported during inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// List elements do not all share the first element's shape
    HeterogeneousList,
    /// A null value was typed as unknown
    NullValue,
    /// A registry entry was replaced by a later object with the same name
    ModelOverwritten,
}

/// Non-fatal finding, located by its field path (`orders[].lines`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Result of inferring a sample document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedSchema {
    /// Top-level fields
    pub fields: FieldMap,

    /// Every nested model, dependencies listed before the models using them
    pub models: ModelRegistry,

    /// Non-fatal findings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    /// Deepest nested object level reached (0 = no nested objects)
    pub max_depth: usize,
}

impl ExtractedSchema {
    /// Split into the plain field map and registry pair
    pub fn into_parts(self) -> (FieldMap, ModelRegistry) {
        (self.fields, self.models)
    }

    /// Diagnostics of one kind
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Whether any list in the sample mixes element shapes
    pub fn has_heterogeneous_lists(&self) -> bool {
        self.diagnostics_of(DiagnosticKind::HeterogeneousList)
            .next()
            .is_some()
    }

    /// Model names referenced by fields but missing from the registry
    pub fn dangling_refs(&self) -> Vec<&str> {
        self.fields
            .values()
            .chain(self.models.values().flat_map(IndexMap::values))
            .filter_map(TypeDescriptor::referenced_model)
            .filter(|name| !self.models.contains_key(*name))
            .collect()
    }
}
