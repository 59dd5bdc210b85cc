//! Schema inference from JSON values

use super::naming::{camel_to_snake, model_base_name};
use super::types::{
    Diagnostic, DiagnosticKind, ExtractedSchema, FieldMap, ModelNaming, ModelRegistry,
    TypeDescriptor,
};
use crate::types::{JsonObject, JsonValue};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Name given to every nested object under [`ModelNaming::Legacy`]
pub const LEGACY_MODEL_NAME: &str = "SubModel";

/// Names the generated model module imports; field-path naming never hands
/// them to a nested model
pub const RESERVED_MODEL_NAMES: [&str; 3] = ["Any", "List", "BaseModel"];

/// Infer the type of a single value.
///
/// Nested objects, directly or as the first element of a list, are referenced
/// as [`LEGACY_MODEL_NAME`]. Only the first element of a list is consulted.
pub fn infer_type(value: &JsonValue) -> TypeDescriptor {
    describe(value, LEGACY_MODEL_NAME)
}

/// Registry name for a nested object under legacy naming
pub fn derive_model_name(_object: &JsonObject) -> &'static str {
    LEGACY_MODEL_NAME
}

/// Extract top-level fields and every nested model using legacy naming
pub fn extract_fields(object: &JsonObject) -> (FieldMap, ModelRegistry) {
    SchemaInferrer::legacy().infer(object).into_parts()
}

/// Schema inferrer with configuration options
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    /// Naming strategy for nested models
    naming: ModelNaming,
    /// Names nested models must not take (e.g. the root model's class name)
    reserved: Vec<String>,
}

impl SchemaInferrer {
    /// Create a new inferrer using field-path naming
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inferrer that names every nested object `SubModel`
    pub fn legacy() -> Self {
        Self::new().with_naming(ModelNaming::Legacy)
    }

    /// Set the nested model naming strategy
    #[must_use]
    pub fn with_naming(mut self, naming: ModelNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Keep a name out of the registry
    #[must_use]
    pub fn with_reserved_name(mut self, name: impl Into<String>) -> Self {
        self.reserved.push(name.into());
        self
    }

    pub fn naming(&self) -> ModelNaming {
        self.naming
    }

    /// Infer the schema of a root object
    pub fn infer(&self, root: &JsonObject) -> ExtractedSchema {
        let schema = Walk::new(self).run(root);
        debug!(
            fields = schema.fields.len(),
            models = schema.models.len(),
            diagnostics = schema.diagnostics.len(),
            max_depth = schema.max_depth,
            "Inferred schema"
        );
        schema
    }
}

/// Nested object discovered while expanding its parent
struct Pending<'v> {
    object: &'v JsonObject,
    name: String,
    path: String,
    depth: usize,
}

/// Expanded object waiting for its nested objects to be registered
struct Frame<'v> {
    /// `None` for the root
    name: Option<String>,
    path: String,
    fields: FieldMap,
    children: std::vec::IntoIter<Pending<'v>>,
}

/// State of one inference run
struct Walk {
    naming: ModelNaming,
    taken: HashSet<String>,
    /// Next numeric suffix to try per base name
    suffixes: HashMap<String, usize>,
    models: ModelRegistry,
    diagnostics: Vec<Diagnostic>,
    max_depth: usize,
}

impl Walk {
    fn new(inferrer: &SchemaInferrer) -> Self {
        Self {
            naming: inferrer.naming,
            taken: RESERVED_MODEL_NAMES
                .iter()
                .map(ToString::to_string)
                .chain(inferrer.reserved.iter().cloned())
                .collect(),
            suffixes: HashMap::new(),
            models: ModelRegistry::new(),
            diagnostics: Vec::new(),
            max_depth: 0,
        }
    }

    /// Depth-first walk on an explicit stack. A nested model is registered
    /// once all of its own nested models are, so dependencies come first.
    fn run(mut self, root: &JsonObject) -> ExtractedSchema {
        let mut fields = FieldMap::new();
        let mut stack = vec![self.expand(root, None, String::new(), 0)];

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.children.next() {
                let expanded = self.expand(child.object, Some(child.name), child.path, child.depth);
                stack.push(expanded);
                continue;
            }

            if let Some(done) = stack.pop() {
                match done.name {
                    Some(name) => self.register(name, &done.path, done.fields),
                    None => fields = done.fields,
                }
            }
        }

        ExtractedSchema {
            fields,
            models: self.models,
            diagnostics: self.diagnostics,
            max_depth: self.max_depth,
        }
    }

    fn expand<'v>(
        &mut self,
        object: &'v JsonObject,
        name: Option<String>,
        path: String,
        depth: usize,
    ) -> Frame<'v> {
        self.max_depth = self.max_depth.max(depth);

        let mut fields = FieldMap::with_capacity(object.len());
        let mut children = Vec::new();

        for (key, value) in object {
            let field_name = camel_to_snake(key);
            let field_path = join_path(&path, &field_name);
            self.inspect(value, &field_path);

            let descriptor = match model_source(value, self.naming) {
                Some(nested) => {
                    let list_item = value.is_array();
                    let model_name = self.allocate_name(&field_name, list_item);
                    let child_path = if list_item {
                        format!("{field_path}[]")
                    } else {
                        field_path
                    };
                    let descriptor = describe(value, &model_name);
                    children.push(Pending {
                        object: nested,
                        name: model_name,
                        path: child_path,
                        depth: depth + 1,
                    });
                    descriptor
                }
                None => describe(value, LEGACY_MODEL_NAME),
            };

            fields.insert(field_name, descriptor);
        }

        debug!(
            model = name.as_deref().unwrap_or("<root>"),
            fields = fields.len(),
            depth,
            "Extracted object fields"
        );

        Frame {
            name,
            path,
            fields,
            children: children.into_iter(),
        }
    }

    fn allocate_name(&mut self, field_name: &str, list_item: bool) -> String {
        match self.naming {
            ModelNaming::Legacy => LEGACY_MODEL_NAME.to_string(),
            ModelNaming::FieldPath => {
                let base = model_base_name(field_name, list_item);
                let mut candidate = base.clone();
                let suffix = self.suffixes.entry(base.clone()).or_insert(2);
                while self.taken.contains(&candidate) {
                    candidate = format!("{base}{suffix}");
                    *suffix += 1;
                }
                self.taken.insert(candidate.clone());
                candidate
            }
        }
    }

    fn register(&mut self, name: String, path: &str, fields: FieldMap) {
        if self.models.contains_key(&name) {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ModelOverwritten,
                path,
                format!("model '{name}' replaces an earlier nested object with the same name"),
            ));
        }
        self.models.insert(name, fields);
    }

    /// Record diagnostics for a field value; never changes its type
    fn inspect(&mut self, value: &JsonValue, path: &str) {
        if value.is_null() {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::NullValue,
                path,
                "null value typed as unknown",
            ));
            return;
        }

        let mut current = value;
        let mut list_path = path.to_string();
        while let JsonValue::Array(items) = current {
            if let Some(message) = heterogeneity(items) {
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::HeterogeneousList,
                    list_path.clone(),
                    message,
                ));
            }
            match items.first() {
                Some(first) => {
                    current = first;
                    list_path.push_str("[]");
                }
                None => break,
            }
        }
    }
}

/// Type of `value`, naming any nested object `model_name`
fn describe(value: &JsonValue, model_name: &str) -> TypeDescriptor {
    match value {
        JsonValue::String(_) => TypeDescriptor::string(),
        JsonValue::Bool(_) => TypeDescriptor::boolean(),
        JsonValue::Number(n) => {
            if is_integer(n) {
                TypeDescriptor::integer()
            } else {
                TypeDescriptor::float()
            }
        }
        JsonValue::Array(items) => match items.first() {
            None => TypeDescriptor::list_of(TypeDescriptor::Unknown),
            Some(JsonValue::Object(_)) => {
                TypeDescriptor::list_of(TypeDescriptor::model_ref(model_name))
            }
            Some(first) => TypeDescriptor::list_of(describe(first, model_name)),
        },
        JsonValue::Object(_) => TypeDescriptor::model_ref(model_name),
        JsonValue::Null => TypeDescriptor::Unknown,
    }
}

/// Object that gives `value` its model: the value itself or the first element
/// of a list. Field-path naming also follows first elements through nested
/// lists; legacy naming stops at the outer list.
fn model_source(value: &JsonValue, naming: ModelNaming) -> Option<&JsonObject> {
    if let (JsonValue::Array(items), ModelNaming::Legacy) = (value, naming) {
        return items.first()?.as_object();
    }

    let mut current = value;
    loop {
        match current {
            JsonValue::Object(map) => return Some(map),
            JsonValue::Array(items) => current = items.first()?,
            _ => return None,
        }
    }
}

/// Integer literals of any width; the number's text keeps its digits, so a
/// value without a fraction or exponent is an integer even past 64 bits
fn is_integer(n: &serde_json::Number) -> bool {
    n.is_i64() || n.is_u64() || !n.to_string().contains(['.', 'e', 'E'])
}

fn shape(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(n) if is_integer(n) => "integer",
        JsonValue::Number(_) => "float",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "object",
    }
}

/// Describe the first element whose shape differs from the first one
fn heterogeneity(items: &[JsonValue]) -> Option<String> {
    let first = shape(items.first()?);
    items
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, item)| shape(item) != first)
        .map(|(index, item)| {
            format!(
                "first element is {first} but element {index} is {}; only the first element is used",
                shape(item)
            )
        })
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}
