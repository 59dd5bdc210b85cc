//! Python source fragments: type hints, literals and class bodies

use crate::schema::{FieldMap, PrimitiveKind, TypeDescriptor};
use crate::types::JsonValue;

const INDENT: &str = "    ";

/// Python type hint for an inferred type
pub fn type_hint(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(kind) => match kind {
            PrimitiveKind::String => "str".to_string(),
            PrimitiveKind::Boolean => "bool".to_string(),
            PrimitiveKind::Integer => "int".to_string(),
            PrimitiveKind::Float => "float".to_string(),
        },
        TypeDescriptor::ListOf(element) => format!("List[{}]", type_hint(element)),
        TypeDescriptor::ModelRef(name) => name.clone(),
        TypeDescriptor::Unknown => "Any".to_string(),
    }
}

/// Indented `name: hint` lines of a class body, or `pass` when there are none
pub fn class_body(fields: &FieldMap) -> String {
    if fields.is_empty() {
        return format!("{INDENT}pass");
    }

    fields
        .iter()
        .map(|(name, ty)| format!("{INDENT}{name}: {}", type_hint(ty)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Python literal equivalent of a JSON value
pub fn literal(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "None".to_string(),
        JsonValue::Bool(true) => "True".to_string(),
        JsonValue::Bool(false) => "False".to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => string_literal(s),
        JsonValue::Array(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", items.join(", "))
        }
        JsonValue::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", string_literal(key), literal(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Double-quoted string; JSON escapes are valid Python escapes
fn string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}
