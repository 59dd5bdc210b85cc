//! Template interpolation for generated files
//!
//! Handles `{{ variable }}` interpolation in scaffold templates.
//! Supports nested access like `{{ model.name }}`.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `{{ name }}` or `{{ name.field }}` placeholder
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// Context for template interpolation
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: JsonObject,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Builder form of [`TemplateContext::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Names of the top-level variables
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Get a value by path (e.g., "model.name")
    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        let mut parts = path.split('.');
        let root = self.vars.get(parts.next()?)?;
        get_nested_value(root, parts)
    }
}

/// Get a nested value from a JSON value by path
fn get_nested_value<'a, 'p>(
    value: &'a JsonValue,
    path: impl IntoIterator<Item = &'p str>,
) -> Option<&'a JsonValue> {
    let mut current = value;
    for part in path {
        match current {
            JsonValue::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Render a template string with the given context
///
/// Fails with every undefined variable listed. Substituted text is not
/// scanned again, so values may themselves contain `{{ ... }}`.
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    let missing: Vec<String> = extract_variables(template)
        .into_iter()
        .filter(|var| ctx.get(var).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(Error::undefined_var(missing.join(", ")));
    }

    Ok(render_optional(template, ctx))
}

/// Render a template, leaving undefined variables as-is
pub fn render_optional(template: &str, ctx: &TemplateContext) -> String {
    TEMPLATE_REGEX
        .replace_all(template, |cap: &Captures<'_>| match ctx.get(&cap[1]) {
            Some(value) => value_to_string(value),
            None => cap[0].to_string(),
        })
        .into_owned()
}

/// Whether text contains any placeholder
pub fn has_templates(s: &str) -> bool {
    TEMPLATE_REGEX.is_match(s)
}

/// Placeholder names in order of appearance, repeats included
pub fn extract_variables(template: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Text substituted for a value; strings are inserted without quotes
fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_substitution() {
        let ctx = TemplateContext::new().with("model_name", "InputModel");

        let result = render("class {{ model_name }}(BaseModel):", &ctx).unwrap();
        assert_eq!(result, "class InputModel(BaseModel):");
    }

    #[test]
    fn test_multiple_substitutions() {
        let ctx = TemplateContext::new()
            .with("method", "post")
            .with("path", "/example");

        let result = render("@router.{{ method }}(\"{{ path }}\")", &ctx).unwrap();
        assert_eq!(result, "@router.post(\"/example\")");
    }

    #[test]
    fn test_nested_value() {
        let ctx = TemplateContext::new().with("model", json!({"name": "Order", "module": "order"}));

        let result = render("from schemas.{{ model.module }} import {{ model.name }}", &ctx).unwrap();
        assert_eq!(result, "from schemas.order import Order");
    }

    #[test]
    fn test_undefined_variable() {
        let ctx = TemplateContext::new().with("a", "x");
        let result = render("{{ a }} {{ missing }} {{ a.deeper }}", &ctx);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing"));
        assert!(err.contains("a.deeper"));
    }

    #[test]
    fn test_plain_text_passthrough() {
        let ctx = TemplateContext::new();
        let result = render("router = APIRouter()", &ctx).unwrap();
        assert_eq!(result, "router = APIRouter()");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let ctx = TemplateContext::new()
            .with("body", "{{ secret }}")
            .with("secret", "leaked");

        assert_eq!(render("x = {{ body }}", &ctx).unwrap(), "x = {{ secret }}");
    }

    #[test]
    fn test_has_templates() {
        assert!(has_templates("{{ model_name }}"));
        assert!(has_templates("prefix {{ var }} suffix"));
        assert!(!has_templates("no templates here"));
        assert!(!has_templates("{ not a template }"));
        assert!(!has_templates("json = {\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_variables() {
        let vars = extract_variables("{{ model_name }} and {{ route.path }}");
        assert_eq!(vars, vec!["model_name", "route.path"]);
    }

    #[test]
    fn test_number_substitution() {
        let ctx = TemplateContext::new().with("count", 3).with("enabled", true);

        let result = render("count={{ count }} enabled={{ enabled }}", &ctx).unwrap();
        assert_eq!(result, "count=3 enabled=true");
    }

    #[test]
    fn test_placeholder_spacing() {
        let ctx = TemplateContext::new().with("key", "value");

        assert_eq!(render("{{key}}", &ctx).unwrap(), "value");
        assert_eq!(render("{{ key }}", &ctx).unwrap(), "value");
        assert_eq!(render("{{  key  }}", &ctx).unwrap(), "value");
    }

    #[test]
    fn test_render_optional() {
        let ctx = TemplateContext::new().with("key", "value");

        assert_eq!(render_optional("test {{ key }}", &ctx), "test value");
        assert_eq!(
            render_optional("test {{ missing }}", &ctx),
            "test {{ missing }}"
        );
    }

    #[test]
    fn test_context_names() {
        let mut ctx = TemplateContext::new();
        ctx.insert("b", 1).insert("a", 2);
        let names: Vec<&str> = ctx.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
