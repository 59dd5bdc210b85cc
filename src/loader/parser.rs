//! Sample parser
//!
//! Parses and validates sample documents. JSON is checked for repeated keys
//! inside any object before it is parsed, and integers keep their exact text
//! however wide they are. YAML is parsed with `serde_yaml` and converted,
//! rejecting keys that are not strings.

use crate::error::{Error, Result};
use crate::loader::types::{Sample, SampleFormat};
use crate::types::{JsonObject, JsonValue};
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::Deserializer;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Nesting depth `serde_json` accepts before giving up
pub const MAX_JSON_DEPTH: usize = 128;

/// Load a sample document from a file
///
/// The format follows the extension: `.yaml`/`.yml` is YAML, anything else
/// is parsed as JSON.
///
/// # Examples
///
/// ```ignore
/// let sample = load_sample("sample.json")?;
/// let schema = SchemaInferrer::new().infer(&sample.root);
/// ```
pub fn load_sample(path: impl AsRef<Path>) -> Result<Sample> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let sample = load_sample_from_str(&content, SampleFormat::from_path(path))?;
    debug!(
        path = %path.display(),
        format = %sample.format,
        keys = sample.len(),
        "Loaded sample"
    );
    Ok(sample)
}

/// Load a sample document from text in the given format
pub fn load_sample_from_str(text: &str, format: SampleFormat) -> Result<Sample> {
    let value = match format {
        SampleFormat::Json => parse_json(text)?,
        SampleFormat::Yaml => parse_yaml(text)?,
    };

    Ok(Sample {
        root: validate_root(value, format)?,
        format,
    })
}

/// Check that a parsed document is a non-empty object
pub fn validate_root(value: JsonValue, format: SampleFormat) -> Result<JsonObject> {
    match value {
        JsonValue::Object(map) if map.is_empty() => {
            Err(Error::structural(format!("{format} object is empty")))
        }
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::structural(format!(
            "{format} root must be an object/dict, found {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// ============================================================================
// JSON
// ============================================================================

fn parse_json(text: &str) -> Result<JsonValue> {
    check_unique_keys(text)?;
    serde_json::from_str(text).map_err(json_error)
}

/// Walk the document once without building it, failing on the first object
/// that repeats a key
fn check_unique_keys(text: &str) -> Result<()> {
    let duplicate = RefCell::new(None);
    let mut deserializer = serde_json::Deserializer::from_str(text);

    let checked = UniqueKeys {
        duplicate: &duplicate,
    }
    .deserialize(&mut deserializer)
    .and_then(|()| deserializer.end());

    checked.map_err(|e| match duplicate.into_inner() {
        Some(key) => Error::duplicate_key(key),
        None => json_error(e),
    })
}

fn json_error(e: serde_json::Error) -> Error {
    if e.to_string().starts_with("recursion limit exceeded") {
        Error::structural(format!(
            "JSON nesting deeper than {MAX_JSON_DEPTH} levels is not supported ({e})"
        ))
    } else {
        Error::syntax("JSON", e.to_string())
    }
}

/// Visits any JSON value and records the first repeated object key in
/// `duplicate`, so it can be reported apart from syntax errors
#[derive(Clone, Copy)]
struct UniqueKeys<'a> {
    duplicate: &'a RefCell<Option<String>>,
}

impl<'de> DeserializeSeed<'de> for UniqueKeys<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for UniqueKeys<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<(), E> {
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<(), E> {
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<(), E> {
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<(), E> {
        Ok(())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> std::result::Result<(), E> {
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<(), E> {
        Ok(())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<(), E> {
        Ok(())
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element_seed(self)?.is_some() {}
        Ok(())
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if seen.contains(&key) {
                let message = format!("duplicate key '{key}'");
                *self.duplicate.borrow_mut() = Some(key);
                return Err(de::Error::custom(message));
            }
            map.next_value_seed(self)?;
            seen.insert(key);
        }
        Ok(())
    }
}

// ============================================================================
// YAML
// ============================================================================

fn parse_yaml(text: &str) -> Result<JsonValue> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| Error::syntax("YAML", e.to_string()))?;
    yaml_to_json(value, "$")
}

fn yaml_to_json(value: serde_yaml::Value, path: &str) -> Result<JsonValue> {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Ok(JsonValue::Null),
        Yaml::Bool(b) => Ok(JsonValue::Bool(b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(JsonValue::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(JsonValue::from(u))
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(JsonValue::Number)
                    .ok_or_else(|| {
                        Error::structural(format!("{path}: {n} cannot be represented in JSON"))
                    })
            }
        }
        Yaml::String(s) => Ok(JsonValue::String(s)),
        Yaml::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| yaml_to_json(item, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),
        Yaml::Mapping(mapping) => {
            let mut object = JsonObject::new();
            for (key, item) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    other => {
                        return Err(Error::KeyType {
                            key: format!("{} at {path}", yaml_key_repr(&other)),
                        })
                    }
                };
                let item = yaml_to_json(item, &format!("{path}.{key}"))?;
                object.insert(key, item);
            }
            Ok(JsonValue::Object(object))
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value, path),
    }
}

fn yaml_key_repr(key: &serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::String(s) => s.clone(),
        Yaml::Sequence(_) => "<sequence>".to_string(),
        Yaml::Mapping(_) => "<mapping>".to_string(),
        Yaml::Tagged(tagged) => format!("{} {}", tagged.tag, yaml_key_repr(&tagged.value)),
    }
}
