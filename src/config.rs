//! Generator configuration
//!
//! `GeneratorConfig` holds every knob of a scaffold run. It can be loaded
//! from a YAML file and is then overridden by command-line flags.
//!
//! ```yaml
//! model_name: OrderModel
//! route_path: /orders
//! methods: [GET, POST]
//! naming: field_path
//! strict_lists: true
//! output_dir: api
//! ```

use crate::error::{Error, Result};
use crate::schema::{camel_to_snake, ModelNaming, RESERVED_MODEL_NAMES};
use crate::types::Method;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one scaffold run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Class name of the root model
    pub model_name: String,

    /// Route path every generated handler is mounted on
    pub route_path: String,

    /// HTTP methods to generate handlers and tests for
    #[serde(deserialize_with = "deserialize_methods")]
    pub methods: Vec<Method>,

    /// Nested model naming strategy
    pub naming: ModelNaming,

    /// Fail on lists whose elements have different shapes
    pub strict_lists: bool,

    /// Directory with template overrides
    pub templates_dir: Option<PathBuf>,

    /// Directory the scaffold is written to
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            route_path: "/example".to_string(),
            methods: Method::ALL.to_vec(),
            naming: ModelNaming::default(),
            strict_lists: false,
            templates_dir: None,
            output_dir: PathBuf::from("generated"),
        }
    }
}

fn default_model_name() -> String {
    "InputModel".to_string()
}

/// Method names are case-insensitive and repeats collapse, as on the command line
fn deserialize_methods<'de, D>(deserializer: D) -> std::result::Result<Vec<Method>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    let methods = names
        .iter()
        .map(|name| name.parse::<Method>())
        .collect::<Result<Vec<_>>>()
        .map_err(de::Error::custom)?;
    Ok(Method::collapse(methods))
}

impl GeneratorConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file (YAML)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if !is_class_name(&self.model_name) {
            return Err(Error::invalid_value(
                "model_name",
                format!(
                    "'{}' must be an identifier starting with an uppercase letter",
                    self.model_name
                ),
            ));
        }

        if RESERVED_MODEL_NAMES.contains(&self.model_name.as_str()) {
            return Err(Error::invalid_value(
                "model_name",
                format!(
                    "'{}' is imported by the generated model module",
                    self.model_name
                ),
            ));
        }

        if !self.route_path.starts_with('/') {
            return Err(Error::invalid_value(
                "route_path",
                format!("'{}' must start with '/'", self.route_path),
            ));
        }
        if self.route_path.contains('"') || self.route_path.contains(char::is_whitespace) {
            return Err(Error::invalid_value(
                "route_path",
                format!("'{}' must not contain quotes or whitespace", self.route_path),
            ));
        }

        if self.methods.is_empty() {
            return Err(Error::invalid_value(
                "methods",
                "at least one HTTP method is required",
            ));
        }
        if Method::collapse(self.methods.iter().copied()).len() != self.methods.len() {
            return Err(Error::invalid_value("methods", "each HTTP method may appear once"));
        }

        Ok(())
    }

    /// Model name without a trailing `Model` (`InputModel` -> `Input`)
    pub fn resource_name(&self) -> &str {
        match self.model_name.strip_suffix("Model") {
            Some(stem) if !stem.is_empty() => stem,
            _ => &self.model_name,
        }
    }

    /// Python module holding the models (`input_model`)
    pub fn model_module(&self) -> String {
        camel_to_snake(&self.model_name)
    }

    /// Python module holding the route handlers (`input_route`)
    pub fn route_module(&self) -> String {
        format!("{}_route", camel_to_snake(self.resource_name()))
    }

    /// Tag grouping the routes in the API docs (`Input`)
    pub fn tag(&self) -> &str {
        self.resource_name()
    }
}

fn is_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
