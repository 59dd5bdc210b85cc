//! Built-in scaffold templates and directory overrides
//!
//! Every template is embedded in the binary. A template directory may replace
//! any of them by file name; replacements are checked so they only use
//! variables the generator provides.

use crate::error::{Error, Result, ResultExt};
use crate::template::extract_variables;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One template of the scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Model file wrapper (imports + classes)
    Model,
    /// A single Pydantic class
    ModelClass,
    /// Route file imports and router object
    EndpointHeader,
    /// A single route handler
    EndpointFunc,
    /// Central router registration file
    Router,
    /// Test file imports, client and example data
    TestHeader,
    /// A single test function
    TestFunc,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 7] = [
        TemplateKind::Model,
        TemplateKind::ModelClass,
        TemplateKind::EndpointHeader,
        TemplateKind::EndpointFunc,
        TemplateKind::Router,
        TemplateKind::TestHeader,
        TemplateKind::TestFunc,
    ];

    /// File name looked up in a template override directory
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Model => "model.py.tmpl",
            TemplateKind::ModelClass => "model_class.py.tmpl",
            TemplateKind::EndpointHeader => "endpoint_header.py.tmpl",
            TemplateKind::EndpointFunc => "endpoint_func.py.tmpl",
            TemplateKind::Router => "router.py.tmpl",
            TemplateKind::TestHeader => "test_header.py.tmpl",
            TemplateKind::TestFunc => "test_func.py.tmpl",
        }
    }

    /// Variables the generator supplies when rendering this template
    pub fn variables(self) -> &'static [&'static str] {
        match self {
            TemplateKind::Model => &["classes", "model_name"],
            TemplateKind::ModelClass => &["class_name", "fields"],
            TemplateKind::EndpointHeader => &["model_module", "model_name"],
            TemplateKind::EndpointFunc => &[
                "method",
                "method_upper",
                "path",
                "function_name",
                "params",
                "model_name",
            ],
            TemplateKind::Router => &["route_module", "tag"],
            TemplateKind::TestHeader => &["example_data", "route_module"],
            TemplateKind::TestFunc => &["function_name", "method", "path", "body", "model_name"],
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            TemplateKind::Model => include_str!("../../templates/model.py.tmpl"),
            TemplateKind::ModelClass => include_str!("../../templates/model_class.py.tmpl"),
            TemplateKind::EndpointHeader => {
                include_str!("../../templates/endpoint_header.py.tmpl")
            }
            TemplateKind::EndpointFunc => include_str!("../../templates/endpoint_func.py.tmpl"),
            TemplateKind::Router => include_str!("../../templates/router.py.tmpl"),
            TemplateKind::TestHeader => include_str!("../../templates/test_header.py.tmpl"),
            TemplateKind::TestFunc => include_str!("../../templates/test_func.py.tmpl"),
        }
    }
}

/// The templates used for one run
#[derive(Debug, Clone)]
pub struct TemplateSet {
    overrides: HashMap<TemplateKind, String>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSet {
    /// Only the embedded templates
    pub fn builtin() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Embedded templates, replaced by any matching file in `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::FileNotFound {
                path: dir.display().to_string(),
            });
        }

        let mut set = Self::builtin();
        for kind in TemplateKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                continue;
            }
            let source = fs::read_to_string(&path)
                .context(format!("Failed to read template {}", path.display()))?;
            set.set(kind, source)?;
            debug!(template = kind.file_name(), path = %path.display(), "Using template override");
        }
        Ok(set)
    }

    /// Replace one template after checking its variables
    pub fn set(&mut self, kind: TemplateKind, source: impl Into<String>) -> Result<()> {
        let source = source.into();
        let allowed = kind.variables();

        for var in extract_variables(&source) {
            let root = var.split('.').next().unwrap_or_default();
            if !allowed.contains(&root) {
                return Err(Error::template(format!(
                    "{}: unknown variable '{}' (available: {})",
                    kind.file_name(),
                    var,
                    allowed.join(", ")
                )));
            }
        }

        self.overrides.insert(kind, source);
        Ok(())
    }

    /// Source text of a template
    pub fn get(&self, kind: TemplateKind) -> &str {
        self.overrides
            .get(&kind)
            .map_or_else(|| kind.builtin(), String::as_str)
    }

    /// Whether a template has been replaced
    pub fn is_overridden(&self, kind: TemplateKind) -> bool {
        self.overrides.contains_key(&kind)
    }
}
