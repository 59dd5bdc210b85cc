//! Scaffold generator module
//!
//! Turns an inferred schema into the text of the scaffold files.
//!
//! # Files
//!
//! - `schemas/<model_module>.py` - Pydantic models
//! - `routes/<route_module>.py` - route handlers, one per method
//! - `api_router.py` - router registration
//! - `tests/test_<route_module>.py` - test stubs, one per method

mod python;
mod templates;

pub use python::{class_body, literal, type_hint};
pub use templates::{TemplateKind, TemplateSet};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::output::GeneratedFile;
use crate::schema::ExtractedSchema;
use crate::template::{render, TemplateContext};
use crate::types::{JsonObject, JsonValue, Method};
use tracing::debug;

/// Renders scaffold files for one configuration
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    templates: TemplateSet,
}

impl Generator {
    /// Create a generator with the built-in templates
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            templates: TemplateSet::builtin(),
        }
    }

    /// Create a generator, loading template overrides named by the config
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let templates = match &config.templates_dir {
            Some(dir) => TemplateSet::from_dir(dir)?,
            None => TemplateSet::builtin(),
        };
        Ok(Self { config, templates })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render every scaffold file
    pub fn generate(
        &self,
        sample: &JsonObject,
        schema: &ExtractedSchema,
    ) -> Result<Vec<GeneratedFile>> {
        let route_module = self.config.route_module();

        let files = vec![
            GeneratedFile::new(
                format!("schemas/{}.py", self.config.model_module()),
                self.render_model(schema)?,
            ),
            GeneratedFile::new(
                format!("routes/{route_module}.py"),
                self.render_endpoints()?,
            ),
            GeneratedFile::new("api_router.py", self.render_router()?),
            GeneratedFile::new(
                format!("tests/test_{route_module}.py"),
                self.render_tests(sample)?,
            ),
        ];

        for file in &files {
            debug!(path = %file.path.display(), bytes = file.contents.len(), "Rendered file");
        }
        Ok(files)
    }

    /// Pydantic classes for every nested model, then the root model
    pub fn render_model(&self, schema: &ExtractedSchema) -> Result<String> {
        let model_name = &self.config.model_name;
        if schema.models.contains_key(model_name) {
            return Err(Error::config(format!(
                "model name '{model_name}' clashes with a nested model of the same name"
            )));
        }

        let mut classes = Vec::with_capacity(schema.models.len() + 1);
        for (name, fields) in &schema.models {
            classes.push(self.render_class(name, &class_body(fields))?);
        }
        classes.push(self.render_class(model_name, &class_body(&schema.fields))?);

        let ctx = TemplateContext::new()
            .with("classes", classes.join("\n\n\n"))
            .with("model_name", model_name.as_str());
        self.render_file(TemplateKind::Model, &ctx)
    }

    fn render_class(&self, class_name: &str, fields: &str) -> Result<String> {
        let ctx = TemplateContext::new()
            .with("class_name", class_name)
            .with("fields", fields);
        Ok(render(self.templates.get(TemplateKind::ModelClass), &ctx)?
            .trim_end()
            .to_string())
    }

    /// Route file with one handler per configured method
    pub fn render_endpoints(&self) -> Result<String> {
        let header_ctx = TemplateContext::new()
            .with("model_module", self.config.model_module())
            .with("model_name", self.config.model_name.as_str());

        let mut sections = vec![self.render_section(TemplateKind::EndpointHeader, &header_ctx)?];
        for &method in &self.config.methods {
            let params = if method.takes_body() {
                format!("data: {}", self.config.model_name)
            } else {
                String::new()
            };
            let ctx = self
                .method_context(method)
                .with("method_upper", method.as_str())
                .with("params", params);
            sections.push(self.render_section(TemplateKind::EndpointFunc, &ctx)?);
        }

        Ok(join_sections(&sections))
    }

    /// Router registration file
    pub fn render_router(&self) -> Result<String> {
        let ctx = TemplateContext::new()
            .with("route_module", self.config.route_module())
            .with("tag", self.config.tag());
        self.render_file(TemplateKind::Router, &ctx)
    }

    /// Test file with one test per configured method; body-taking methods
    /// send the sample document
    pub fn render_tests(&self, example: &JsonObject) -> Result<String> {
        let header_ctx = TemplateContext::new()
            .with("example_data", literal(&JsonValue::Object(example.clone())))
            .with("route_module", self.config.route_module());

        let mut sections = vec![self.render_section(TemplateKind::TestHeader, &header_ctx)?];
        for &method in &self.config.methods {
            let body = if method.takes_body() {
                ", json=EXAMPLE_DATA"
            } else {
                ""
            };
            let ctx = self.method_context(method).with("body", body);
            sections.push(self.render_section(TemplateKind::TestFunc, &ctx)?);
        }

        Ok(join_sections(&sections))
    }

    /// Variables shared by handler and test templates
    fn method_context(&self, method: Method) -> TemplateContext {
        TemplateContext::new()
            .with("method", method.lower())
            .with("path", self.config.route_path.as_str())
            .with(
                "function_name",
                format!("{}_{}", method.lower(), self.config.model_name.to_lowercase()),
            )
            .with("model_name", self.config.model_name.as_str())
    }

    fn render_section(&self, kind: TemplateKind, ctx: &TemplateContext) -> Result<String> {
        Ok(render(self.templates.get(kind), ctx)?.trim().to_string())
    }

    fn render_file(&self, kind: TemplateKind, ctx: &TemplateContext) -> Result<String> {
        let mut text = render(self.templates.get(kind), ctx)?.trim_end().to_string();
        text.push('\n');
        Ok(text)
    }
}

/// Top-level Python blocks are separated by two blank lines
fn join_sections(sections: &[String]) -> String {
    let mut text = sections.join("\n\n\n");
    text.push('\n');
    text
}
