//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, NamingStrategy};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::loader::{load_sample, Sample};
use crate::output::{write_scaffold, GeneratedFile};
use crate::schema::{DiagnosticKind, ExtractedSchema, SchemaInferrer};
use crate::types::Method;
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        match &self.cli.command {
            Commands::Generate { json, dry_run, .. } => self.generate(json, &config, *dry_run),
            Commands::Inspect { json, .. } => self.inspect(json, &config),
        }
    }

    /// Config file (or defaults) with command-line overrides applied, validated
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.cli.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        match &self.cli.command {
            Commands::Generate {
                methods,
                output,
                model_name,
                path,
                naming,
                strict,
                templates,
                ..
            } => {
                if let Some(methods) = methods {
                    config.methods = Method::parse_list(methods)?;
                }
                if let Some(output) = output {
                    config.output_dir.clone_from(output);
                }
                if let Some(model_name) = model_name {
                    config.model_name.clone_from(model_name);
                }
                if let Some(path) = path {
                    config.route_path.clone_from(path);
                }
                if let Some(templates) = templates {
                    config.templates_dir = Some(templates.clone());
                }
                apply_inference_flags(&mut config, *naming, *strict);
            }
            Commands::Inspect { naming, strict, .. } => {
                apply_inference_flags(&mut config, *naming, *strict);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Infer the schema and write (or print) the scaffold
    fn generate(&self, json: &Path, config: &GeneratorConfig, dry_run: bool) -> Result<()> {
        let (sample, schema) = analyze(json, config)?;
        let generator = Generator::from_config(config.clone())?;
        let files = generator.generate(&sample.root, &schema)?;

        if dry_run {
            print_files(&files);
            return Ok(());
        }

        let written = write_scaffold(&config.output_dir, &files)?;
        info!(
            files = written.len(),
            output = %config.output_dir.display(),
            models = schema.models.len() + 1,
            "Scaffold generated"
        );
        for path in &written {
            println!("{}", path.display());
        }
        Ok(())
    }

    /// Print the inferred schema
    fn inspect(&self, json: &Path, config: &GeneratorConfig) -> Result<()> {
        let (_, schema) = analyze(json, config)?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}

fn apply_inference_flags(
    config: &mut GeneratorConfig,
    naming: Option<NamingStrategy>,
    strict: bool,
) {
    if let Some(naming) = naming {
        config.naming = naming.into();
    }
    if strict {
        config.strict_lists = true;
    }
}

/// Load a sample and infer its schema, reporting diagnostics
pub(crate) fn analyze(json: &Path, config: &GeneratorConfig) -> Result<(Sample, ExtractedSchema)> {
    let sample = load_sample(json)?;
    let schema = SchemaInferrer::new()
        .with_naming(config.naming)
        .with_reserved_name(config.model_name.as_str())
        .infer(&sample.root);

    for diagnostic in &schema.diagnostics {
        warn!(kind = ?diagnostic.kind, path = %diagnostic.path, "{}", diagnostic.message);
    }

    if config.strict_lists {
        if let Some(diagnostic) = schema
            .diagnostics_of(DiagnosticKind::HeterogeneousList)
            .next()
        {
            return Err(Error::HeterogeneousList {
                path: diagnostic.path.clone(),
                message: diagnostic.message.clone(),
            });
        }
    }

    Ok((sample, schema))
}

fn print_files(files: &[GeneratedFile]) {
    for file in files {
        println!("# {}", file.path.display());
        println!("{}", file.contents);
    }
}
