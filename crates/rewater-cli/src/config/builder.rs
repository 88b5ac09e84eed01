use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use rewater::core::models::registry::ModelRegistry;
use tracing::debug;

fn load_file_config(cli: &Cli) -> Result<FileConfig> {
    match &cli.config {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn load_registry(cli: &Cli, file_config: &FileConfig) -> Result<ModelRegistry> {
    match cli.models_file.as_ref().or(file_config.models_file.as_ref()) {
        Some(path) => {
            debug!("Loading custom water models from {:?}", path);
            Ok(ModelRegistry::load(path)?)
        }
        None => Ok(ModelRegistry::new()),
    }
}

/// Builds the model registry alone, for commands that do not convert a file.
pub fn build_registry(cli: &Cli) -> Result<ModelRegistry> {
    let file_config = load_file_config(cli)?;
    load_registry(cli, &file_config)
}

/// Merges command line, configuration file and defaults, in that order of precedence,
/// and resolves the target water model.
pub fn build_config(cli: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(cli)?;
    let registry = load_registry(cli, &file_config)?;

    let model_name = cli
        .model
        .as_deref()
        .or(file_config.model.as_deref())
        .unwrap_or(defaults.model.as_str());
    let model = registry.get(model_name).ok_or_else(|| {
        CliError::Argument(format!(
            "Unknown water model '{}'. Run with --list-models to see the supported models.",
            model_name
        ))
    })?;

    let show_progress =
        !cli.no_progress && file_config.progress.unwrap_or(defaults.show_progress);

    Ok(AppConfig {
        registry,
        model,
        input: cli.input.clone(),
        output: cli.output.clone(),
        show_progress,
    })
}
