use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of a `--config` TOML file. Every key is optional.
///
/// ```toml
/// model = "tip4p-ew"
/// models-file = "my-models.toml"
/// progress = false
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub model: Option<String>,
    pub models_file: Option<PathBuf>,
    pub progress: Option<bool>,
}

impl FileConfig {
    /// Reads a configuration file. A relative `models-file` is resolved against the
    /// directory containing the configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(models_file) = config.models_file.take() {
            let resolved = match path.parent() {
                Some(dir) if models_file.is_relative() => dir.join(models_file),
                _ => models_file,
            };
            config.models_file = Some(resolved);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn all_keys_are_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rewater.toml");
        fs::write(
            &path,
            "model = \"tip5p\"\nmodels-file = \"/abs/models.toml\"\nprogress = false\n",
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();

        assert_eq!(config.model.as_deref(), Some("tip5p"));
        assert_eq!(config.models_file, Some(PathBuf::from("/abs/models.toml")));
        assert_eq!(config.progress, Some(false));
    }

    #[test]
    fn relative_models_file_is_resolved_next_to_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rewater.toml");
        fs::write(&path, "models-file = \"models.toml\"\n").unwrap();

        let config = FileConfig::from_file(&path).unwrap();

        assert_eq!(config.models_file, Some(dir.path().join("models.toml")));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rewater.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(FileConfig::from_file(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rewater.toml");
        fs::write(&path, "model = \"tip3p\"\nthreads = 4\n").unwrap();

        let result = FileConfig::from_file(&path);

        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
