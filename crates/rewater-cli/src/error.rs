use rewater::core::io::lines::LineReadError;
use rewater::core::models::registry::RegistryError;
use rewater::engine::error::ConversionError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit status for usage and configuration errors.
pub const EXIT_USAGE: i32 = 1;
/// Exit status for failures to read or write files.
pub const EXIT_IO: i32 = 2;
/// Exit status for malformed input: format errors, bad water geometry, empty files.
pub const EXIT_FORMAT: i32 = 3;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{source}\n  in '{path}'", path = path.display())]
    Conversion {
        path: PathBuf,
        #[source]
        source: ConversionError,
    },

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Read(#[from] LineReadError),

    #[error("Input file '{path}' is empty", path = path.display())]
    EmptyInput { path: PathBuf },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Conversion {
                source: ConversionError::Io(_),
                ..
            } => EXIT_IO,
            CliError::Conversion { .. } | CliError::EmptyInput { .. } => EXIT_FORMAT,
            CliError::Registry(RegistryError::Io { .. }) => EXIT_IO,
            CliError::Read(_) | CliError::Write { .. } | CliError::Io(_) => EXIT_IO,
            CliError::Argument(_)
            | CliError::Registry(_)
            | CliError::FileParsing { .. }
            | CliError::Other(_) => EXIT_USAGE,
        }
    }
}
