use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use rewater::core::io::lines::read_lines_from_path;
use rewater::engine::progress::ProgressReporter;
use rewater::workflows::convert::{self, ConversionSummary};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

const STDOUT_NAME: &str = "<stdout>";

fn write_output(path: Option<&Path>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            let write_error = |source| CliError::Write {
                path: path.display().to_string(),
                source,
            };
            let file = File::create(path).map_err(write_error)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content).map_err(write_error)?;
            writer.flush().map_err(write_error)
        }
        None => {
            let write_error = |source| CliError::Write {
                path: STDOUT_NAME.to_string(),
                source,
            };
            let mut stdout = io::stdout().lock();
            stdout.write_all(content).map_err(write_error)?;
            stdout.flush().map_err(write_error)
        }
    }
}

/// Converts the configured input file and writes the result to the output file or stdout.
///
/// The converted file is assembled in memory first, so a failed conversion never leaves a
/// partially written output behind.
pub fn run(config: &AppConfig) -> Result<ConversionSummary> {
    let input = config
        .input
        .as_deref()
        .ok_or_else(|| CliError::Argument("An input file is required.".to_string()))?;

    info!("Reading '{}'.", input.display());
    let lines = read_lines_from_path(input)?;
    if lines.is_empty() {
        return Err(CliError::EmptyInput {
            path: input.to_path_buf(),
        });
    }
    debug!(lines = lines.len(), "Input file loaded.");

    let progress_handler = config.show_progress.then(CliProgressHandler::new);
    let reporter = match &progress_handler {
        Some(handler) => ProgressReporter::with_callback(handler.get_callback()),
        None => ProgressReporter::new(),
    };

    let mut buffer = Vec::new();
    let summary = convert::run(&lines, &config.model, &mut buffer, &reporter).map_err(
        |source| CliError::Conversion {
            path: input.to_path_buf(),
            source,
        },
    )?;

    write_output(config.output.as_deref(), &buffer)?;
    if let Some(output) = &config.output {
        info!("Wrote {} atoms to '{}'.", summary.atoms_out, output.display());
    }
    eprintln!("Processed {} water molecules.", summary.waters_converted);

    Ok(summary)
}
