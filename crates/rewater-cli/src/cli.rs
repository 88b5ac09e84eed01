use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "rewater",
    author = "Rewater Developers",
    version,
    about = "Rewater - Convert the water molecules of a GROMACS .gro file to another rigid water model.",
    help_template = HELP_TEMPLATE,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the input .gro coordinate file.
    #[arg(value_name = "INPUT", required_unless_present = "list_models")]
    pub input: Option<PathBuf>,

    /// Path for the converted .gro file. Writes to standard output when omitted.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Target water model (e.g., tip3p, tip4p-ew, tip5p). See --list-models.
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Print the available water models and exit.
    #[arg(long)]
    pub list_models: bool,

    /// TOML file with additional [[model]] definitions.
    #[arg(long, value_name = "PATH")]
    pub models_file: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable the progress bar on standard error.
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
