use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ConfXYZ CLI - Inspect, normalize, and deduplicate extended-XYZ molecular configuration files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize the records in a configuration file.
    Info(InfoArgs),
    /// Parse a configuration file and re-emit it in normalized form.
    Convert(ConvertArgs),
    /// Report which molecules already appear in a reference submission table.
    Dedup(DedupArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the input configuration file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input configuration file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the normalized output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `dedup` subcommand.
#[derive(Args, Debug)]
pub struct DedupArgs {
    /// Path to the input configuration file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the CSV reference table of prior submissions.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub reference: PathBuf,

    /// Metadata key holding each record's molecule identity.
    #[arg(short, long, default_value = "smiles", value_name = "KEY")]
    pub key: String,

    /// Header of the reference table column to compare against.
    #[arg(short, long, default_value = "SMILES", value_name = "NAME")]
    pub column: String,
}
