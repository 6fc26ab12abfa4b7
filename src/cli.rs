use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pux2csv",
    author,
    version,
    about = "Convert 1Password 1PUX exports into password CSV files.",
    long_about = "Convert 1Password 1PUX exports into a flat Title,URL,Username,Password,Notes,OTPAuth CSV. \
Fields the CSV has no column for are folded into the Notes column."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true, help = "Emit machine-readable JSON output.")]
    pub json: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Print only the essential value (e.g. the output path)."
    )]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr.")]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Convert a .1pux archive (or a bare export.data file) to CSV.")]
    Convert(ConvertArgs),

    #[command(about = "Inspect the configuration file.")]
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[arg(help = "Path to the .1pux archive or export.data file.")]
    pub input: PathBuf,

    #[arg(
        short,
        long,
        help = "Output CSV path, or `-` for stdout. Defaults to the input path with a .csv extension."
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Include archived items (trashed items are never included).")]
    pub include_archived: bool,

    #[arg(long, help = "Do not write a UTF-8 byte-order mark.")]
    pub no_bom: bool,

    #[arg(short, long, help = "Overwrite the output file if it exists.")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Print the configuration file location.")]
    Path,

    #[command(about = "Print the effective settings.")]
    Show,
}
