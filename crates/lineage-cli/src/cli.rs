//! CLI argument definitions for the lineage tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lineage-cli",
    version,
    about = "Inspect the provenance of tabular data",
    long_about = "Inspect the provenance of tabular data.\n\n\
                  Computes load identifiers for files, sheets, and rows, opens\n\
                  sources in the host viewer, and renders origin trees from a\n\
                  lineage manifest."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the identifiers and URI of a file, sheet, or row location.
    Identify(IdentifyArgs),

    /// Open a location in the host environment's default viewer.
    Open(OpenArgs),

    /// Render the origin tree described by a lineage manifest.
    Render(RenderArgs),
}

#[derive(Parser)]
pub struct IdentifyArgs {
    /// Path to the source file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Sheet name within the file.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Row within the sheet (1-based).
    #[arg(long = "row", value_name = "N")]
    pub row: Option<u32>,

    /// Root folder used to relativize the displayed identifier.
    #[arg(long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Emit the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct OpenArgs {
    /// Path to the source file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Sheet name within the file.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Row within the sheet (1-based).
    #[arg(long = "row", value_name = "N")]
    pub row: Option<u32>,

    /// Request non-exclusive opening where the viewer supports locking.
    #[arg(long = "read-only")]
    pub read_only: bool,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Path to the JSON lineage manifest.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Output rendering format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: RenderFormatArg,

    /// Append the distinct-input listing after the rendering.
    #[arg(long = "inputs")]
    pub inputs: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RenderFormatArg {
    Text,
    Html,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
