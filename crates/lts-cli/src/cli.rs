//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lts",
    version,
    about = "Legal template substitution - find blanks, fill them, or turn them into variables",
    long_about = "Detect fill-in blanks in legal document templates.\n\n\
                  Recognizes the template family, fills blanks from case data in\n\
                  document order, suggests variables for already-filled text and\n\
                  checks that nothing is left unfilled."
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

    /// Log output format (pretty for humans, json for machine parsing).
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

    /// Allow document values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Engine configuration (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Extra family tables (JSON) layered over the built-in ones.
    #[arg(long = "mappings", value_name = "PATH", global = true)]
    pub mappings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List blanks and suggest variables for filled-in values.
    Analyze(AnalyzeArgs),

    /// Report the template family of a document.
    Classify(DocumentArgs),

    /// Fill blanks from case data.
    Fill(FillArgs),

    /// Replace blanks with {{variable}} tokens.
    Templatize(TemplatizeArgs),

    /// Check that every {{variable}} token has a value.
    Validate(ValidateArgs),

    /// List the field tables of every template family.
    Families,
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Plain-text document to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Print the analysis as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct FillArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Case data as a flat JSON object.
    #[arg(long = "data", value_name = "PATH")]
    pub data: PathBuf,

    /// Template family key (detected from the text when omitted).
    #[arg(long = "family", value_name = "KEY")]
    pub family: Option<String>,

    /// Write the filled text here instead of stdout.
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct TemplatizeArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Template family key (detected from the text when omitted).
    #[arg(long = "family", value_name = "KEY")]
    pub family: Option<String>,

    /// Write the template here instead of stdout.
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Variable values as a flat JSON object.
    #[arg(long = "data", value_name = "PATH")]
    pub data: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
