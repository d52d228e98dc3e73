//! CLI argument definitions for the EXI analyser.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "exi-analyser",
    version,
    about = "Per-exam median report from radiography exposure-index logs",
    long_about = "Read every CSV export in a folder, drop malformed and duplicate rows,\n\
                  and write the median kV, mAs, DAP, EXI, collimation, SID and dose of\n\
                  each exam type to a CSV report.\n\n\
                  Paths not given on the command line are asked for interactively."
)]
pub struct Cli {
    /// Folder containing the CSV exports.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Report file to write (`.csv` is added when no extension is given).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Choose missing paths with native dialogs instead of a terminal prompt.
    #[arg(long = "dialogs")]
    pub dialogs: bool,

    /// How to handle bytes that are not valid UTF-8.
    #[arg(long = "decode", value_enum, default_value = "ignore")]
    pub decode: DecodeArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Undecodable byte handling.
#[derive(Clone, Copy, ValueEnum)]
pub enum DecodeArg {
    /// Drop the bytes.
    Ignore,
    /// Keep a U+FFFD replacement character.
    Replace,
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
