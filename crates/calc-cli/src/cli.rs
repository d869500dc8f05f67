//! CLI argument definitions for the calculator harness.

use std::path::PathBuf;

use calc_core::CalculatorMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "classcalc",
    version,
    about = "Classroom calculator - drive the keyboard dispatcher from the terminal",
    long_about = "Drive the classroom calculator from the terminal.\n\n\
                  Key presses are read from arguments or a script file and run through\n\
                  the same dispatcher, capability checks and state machine as the UI."
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
    /// Press keys against a fresh calculator and show the result.
    Run(RunArgs),

    /// List the key bindings of a mode.
    Bindings(BindingsArgs),

    /// Show the effective capability flags.
    Settings(SettingsArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Key tokens, e.g. `7 * 6 Enter` or `Ctrl+m`.
    #[arg(value_name = "KEYS", required_unless_present = "script")]
    pub keys: Vec<String>,

    /// Read key tokens from a file (`#` starts a comment).
    #[arg(long = "script", value_name = "FILE", conflicts_with = "keys")]
    pub script: Option<PathBuf>,

    /// Calculator mode.
    #[arg(long = "mode", value_enum, default_value = "standard")]
    pub mode: ModeArg,

    /// Administrator settings file (TOML or JSON).
    #[arg(long = "settings", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Print one row per key press.
    #[arg(long = "trace")]
    pub trace: bool,

    /// Print a plain-text transcript instead of tables.
    #[arg(long = "plain")]
    pub plain: bool,
}

#[derive(Args)]
pub struct BindingsArgs {
    /// Calculator mode.
    #[arg(long = "mode", value_enum, default_value = "standard")]
    pub mode: ModeArg,

    /// Mark bindings disabled by this settings file.
    #[arg(long = "settings", value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Administrator settings file (TOML or JSON).
    #[arg(long = "settings", value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

/// CLI calculator mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Standard,
    Scientific,
    Programmer,
}

impl From<ModeArg> for CalculatorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standard => Self::Standard,
            ModeArg::Scientific => Self::Scientific,
            ModeArg::Programmer => Self::Programmer,
        }
    }
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
