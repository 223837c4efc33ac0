//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

/// Flattened into [`super::Cli`] with `global = true` on every field.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    // ── where ──────────────────────────────────────────────────────────────
    /// Project root; defaults to the current directory.
    #[arg(
        short = 'C',
        long = "project",
        global = true,
        value_name = "DIR",
        help_heading = "Project",
        help = "Run as if started in DIR"
    )]
    pub project: Option<PathBuf>,

    /// Template root, overriding `templates.root` from the config.
    #[arg(
        long = "templates",
        global = true,
        value_name = "DIR",
        help_heading = "Project",
        help = "Template directory"
    )]
    pub templates: Option<PathBuf>,

    /// Configuration file; defaults to the platform config dir.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help_heading = "Project",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    // ── how results are shown ──────────────────────────────────────────────
    /// `auto` defers to `output.format`, then to whether stdout is a terminal.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Auto,
        help_heading = "Output",
        help = "Output format"
    )]
    pub output_format: OutputFormat,

    /// Also set by `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help_heading = "Output",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    // ── diagnostics on stderr ──────────────────────────────────────────────
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help_heading = "Diagnostics",
        help = "More diagnostics on stderr (-v, -vv, -vvv)",
        long_help = "More diagnostics on stderr:
    (none)  warnings and errors
    -v      each generation step
    -vv     paths and registry decisions, with the emitting module
    -vvv    every file write, with source locations"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help_heading = "Diagnostics",
        help = "Only report errors"
    )]
    pub quiet: bool,
}

/// How command results are rendered on stdout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Decide from the config, then from the terminal.
    #[default]
    Auto,
    /// Colored, with progress bars.
    Human,
    /// No colors, no progress bars.
    Plain,
    /// One JSON document per command.
    Json,
}

impl OutputFormat {
    /// The flag wins unless it is `auto`; then the configured format.
    pub fn or_configured(self, configured: OutputFormat) -> OutputFormat {
        match self {
            OutputFormat::Auto => configured,
            explicit => explicit,
        }
    }
}
