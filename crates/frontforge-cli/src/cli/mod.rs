//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "frontforge",
    bin_name = "frontforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Micro-frontend and express stub scaffolding",
    long_about = "frontforge creates Preact micro-frontends inside a project, \
                  wires matching express controllers and services, and keeps \
                  the project registries, routers and proxy config in sync.",
    after_help = "EXAMPLES:\n\
        \x20 frontforge init --backend express\n\
        \x20 frontforge create frontend admin/reports/summary --router\n\
        \x20 frontforge create controller shop/cart --constructor byFeature\n\
        \x20 frontforge build\n\
        \x20 frontforge nginx",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a frontend, controller or service.
    #[command(
        subcommand,
        visible_alias = "c",
        about = "Generate an artifact",
        after_help = "EXAMPLES:\n\
            \x20 frontforge create frontend admin/reports/summary --port 5180\n\
            \x20 frontforge create controller admin/reports/summary\n\
            \x20 frontforge create service shop/cart"
    )]
    Create(CreateCommands),

    /// Build every registered front for production.
    #[command(about = "Build all registered fronts")]
    Build(BuildArgs),

    /// Write the nginx config with one location per front.
    #[command(
        about = "Generate the nginx proxy config",
        after_help = "EXAMPLES:\n\
            \x20 frontforge nginx\n\
            \x20 frontforge nginx --output docker/nginx"
    )]
    Nginx(NginxArgs),

    /// Initialise frontforge in the current project.
    #[command(
        about = "Initialise the project",
        after_help = "EXAMPLES:\n\
            \x20 frontforge init                                   # frontends only\n\
            \x20 frontforge init --backend express                 # express skeleton + npm install\n\
            \x20 frontforge init --backend express --skip-install  # skeleton only"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 frontforge completions bash > ~/.local/share/bash-completion/completions/frontforge\n\
            \x20 frontforge completions zsh  > ~/.zfunc/_frontforge\n\
            \x20 frontforge completions fish > ~/.config/fish/completions/frontforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the frontforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 frontforge config get templates.root\n\
            \x20 frontforge config list\n\
            \x20 frontforge config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Subcommands for `frontforge create`.
#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// Scaffold a Preact micro-frontend (and express stubs when enabled).
    #[command(visible_alias = "front")]
    Frontend(FrontendArgs),

    /// Generate an express controller and wire its route.
    Controller(BackendArgs),

    /// Generate an express service.
    Service(BackendArgs),
}

/// Arguments for `frontforge create frontend`.
#[derive(Debug, Args)]
pub struct FrontendArgs {
    /// `<domain>/<feature>`, e.g. `admin/reports/summary`.
    #[arg(value_name = "DOMAIN/FEATURE")]
    pub path: String,

    /// Dev-server port (default from `frontend.default_port`).
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Also install `wouter` for client-side routing.
    #[arg(long = "router")]
    pub router: bool,
}

/// Arguments for `frontforge create controller|service`.
#[derive(Debug, Args)]
pub struct BackendArgs {
    /// `<domain>/<feature>`, e.g. `admin/reports/summary`.
    #[arg(value_name = "DOMAIN/FEATURE")]
    pub path: String,

    /// Constructor fragment variant.
    #[arg(long = "constructor", value_name = "VARIANT")]
    pub constructor: Option<String>,

    /// Method fragment variant.
    #[arg(long = "method", value_name = "VARIANT")]
    pub method: Option<String>,
}

// ── build / nginx ─────────────────────────────────────────────────────────────

/// Arguments for `frontforge build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Exit non-zero when any front fails to build.
    #[arg(long = "strict")]
    pub strict: bool,
}

/// Arguments for `frontforge nginx`.
#[derive(Debug, Args)]
pub struct NginxArgs {
    /// Output directory, relative to the project (default from `proxy.output_dir`).
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `frontforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Backend used by the project.
    #[arg(long = "backend", value_enum, default_value = "none")]
    pub backend: Backend,

    /// Overwrite an existing project config.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,

    /// Do not run `npm install` after laying down the express skeleton.
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

/// Backends `init` knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Express,
    None,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Express => write!(f, "express"),
            Self::None => write!(f, "none"),
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `frontforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `frontforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `frontend.default_port`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
