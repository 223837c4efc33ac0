//! Diagnostics on stderr via `tracing-subscriber`.
//!
//! `frontforge-core` and `frontforge-adapters` emit spans and events; this
//! module is the only place a subscriber is installed.
//!
//! The level comes from, in order: `FRONTFORGE_LOG`, `RUST_LOG`, then the
//! `-q` / `-v` flags (error, warn, info, debug, trace). A filter given
//! through the environment may also name dependency crates; the flags only
//! ever enable our own.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "FRONTFORGE_LOG";

const OUR_CRATES: &[&str] = &["frontforge", "frontforge_core", "frontforge_adapters"];

/// How much context each log line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Detail {
    /// `frontforge_core::application::services::generation: ...`
    targets: bool,
    /// `generation.rs:212`
    locations: bool,
    timestamps: bool,
}

impl Detail {
    /// Warnings at the default level read like CLI messages; each `-v`
    /// adds context.
    fn for_level(level: LevelFilter) -> Self {
        Self {
            targets: level >= LevelFilter::DEBUG,
            locations: level >= LevelFilter::TRACE,
            timestamps: level >= LevelFilter::INFO,
        }
    }
}

/// Install the subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = verbosity(args);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(own_crates_at(level)));
    let detail = Detail::for_level(level);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(detail.targets)
        .with_file(detail.locations)
        .with_line_number(detail.locations);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if detail.timestamps {
        registry.with(layer).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// `frontforge=<level>,frontforge_core=<level>,...`
fn own_crates_at(level: LevelFilter) -> String {
    OUR_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `-q` wins over any number of `-v`.
fn verbosity(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
