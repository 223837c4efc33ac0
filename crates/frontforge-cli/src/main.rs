//! # frontforge
//!
//! Scaffolds Preact micro-frontends and the express controllers and services
//! that serve them, keeps the project's JSON registries up to date, builds
//! every registered front and writes the nginx config for them.
//!
//! ## Exit codes
//!
//! | Code | Meaning                             |
//! |------|-------------------------------------|
//! |  0   | Success                             |
//! |  1   | Internal error or failed command    |
//! |  2   | User input error or conflict        |
//! |  3   | Template or variant not found       |
//! |  4   | Configuration error                 |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // a missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version arrive here too, with exit code 0
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("frontforge: {e:#}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && std::io::stderr().is_terminal();
    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err, verbose, color),
    }
}

/// Load the config and run the requested command.
#[instrument(skip_all)]
fn start(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.global.config.as_deref())
        .with_cli_context(|| "Failed to load configuration")?;
    let output = OutputManager::new(&cli.global, &config);
    debug!(
        format = ?output.format(),
        project = ?cli.global.project,
        templates = ?cli.global.templates,
        "Starting"
    );

    let global = cli.global;
    match cli.command {
        Commands::Create(cmd) => commands::create::execute(cmd, global, config, output),
        Commands::Build(args) => commands::build::execute(args, global, config, output),
        Commands::Nginx(args) => commands::nginx::execute(args, global, config, output),
        Commands::Init(args) => commands::init::execute(args, global, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }?;
    info!("Done");
    Ok(())
}

/// Log `err`, describe it on stderr and pick the exit code.
fn fail(err: &CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    if color {
        eprint!("{}", err.format_colored(verbose));
    } else {
        eprint!("{}", err.format_plain(verbose));
    }
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn every_subcommand_is_reachable() {
        let cmd = Cli::command();
        let names: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        for expected in ["create", "build", "nginx", "init", "config", "completions"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }
}
