//! # Larascaff CLI
//!
//! Scaffolding for Laravel packages, Filament plugins, Orchestra Workbench and
//! Pest test harnesses.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                 |
//! |------|-----------------------------------------|
//! |  0   | Success                                 |
//! |  1   | Internal / system error                 |
//! |  2   | User / input error, target exists       |
//! |  3   | Manifest or package directory not found |
//! |  4   | Configuration error                     |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, ConfigCommands},
    config::AppConfig,
    error::{CliError, CliResult},
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
    // Silently ignored if .env doesn't exist.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here and must exit 0.
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3. Load configuration ─────────────────────────────────────────────
    // `init` and `config set` create the file, so they must not require it.
    let config = if creates_config(&cli.command) {
        AppConfig::default()
    } else {
        match AppConfig::load(cli.global.config.as_ref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                return handle_error(
                    CliError::ConfigError {
                        message: format!("{e:#}"),
                        source: None,
                    },
                    verbose,
                );
            }
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("Larascaff completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

fn creates_config(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Init(_) | Commands::Completions(_) | Commands::Config(ConfigCommands::Set { .. })
    )
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let config_file = cli.global.config.as_deref();
    match cli.command {
        Commands::Package(args) => commands::package::execute(args, &config, &output),
        Commands::Plugin(args) => commands::plugin::execute(args, &config, &output),
        Commands::Workbench(args) => commands::workbench::execute(args, &config, &output),
        Commands::Testing(args) => commands::testing::execute(args, &config, &output),
        Commands::Link(args) => commands::link::execute(args, &config, &output),
        Commands::Init(args) => commands::init::execute(args, config_file, &output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, &config, config_file, &output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message appears even when stdout is redirected.
    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
