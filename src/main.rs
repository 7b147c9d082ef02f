//! Payments: mobile-money gateway client.
//!
//! Entry point for the payments application.

use payments::config::{Action, Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, print_runtime_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand before any config file is read
    if let Command::Init { output } = &cli.command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(config.action)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the selected subcommand and prints its result as JSON.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(action: Action) -> ExitCode {
    let result = match action {
        Action::Init { output } => return handle_init(&output),
        Action::Webhook(settings) => run::dispatch_webhook(&settings),
        Action::Authenticate(settings) => {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::error!("Failed to create Tokio runtime: {e}");
                    return exit_code::runtime_error();
                }
            };
            runtime.block_on(async {
                let context = run::interruptible();
                run::authenticate(&settings, context).await
            })
        }
    };

    let rendered = result
        .and_then(|value| serde_json::to_string_pretty(&value).map_err(run::RunError::from));

    match rendered {
        Ok(output) => {
            println!("{output}");
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::error!("Application error: {e}");
            print_runtime_hint(&e);
            exit_code::runtime_error()
        }
    }
}
