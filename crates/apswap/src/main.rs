mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::path::Path;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Name of the tracing log written alongside `debug.log`.
const TRACE_LOG: &str = "apswap.log";

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need captures or logging setup
        Command::Config(args) => {
            init_tracing(cli.global.verbose, None);
            commands::config_cmd::handle(&args, &cli.global)
        }

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "apswap", &mut std::io::stdout());
            Ok(())
        }

        Command::Run(args) => {
            let cfg = config::load_config()?;
            let log_dir = args.log_dir.clone().or_else(|| cfg.defaults.log_dir.clone());
            if let Some(ref dir) = log_dir {
                std::fs::create_dir_all(dir).map_err(|source| CliError::FileAccess {
                    action: "create log directory",
                    path: dir.display().to_string(),
                    source,
                })?;
            }
            let _guard = init_tracing(cli.global.verbose, log_dir.as_deref());

            tracing::debug!(?args, "dispatching run");
            commands::run::handle(&args, log_dir.as_deref(), &cli.global, &cfg)
        }

        Command::Inspect(args) => {
            let cfg = config::load_config()?;
            init_tracing(cli.global.verbose, None);

            tracing::debug!(?args, "dispatching inspect");
            commands::inspect::handle(&args, &cli.global, &cfg)
        }
    }
}

/// Console tracing on stderr, plus a plain-text file log when `log_dir`
/// is set. The returned guard flushes the file writer on drop.
fn init_tracing(verbosity: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, TRACE_LOG);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}
