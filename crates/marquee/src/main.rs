mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use marquee_core::Catalog;

use crate::cli::{Cli, Command};
use crate::commands::BackendCommand;
use crate::error::{CliError, exit_code};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    let code = match run(cli).await {
        Ok(()) => exit_code::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cmd = match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => return commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "marquee", &mut std::io::stdout());
            return Ok(());
        }

        Command::Movies(args) => BackendCommand::Movies(args),
        Command::Actors(args) => BackendCommand::Actors(args),
        Command::Cast(args) => BackendCommand::Cast(args),
        Command::Permissions => BackendCommand::Permissions,
    };

    let client_config = config::resolve_client_config(&cli.global)?;
    let catalog = Catalog::new(client_config)?;

    tracing::debug!(command = ?cmd, base_url = %catalog.config().base_url, "dispatching command");
    commands::dispatch(cmd, &catalog, &cli.global).await
}
