use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use capguard::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use capguard::adapter::inbound::cli::output::{self, OutputConfig};
use capguard::adapter::inbound::cli::{config, limits, simulate};

/// `-v` flags take over logging before any config is read; without them the
/// config file's `[logging]` section applies.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
        Commands::Limits(args) => limits::list(&args.config),
        Commands::Simulate(args) => simulate::execute(&args.scenario, &args.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
