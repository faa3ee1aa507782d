mod cli;
mod commands;
mod imc;
mod inventory;
mod output;
mod report;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{handle_disks_command, handle_servers_command};
use output::print_error;
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match &cli.command {
        Commands::Disks(args) => handle_disks_command(args),
        Commands::Servers { input } => handle_servers_command(input),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
