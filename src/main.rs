mod backfill;
mod cli;
mod dimensions;
mod error;
mod extract;
mod facts;
mod fmt;
mod loader;
mod logging;
mod manifest;
mod models;
mod normalizer;
mod pipeline;
mod quality_gate;
mod reconciler;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        None => cli::run::run(None, None),
        Some(Commands::Run { input, target_dir }) => cli::run::run(input, target_dir),
        Some(Commands::Init { input, target_dir }) => cli::init::run(input, target_dir),
        Some(Commands::Status { target_dir }) => cli::status::run(target_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
