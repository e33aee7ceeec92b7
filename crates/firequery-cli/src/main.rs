//! firequery-fuzz CLI - fuzz harness bootstrap.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use firequery_harness::LaunchOptions;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level, cli.verbose) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Locate { target, json } => commands::locate::run(target, &cli.resources, json),

        Commands::Args {
            target,
            runs,
            max_total_time,
            max_len,
            timeout,
            jobs,
        } => {
            let options = LaunchOptions {
                runs,
                max_total_time,
                max_len,
                timeout,
                jobs,
            };
            commands::args::run(target, &cli.resources, &options)
        }

        Commands::Replay {
            target,
            paths,
            recursive,
            max_len,
            json,
        } => commands::replay::run(target, &cli.resources, paths, recursive, max_len, json, cli.verbose),

        Commands::Check { json } => commands::check::run(&cli.resources, json),

        Commands::Targets => commands::targets::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { level };
    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
