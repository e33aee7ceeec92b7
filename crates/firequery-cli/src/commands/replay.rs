//! Replay command - run saved inputs through an entry point.

use std::path::PathBuf;

use colored::Colorize;
use firequery_harness::{FuzzTarget, ReplayConfig, Replayer};
use tracing::{debug, info};

pub fn run(
    target: FuzzTarget,
    resource_root: &str,
    paths: Vec<PathBuf>,
    recursive: bool,
    max_len: Option<usize>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = if paths.is_empty() {
        vec![PathBuf::from(target.corpus_location(resource_root))]
    } else {
        paths
    };

    let mut config = ReplayConfig {
        recursive,
        ..ReplayConfig::default()
    };
    if let Some(max_len) = max_len {
        config.max_len = max_len;
    }

    info!(%target, inputs = paths.len(), "replaying");
    let report = Replayer::new(target).with_config(config).replay_paths(&paths)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        for input in &report.executed {
            debug!(path = %input.path.display(), status = input.status, "replayed");
            println!(
                "  {} {} bytes {}",
                input.digest.dimmed(),
                input.len,
                input.path.display()
            );
        }
    }
    for path in &report.skipped {
        println!("  {} {}", "skipped".yellow(), path.display());
    }

    println!(
        "{} {} input(s) through {} ({} skipped)",
        "Replayed".green().bold(),
        report.executed_count(),
        target.to_string().white().bold(),
        report.skipped_count()
    );

    Ok(())
}
