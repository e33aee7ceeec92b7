//! Locate command - print a target's dictionary and corpus.

use colored::Colorize;
use firequery_harness::FuzzTarget;
use tracing::debug;

pub fn run(
    target: FuzzTarget,
    resource_root: &str,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let locations = target.resource_locations(resource_root);
    debug!(%target, owner = %locations.owner, "resolved resources");

    if json_output {
        println!("{}", serde_json::to_string_pretty(&locations)?);
        return Ok(());
    }

    println!("{} {}", "Resources for".cyan().bold(), target.to_string().white());
    if !target.owns_resources() {
        println!("  {} {}", "Shared with:".dimmed(), locations.owner);
    }
    println!("  Dictionary: {}", locations.dictionary);
    println!("  Corpus:     {}", locations.corpus);

    Ok(())
}
