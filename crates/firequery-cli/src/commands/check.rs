//! Check command - report missing dictionaries and corpora.

use colored::Colorize;
use firequery_harness::check_resources;
use tracing::{info, warn};

pub fn run(resource_root: &str, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(resource_root, "checking fuzz resources");
    let statuses = check_resources(resource_root)?;
    let incomplete = statuses.iter().filter(|s| !s.is_complete()).count();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else {
        for status in &statuses {
            let marker = if status.is_complete() {
                "ok".green().bold()
            } else {
                "missing".red().bold()
            };
            let users: Vec<String> = status.users.iter().map(|t| t.to_string()).collect();
            println!("{} {} ({})", marker, status.owner.to_string().white().bold(), users.join(", "));

            let dictionary = if status.dictionary_exists {
                status.dictionary.normal()
            } else {
                status.dictionary.red()
            };
            println!("  Dictionary: {}", dictionary);

            let corpus = if status.corpus_exists {
                format!("{} ({} seeds)", status.corpus, status.seed_count).normal()
            } else {
                status.corpus.red()
            };
            println!("  Corpus:     {}", corpus);
        }
    }

    if incomplete > 0 {
        warn!(incomplete, "fuzz resources incomplete");
        return Err(format!(
            "{} resource set(s) incomplete under {}",
            incomplete, resource_root
        )
        .into());
    }

    Ok(())
}
