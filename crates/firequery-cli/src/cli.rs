//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use firequery_harness::FuzzTarget;

/// firequery-fuzz: resource locator and replay tool for the fuzz targets
#[derive(Parser)]
#[command(name = "firequery-fuzz")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory holding the dictionaries and corpora
    #[arg(
        long,
        global = true,
        env = "FIREQUERY_FUZZ_RESOURCES",
        default_value = "crates/firequery-harness/fuzz/resources"
    )]
    pub resources: String,

    /// Log filter (e.g. "warn", "debug", "firequery_cli=trace")
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dictionary and corpus locations for a target
    Locate {
        /// Target name (FieldPath, CollectionReference, FIRQuery)
        #[arg(value_name = "TARGET")]
        target: FuzzTarget,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the cargo fuzz command line for a target
    Args {
        #[arg(value_name = "TARGET")]
        target: FuzzTarget,

        /// Number of individual runs
        #[arg(long)]
        runs: Option<u64>,

        /// Total time budget in seconds
        #[arg(long)]
        max_total_time: Option<u64>,

        /// Maximum input length in bytes
        #[arg(long)]
        max_len: Option<usize>,

        /// Per-input timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Number of parallel jobs
        #[arg(long)]
        jobs: Option<u32>,
    },

    /// Run saved inputs through a target's entry point
    Replay {
        #[arg(value_name = "TARGET")]
        target: FuzzTarget,

        /// Input files or directories (default: the target's corpus)
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Skip inputs larger than this many bytes
        #[arg(long)]
        max_len: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that every dictionary and corpus exists
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fuzz targets and the resources they use
    Targets,
}
