//! libFuzzer command lines wired to each target's resources.

use crate::target::FuzzTarget;

/// Optional engine limits passed through to libFuzzer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Number of individual test runs (`-runs`).
    pub runs: Option<u64>,
    /// Total time budget in seconds (`-max_total_time`).
    pub max_total_time: Option<u64>,
    /// Maximum input length in bytes (`-max_len`).
    pub max_len: Option<usize>,
    /// Per-input timeout in seconds (`-timeout`).
    pub timeout: Option<u64>,
    /// Number of parallel fuzzing jobs (`-jobs`).
    pub jobs: Option<u32>,
}

/// Engine flags for `target`: the corpus directory first, then the
/// dictionary, then any limits that were set.
pub fn launch_args(target: FuzzTarget, resource_root: &str, options: &LaunchOptions) -> Vec<String> {
    let mut args = vec![target.corpus_location(resource_root)];
    args.extend(engine_flags(target, resource_root, options));
    args
}

/// A complete `cargo fuzz run` invocation for `target`.
pub fn cargo_fuzz_command(
    target: FuzzTarget,
    resource_root: &str,
    options: &LaunchOptions,
) -> Vec<String> {
    let mut command: Vec<String> = ["cargo", "fuzz", "run", target.fuzz_binary()]
        .iter()
        .map(|s| s.to_string())
        .collect();
    command.push(target.corpus_location(resource_root));
    command.push("--".to_string());
    command.extend(engine_flags(target, resource_root, options));
    command
}

fn engine_flags(target: FuzzTarget, resource_root: &str, options: &LaunchOptions) -> Vec<String> {
    let mut flags = vec![format!("-dict={}", target.dictionary_location(resource_root))];

    if let Some(runs) = options.runs {
        flags.push(format!("-runs={}", runs));
    }
    if let Some(seconds) = options.max_total_time {
        flags.push(format!("-max_total_time={}", seconds));
    }
    if let Some(max_len) = options.max_len {
        flags.push(format!("-max_len={}", max_len));
    }
    if let Some(timeout) = options.timeout {
        flags.push(format!("-timeout={}", timeout));
    }
    if let Some(jobs) = options.jobs {
        flags.push(format!("-jobs={}", jobs));
    }

    flags
}
