//! Replay corpus files through an entry point without the fuzzing engine.
//!
//! Useful for reproducing a crash from a saved artifact, or for checking
//! that every seed in a corpus still runs cleanly after a library change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{HarnessError, Result};
use crate::target::FuzzTarget;

/// Default cap on replayed input size (1 MiB).
pub const DEFAULT_MAX_LEN: usize = 1 << 20;

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Inputs longer than this are skipped.
    pub max_len: usize,
    /// Descend into subdirectories of directory arguments.
    pub recursive: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            recursive: false,
        }
    }
}

/// One input that was run through the entry point.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayedInput {
    pub path: PathBuf,
    pub len: usize,
    pub digest: String,
    pub status: i32,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub target: FuzzTarget,
    pub executed: Vec<ReplayedInput>,
    /// Inputs over the size cap.
    pub skipped: Vec<PathBuf>,
}

impl ReplayReport {
    pub fn executed_count(&self) -> usize {
        self.executed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Runs files through one target's entry point.
pub struct Replayer {
    target: FuzzTarget,
    config: ReplayConfig,
}

impl Replayer {
    pub fn new(target: FuzzTarget) -> Self {
        Self {
            target,
            config: ReplayConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplayConfig) -> Self {
        self.config = config;
        self
    }

    /// Replay every file named by `paths`. Directories contribute their
    /// files; all inputs run in path order.
    pub fn replay_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ReplayReport> {
        let mut inputs = Vec::new();
        for path in paths {
            collect_inputs(path.as_ref(), self.config.recursive, &mut inputs)?;
        }
        inputs.sort();
        inputs.dedup();

        let mut report = ReplayReport {
            target: self.target,
            executed: Vec::new(),
            skipped: Vec::new(),
        };

        for path in inputs {
            let data = fs::read(&path).map_err(|e| HarnessError::Io {
                path: path.clone(),
                source: e,
            })?;

            if data.len() > self.config.max_len {
                report.skipped.push(path);
                continue;
            }

            let status = self.target.run(&data);
            report.executed.push(ReplayedInput {
                digest: digest(&data),
                len: data.len(),
                path,
                status,
            });
        }

        Ok(report)
    }
}

fn digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("sha256:{:x}", hasher.finalize())
}

fn collect_inputs(path: &Path, recursive: bool, inputs: &mut Vec<PathBuf>) -> Result<()> {
    let io_error = |e| HarnessError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let metadata = fs::metadata(path).map_err(io_error)?;
    if metadata.is_file() {
        inputs.push(path.to_path_buf());
        return Ok(());
    }

    for entry in fs::read_dir(path).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let entry_path = entry.path();
        // Symlinks are only followed to files, so link cycles never recurse.
        let file_type = entry.file_type().map_err(io_error)?;
        if file_type.is_dir() {
            if recursive {
                collect_inputs(&entry_path, recursive, inputs)?;
            }
        } else if !file_type.is_symlink() || entry_path.is_file() {
            inputs.push(entry_path);
        }
    }

    Ok(())
}
