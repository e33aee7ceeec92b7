//! Existence checks for dictionaries and corpora.
//!
//! The locator only computes paths; this is where a bootstrap finds out
//! whether they are actually there.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::target::FuzzTarget;

/// Status of one owning target's resources.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceStatus {
    pub owner: FuzzTarget,
    /// Every target that resolves to these resources.
    pub users: Vec<FuzzTarget>,
    pub dictionary: String,
    pub dictionary_exists: bool,
    pub corpus: String,
    pub corpus_exists: bool,
    /// Number of files directly inside the corpus directory.
    pub seed_count: usize,
}

impl ResourceStatus {
    pub fn is_complete(&self) -> bool {
        self.dictionary_exists && self.corpus_exists && self.seed_count > 0
    }
}

/// Check the resources of every owning target under `resource_root`.
pub fn check_resources(resource_root: &str) -> Result<Vec<ResourceStatus>> {
    FuzzTarget::ALL
        .into_iter()
        .filter(FuzzTarget::owns_resources)
        .map(|owner| -> Result<ResourceStatus> {
            let locations = owner.resource_locations(resource_root);
            let corpus = Path::new(&locations.corpus);
            let corpus_exists = corpus.is_dir();
            let seed_count = if corpus_exists { count_seeds(corpus)? } else { 0 };

            Ok(ResourceStatus {
                owner,
                users: owner.resource_users(),
                dictionary_exists: Path::new(&locations.dictionary).is_file(),
                dictionary: locations.dictionary,
                corpus_exists,
                corpus: locations.corpus,
                seed_count,
            })
        })
        .collect()
}

fn count_seeds(corpus: &Path) -> Result<usize> {
    let io_error = |e| HarnessError::Io {
        path: corpus.to_path_buf(),
        source: e,
    };

    let mut count = 0;
    for entry in fs::read_dir(corpus).map_err(io_error)? {
        if entry.map_err(io_error)?.path().is_file() {
            count += 1;
        }
    }
    Ok(count)
}
