// Build history read from a job's builds directory.
//
// Layout
// - {builds_dir}/1/, {builds_dir}/2/, {builds_dir}/5/ ...
// - Every numerically named subdirectory is one build. Anything else is ignored.
//
// Responsibilities
// - The previous build is the highest existing number strictly below the current one, so
//   pruned builds are simply stepped over.
// - One directory listing serves a whole backward walk. last_build always lists afresh, and so
//   does previous_build for a build the last listing did not contain.

use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::ports::BuildHistory;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

pub struct DirectoryBuildHistory {
    builds_dir: PathBuf,
    listed: Mutex<Vec<u64>>,
    listings: AtomicUsize,
}

impl DirectoryBuildHistory {
    pub fn new(builds_dir: impl Into<PathBuf>) -> Self {
        Self {
            builds_dir: builds_dir.into(),
            listed: Mutex::new(Vec::new()),
            listings: AtomicUsize::new(0),
        }
    }

    pub fn build(&self, number: u64) -> BuildRef {
        BuildRef::new(number, self.builds_dir.join(number.to_string()))
    }

    /// How many times the builds directory has been read.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }

    /// Sorted build numbers currently on disk. A missing directory is an empty history.
    async fn list_build_numbers(&self) -> anyhow::Result<Vec<u64>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        let mut numbers = Vec::new();
        let mut entries = match fs::read_dir(&self.builds_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(numbers),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("reading builds directory {}", self.builds_dir.display())
                });
            }
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            if let Some(number) = entry.file_name().to_str().and_then(|n| n.parse().ok()) {
                numbers.push(number);
            }
        }
        numbers.sort_unstable();
        debug!(builds_dir = %self.builds_dir.display(), builds = numbers.len(), "Listed builds");
        Ok(numbers)
    }
}

#[async_trait]
impl BuildHistory for DirectoryBuildHistory {
    async fn last_build(&self) -> anyhow::Result<Option<BuildRef>> {
        let numbers = self.list_build_numbers().await?;
        let last = numbers.last().map(|n| self.build(*n));
        *self.listed.lock().await = numbers;
        Ok(last)
    }

    async fn previous_build(&self, build: &BuildRef) -> anyhow::Result<Option<BuildRef>> {
        let mut listed = self.listed.lock().await;
        if listed.binary_search(&build.number()).is_err() {
            *listed = self.list_build_numbers().await?;
        }
        let below = listed.partition_point(|n| *n < build.number());
        Ok(listed[..below].last().map(|n| self.build(*n)))
    }
}
