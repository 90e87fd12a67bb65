// In memory implementation of the BuildHistory port.
//
// Responsibilities
// - Answer "last build" and "previous build" from a fixed set of builds.
// - Record every previous_build lookup so tests can assert how history was walked.

use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::ports::BuildHistory;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryBuildHistory {
    builds: BTreeMap<u64, BuildRef>,
    pub lookups: Mutex<Vec<u64>>,
    is_offline: bool,
}

impl InMemoryBuildHistory {
    pub fn new(builds: impl IntoIterator<Item = BuildRef>) -> Self {
        Self {
            builds: builds.into_iter().map(|b| (b.number(), b)).collect(),
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait::async_trait]
impl BuildHistory for InMemoryBuildHistory {
    async fn last_build(&self) -> anyhow::Result<Option<BuildRef>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Build history offline"));
        }

        Ok(self.builds.values().next_back().cloned())
    }

    async fn previous_build(&self, build: &BuildRef) -> anyhow::Result<Option<BuildRef>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Build history offline"));
        }

        self.lookups.lock().await.push(build.number());
        Ok(self
            .builds
            .range(..build.number())
            .next_back()
            .map(|(_, b)| b.clone()))
    }
}
