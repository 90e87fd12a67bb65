// In memory implementation of the RemoteRevisionSource port.
//
// Purpose
// - Stand in for the knowledge base server in tests and local development.
//
// Responsibilities
// - Hold the server's commit history as change entries.
// - Answer latest-revision queries within a window and list changes in (from, to].
// - Record every query, and optionally delay answers so cancellation can be exercised.

use crate::modules::kb_revisions::core::changelog::ChangeEntry;
use crate::modules::kb_revisions::core::coordinates::KbCoordinates;
use crate::modules::kb_revisions::core::ports::{RemoteRevisionSource, RemoteSourceError};
use crate::modules::kb_revisions::core::watermark::{MIN_WATERMARK, RevisionWatermark};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

pub type Window = (Option<DateTime<Utc>>, DateTime<Utc>);

#[derive(Default)]
pub struct InMemoryRemoteRevisionSource {
    commits: Vec<ChangeEntry>,
    pub latest_queries: Mutex<Vec<Window>>,
    pub change_queries: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
    delay_ms: AtomicU64,
    is_offline: bool,
    changes_offline: bool,
}

impl InMemoryRemoteRevisionSource {
    pub fn new(commits: Vec<ChangeEntry>) -> Self {
        Self {
            commits,
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Only the change listing fails; revision queries keep working.
    pub fn toggle_changes_offline(&mut self) {
        self.changes_offline = !self.changes_offline;
    }

    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    async fn simulate_latency(&self) {
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

#[async_trait::async_trait]
impl RemoteRevisionSource for InMemoryRemoteRevisionSource {
    async fn latest_revision(
        &self,
        _coordinates: &KbCoordinates,
        window_start: Option<DateTime<Utc>>,
        window_end: DateTime<Utc>,
    ) -> Result<RevisionWatermark, RemoteSourceError> {
        self.latest_queries
            .lock()
            .await
            .push((window_start, window_end));
        self.simulate_latency().await;
        if self.is_offline {
            return Err(RemoteSourceError::Unreachable("Remote server offline".into()));
        }

        Ok(self
            .commits
            .iter()
            .filter(|c| c.date <= window_end && window_start.is_none_or(|start| c.date >= start))
            .max_by_key(|c| c.revision)
            .map(|c| RevisionWatermark::new(c.revision, c.date))
            .unwrap_or(MIN_WATERMARK))
    }

    async fn changes_between(
        &self,
        _coordinates: &KbCoordinates,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ChangeEntry>, RemoteSourceError> {
        self.change_queries.lock().await.push((from, to));
        self.simulate_latency().await;
        if self.is_offline || self.changes_offline {
            return Err(RemoteSourceError::Unreachable("Remote server offline".into()));
        }

        Ok(self
            .commits
            .iter()
            .filter(|c| c.date > from && c.date <= to)
            .cloned()
            .collect())
    }
}
