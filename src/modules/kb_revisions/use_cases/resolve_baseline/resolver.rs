// Finds the watermark a poll or a changelog should treat as "previously known".
//
// Responsibilities
// - Prefer a watermark the caller already knows for the starting build.
// - Otherwise walk the history one build at a time, newest first, and take the first
//   record that loads. Builds without a usable record are stepped over.
// - Fall back to MIN_WATERMARK when history runs out.
//
// Boundaries
// - Never fails. Missing records, corrupt records and an unavailable history all mean
//   "no information" and are logged, not propagated.

use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::ports::{BuildHistory, WatermarkStore, WatermarkStoreError};
use crate::modules::kb_revisions::core::watermark::{MIN_WATERMARK, RevisionWatermark};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct BaselineResolver<TStore, THistory>
where
    TStore: WatermarkStore + 'static,
    THistory: BuildHistory + 'static,
{
    store: Arc<TStore>,
    history: Arc<THistory>,
}

impl<TStore, THistory> BaselineResolver<TStore, THistory>
where
    TStore: WatermarkStore + 'static,
    THistory: BuildHistory + 'static,
{
    pub fn new(store: Arc<TStore>, history: Arc<THistory>) -> Self {
        Self { store, history }
    }

    /// Find-closest resolution starting at `start`, inclusive.
    pub async fn resolve(
        &self,
        start: Option<BuildRef>,
        known: Option<RevisionWatermark>,
    ) -> RevisionWatermark {
        if let Some(watermark) = known {
            debug!(revision = watermark.revision(), "Using known baseline");
            return watermark;
        }

        let mut cursor = start;
        while let Some(build) = cursor {
            match self.store.load(&build).await {
                Ok(watermark) => {
                    debug!(
                        build = build.number(),
                        revision = watermark.revision(),
                        "Resolved baseline"
                    );
                    return watermark;
                }
                Err(WatermarkStoreError::NotFound { .. }) => {
                    debug!(build = build.number(), "No revision record, stepping back");
                }
                Err(e) => {
                    warn!(build = build.number(), error = %e, "Skipping unusable revision record");
                }
            }

            cursor = match self.history.previous_build(&build).await {
                Ok(previous) => previous,
                Err(e) => {
                    warn!(build = build.number(), error = %e, "Build history unavailable, stopping walk");
                    None
                }
            };
        }

        debug!("No baseline in history, using the minimum watermark");
        MIN_WATERMARK
    }

    /// Baseline for polling: the closest record at or before the job's last build.
    pub async fn polling_baseline(&self, known: Option<RevisionWatermark>) -> RevisionWatermark {
        if known.is_some() {
            return self.resolve(None, known).await;
        }

        let last = self.history.last_build().await.unwrap_or_else(|e| {
            warn!(error = %e, "Build history unavailable");
            None
        });
        self.resolve(last, None).await
    }

    /// Baseline for the changelog of `build`: the closest record strictly before it.
    pub async fn changelog_baseline(
        &self,
        build: &BuildRef,
        known: Option<RevisionWatermark>,
    ) -> RevisionWatermark {
        if known.is_some() {
            return self.resolve(None, known).await;
        }

        let previous = self.history.previous_build(build).await.unwrap_or_else(|e| {
            warn!(build = build.number(), error = %e, "Build history unavailable");
            None
        });
        self.resolve(previous, None).await
    }
}
