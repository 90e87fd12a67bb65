// Polling asks the remote server whether there is new work, nothing more.
//
// Responsibilities
// - Query the latest remote revision in a time window and compare it with a baseline.
// - Optionally resolve that baseline from build history first.
//
// Boundaries
// - No workspace and no writes: polling can run on a scheduler as often as it likes.
// - Remote failures and cancellation are returned to the caller, who skips triggering.

use crate::modules::kb_revisions::core::coordinates::KbCoordinates;
use crate::modules::kb_revisions::core::ports::{
    BuildHistory, RemoteRevisionSource, RemoteSourceError, WatermarkStore,
};
use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use crate::modules::kb_revisions::use_cases::poll_remote_revision::decision::PollingDecision;
use crate::modules::kb_revisions::use_cases::resolve_baseline::resolver::BaselineResolver;
use crate::shared::core::cancellation::{Cancelled, cancellable};
use crate::shared::core::clock::Clock;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    RemoteQuery(#[from] RemoteSourceError),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

pub struct PollingEngine<TRemote>
where
    TRemote: RemoteRevisionSource + 'static,
{
    remote: Arc<TRemote>,
    coordinates: KbCoordinates,
    clock: Arc<dyn Clock>,
}

impl<TRemote> PollingEngine<TRemote>
where
    TRemote: RemoteRevisionSource + 'static,
{
    pub fn new(remote: Arc<TRemote>, coordinates: KbCoordinates, clock: Arc<dyn Clock>) -> Self {
        Self {
            remote,
            coordinates,
            clock,
        }
    }

    pub fn requires_workspace(&self) -> bool {
        false
    }

    pub async fn poll(
        &self,
        baseline: RevisionWatermark,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<PollingDecision, PollError> {
        let current = cancellable(
            cancel,
            self.remote
                .latest_revision(&self.coordinates, Some(window_start), window_end),
        )
        .await??;

        let decision = PollingDecision::decide(baseline, current);
        info!(
            kb = %self.coordinates.kb_name,
            baseline = baseline.revision(),
            current = current.revision(),
            verdict = ?decision.verdict,
            "Polled remote revision"
        );
        Ok(decision)
    }

    /// Resolves the baseline from history (unless `known`) and polls from its date until now.
    pub async fn compare_remote_revision_with<TStore, THistory>(
        &self,
        resolver: &BaselineResolver<TStore, THistory>,
        known: Option<RevisionWatermark>,
        cancel: &CancellationToken,
    ) -> Result<PollingDecision, PollError>
    where
        TStore: WatermarkStore + 'static,
        THistory: BuildHistory + 'static,
    {
        let baseline = resolver.polling_baseline(known).await;
        self.poll(baseline, baseline.revision_date(), self.clock.now(), cancel)
            .await
    }
}
