// Lists the remote changes a build picked up.
//
// Responsibilities
// - Enumerate changes in (baseline date, current date] when current is strictly later.
// - Always return a usable changelog. An empty window, an empty listing and a failed listing
//   all produce the empty changelog.

use crate::modules::kb_revisions::core::changelog::Changelog;
use crate::modules::kb_revisions::core::coordinates::KbCoordinates;
use crate::modules::kb_revisions::core::ports::RemoteRevisionSource;
use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ChangelogGenerator<TRemote>
where
    TRemote: RemoteRevisionSource + 'static,
{
    remote: Arc<TRemote>,
    coordinates: KbCoordinates,
}

impl<TRemote> ChangelogGenerator<TRemote>
where
    TRemote: RemoteRevisionSource + 'static,
{
    pub fn new(remote: Arc<TRemote>, coordinates: KbCoordinates) -> Self {
        Self {
            remote,
            coordinates,
        }
    }

    pub async fn generate(
        &self,
        baseline: &RevisionWatermark,
        current: &RevisionWatermark,
    ) -> Changelog {
        if current.revision_date() <= baseline.revision_date() {
            debug!(
                baseline = baseline.revision(),
                current = current.revision(),
                "Nothing newer than the baseline"
            );
            return Changelog::empty();
        }

        match self
            .remote
            .changes_between(
                &self.coordinates,
                baseline.revision_date(),
                current.revision_date(),
            )
            .await
        {
            Ok(entries) if entries.is_empty() => {
                debug!(
                    baseline = baseline.revision(),
                    current = current.revision(),
                    "Remote reported no changes"
                );
                Changelog::empty()
            }
            Ok(entries) => Changelog::from_entries(entries),
            Err(e) => {
                warn!(
                    baseline = baseline.revision(),
                    current = current.revision(),
                    error = %e,
                    "Could not list changes, writing an empty changelog"
                );
                Changelog::empty()
            }
        }
    }
}
