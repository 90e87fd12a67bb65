// Brings the build's workspace up to date and records which remote revision it now holds.
//
// Responsibilities
// - Pick checkout or update from the state of the KB working directory.
// - Run the synchronizer, then ask the remote which revision was current when the sync started.
// - Persist that watermark for the build, then derive and write the changelog.
//
// Boundaries
// - Any synchronizer, remote or persistence failure aborts the call. The watermark is saved only
//   after both the sync and the remote query succeeded.
// - The revision is read as of the sync start, not as of what the synchronizer actually fetched.
//   A commit landing mid-sync is attributed to the next build.
// - Cancellation abandons the collaborator call in flight. Before the save nothing is persisted.

use crate::modules::kb_revisions::adapters::outbound::changelog_file::write_changelog;
use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::coordinates::{DbOptions, KbCoordinates};
use crate::modules::kb_revisions::core::ports::{
    BuildHistory, RemoteRevisionSource, RemoteSourceError, WatermarkStore, WatermarkStoreError,
    WorkspaceSynchronizer,
};
use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use crate::modules::kb_revisions::use_cases::generate_changelog::generator::ChangelogGenerator;
use crate::modules::kb_revisions::use_cases::resolve_baseline::resolver::BaselineResolver;
use crate::modules::kb_revisions::use_cases::synchronize_workspace::sync_result::{
    SyncMode, SyncResult,
};
use crate::shared::core::cancellation::{Cancelled, cancellable};
use crate::shared::core::clock::Clock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{mode} failed: {source}")]
    Synchronization {
        mode: SyncMode,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    RemoteQuery(#[from] RemoteSourceError),

    #[error("could not persist the revision record: {0}")]
    Persist(#[from] WatermarkStoreError),

    #[error("could not write the changelog to {}: {source}", path.display())]
    ChangelogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

pub struct SyncOrchestrator<TRemote, TSync, TStore, THistory>
where
    TRemote: RemoteRevisionSource + 'static,
    TSync: WorkspaceSynchronizer + 'static,
    TStore: WatermarkStore + 'static,
    THistory: BuildHistory + 'static,
{
    remote: Arc<TRemote>,
    synchronizer: Arc<TSync>,
    store: Arc<TStore>,
    resolver: BaselineResolver<TStore, THistory>,
    changelog: ChangelogGenerator<TRemote>,
    coordinates: KbCoordinates,
    db_options: DbOptions,
    clock: Arc<dyn Clock>,
}

impl<TRemote, TSync, TStore, THistory> SyncOrchestrator<TRemote, TSync, TStore, THistory>
where
    TRemote: RemoteRevisionSource + 'static,
    TSync: WorkspaceSynchronizer + 'static,
    TStore: WatermarkStore + 'static,
    THistory: BuildHistory + 'static,
{
    pub fn new(
        remote: Arc<TRemote>,
        synchronizer: Arc<TSync>,
        store: Arc<TStore>,
        history: Arc<THistory>,
        coordinates: KbCoordinates,
        db_options: DbOptions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resolver: BaselineResolver::new(store.clone(), history),
            changelog: ChangelogGenerator::new(remote.clone(), coordinates.clone()),
            remote,
            synchronizer,
            store,
            coordinates,
            db_options,
            clock,
        }
    }

    pub async fn synchronize(
        &self,
        build: &BuildRef,
        workspace: &Path,
        changelog_path: Option<&Path>,
        known_baseline: Option<RevisionWatermark>,
        cancel: &CancellationToken,
    ) -> Result<SyncResult, SyncError> {
        let kb_directory = self.coordinates.working_directory(workspace);
        let mode = if self
            .synchronizer
            .workspace_already_initialized(&kb_directory)
            .await
        {
            SyncMode::Update
        } else {
            SyncMode::Checkout
        };
        info!(
            build = build.number(),
            kb = %self.coordinates.kb_name,
            %mode,
            directory = %kb_directory.display(),
            "Synchronizing workspace"
        );

        let sync_start = self.clock.now();
        let outcome = match mode {
            SyncMode::Checkout => {
                let db_options = self.db_options.with_resolved_name(&self.coordinates.kb_name);
                cancellable(
                    cancel,
                    self.synchronizer
                        .checkout(&kb_directory, &self.coordinates, &db_options),
                )
                .await?
            }
            SyncMode::Update => {
                cancellable(
                    cancel,
                    self.synchronizer.update(&kb_directory, &self.coordinates),
                )
                .await?
            }
        };
        outcome.map_err(|source| SyncError::Synchronization { mode, source })?;

        let current = cancellable(
            cancel,
            self.remote
                .latest_revision(&self.coordinates, None, sync_start),
        )
        .await??;

        self.store.save(build, current).await?;
        info!(
            build = build.number(),
            revision = current.revision(),
            revision_date = %current.revision_date(),
            "Recorded workspace revision"
        );

        let baseline = self.resolver.changelog_baseline(build, known_baseline).await;
        let changelog = cancellable(cancel, self.changelog.generate(&baseline, &current)).await?;

        if let Some(path) = changelog_path {
            write_changelog(path, &changelog)
                .await
                .map_err(|source| SyncError::ChangelogWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        Ok(SyncResult {
            mode,
            current_watermark: current,
            changelog,
        })
    }
}
