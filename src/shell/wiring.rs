// Wires the file-backed adapters and the system clock into the use cases.
//
// The remote source and the synchronizer are supplied by the host: they wrap the vendor tooling.

use crate::modules::kb_revisions::adapters::outbound::build_history_directory::DirectoryBuildHistory;
use crate::modules::kb_revisions::adapters::outbound::watermark_store_file::FileWatermarkStore;
use crate::modules::kb_revisions::adapters::outbound::workspace_marker::MarkerFileProbe;
use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::ports::{RemoteRevisionSource, WorkspaceSynchronizer};
use crate::modules::kb_revisions::use_cases::poll_remote_revision::handler::PollingEngine;
use crate::modules::kb_revisions::use_cases::resolve_baseline::resolver::BaselineResolver;
use crate::modules::kb_revisions::use_cases::synchronize_workspace::handler::SyncOrchestrator;
use crate::shared::core::clock::SystemClock;
use crate::shell::config::KbSyncConfig;
use std::path::PathBuf;
use std::sync::Arc;

pub type FileBaselineResolver = BaselineResolver<FileWatermarkStore, DirectoryBuildHistory>;

pub type FileSyncOrchestrator<TRemote, TSync> =
    SyncOrchestrator<TRemote, TSync, FileWatermarkStore, DirectoryBuildHistory>;

impl KbSyncConfig {
    pub fn watermark_store(&self) -> FileWatermarkStore {
        FileWatermarkStore::new(&self.revision_file_name)
    }

    pub fn build_history(&self) -> DirectoryBuildHistory {
        DirectoryBuildHistory::new(&self.builds_dir)
    }

    pub fn marker_probe(&self) -> MarkerFileProbe {
        MarkerFileProbe::new(&self.marker_extension)
    }

    /// Where the changelog for `build` is written.
    pub fn changelog_path(&self, build: &BuildRef) -> PathBuf {
        build.root_dir().join(&self.changelog_file_name)
    }
}

pub fn baseline_resolver(config: &KbSyncConfig) -> FileBaselineResolver {
    BaselineResolver::new(
        Arc::new(config.watermark_store()),
        Arc::new(config.build_history()),
    )
}

pub fn polling_engine<TRemote>(config: &KbSyncConfig, remote: Arc<TRemote>) -> PollingEngine<TRemote>
where
    TRemote: RemoteRevisionSource + 'static,
{
    PollingEngine::new(remote, config.coordinates(), Arc::new(SystemClock))
}

pub fn sync_orchestrator<TRemote, TSync>(
    config: &KbSyncConfig,
    remote: Arc<TRemote>,
    synchronizer: Arc<TSync>,
) -> FileSyncOrchestrator<TRemote, TSync>
where
    TRemote: RemoteRevisionSource + 'static,
    TSync: WorkspaceSynchronizer + 'static,
{
    SyncOrchestrator::new(
        remote,
        synchronizer,
        Arc::new(config.watermark_store()),
        Arc::new(config.build_history()),
        config.coordinates(),
        config.db_options(),
        Arc::new(SystemClock),
    )
}
