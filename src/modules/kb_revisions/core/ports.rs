// Ports define what the revision core needs from the outside world, without implementing it.
//
// Purpose
// - WatermarkStore: one persisted watermark per build.
// - BuildHistory: the job's builds, walked newest to oldest.
// - RemoteRevisionSource: what the remote server knows about the knowledge base.
// - WorkspaceSynchronizer: the external tool that checks out or updates the local copy.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
// - Wire protocols, credential lookup and tool invocation stay behind these traits.
//
// Testing guidance
// - Every port has an in memory implementation with an offline switch.

use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::changelog::ChangeEntry;
use crate::modules::kb_revisions::core::coordinates::{DbOptions, KbCoordinates};
use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatermarkStoreError {
    #[error("no revision record for build #{build}")]
    NotFound { build: u64 },

    #[error("revision record for build #{build} is corrupt: {reason}")]
    Corrupt { build: u64, reason: String },

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum RemoteSourceError {
    #[error("remote server unreachable: {0}")]
    Unreachable(String),

    #[error("remote query failed: {0}")]
    Query(String),
}

#[async_trait]
pub trait WatermarkStore: Send + Sync {
    async fn load(&self, build: &BuildRef) -> Result<RevisionWatermark, WatermarkStoreError>;
    async fn save(
        &self,
        build: &BuildRef,
        watermark: RevisionWatermark,
    ) -> Result<(), WatermarkStoreError>;
}

#[async_trait]
pub trait BuildHistory: Send + Sync {
    async fn last_build(&self) -> anyhow::Result<Option<BuildRef>>;
    async fn previous_build(&self, build: &BuildRef) -> anyhow::Result<Option<BuildRef>>;
}

#[async_trait]
pub trait RemoteRevisionSource: Send + Sync {
    /// Latest revision visible in the window. `window_start` of `None` means "from the beginning".
    async fn latest_revision(
        &self,
        coordinates: &KbCoordinates,
        window_start: Option<DateTime<Utc>>,
        window_end: DateTime<Utc>,
    ) -> Result<RevisionWatermark, RemoteSourceError>;

    /// Changes committed in `(from, to]`.
    async fn changes_between(
        &self,
        coordinates: &KbCoordinates,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ChangeEntry>, RemoteSourceError>;
}

#[async_trait]
pub trait WorkspaceSynchronizer: Send + Sync {
    async fn workspace_already_initialized(&self, kb_directory: &Path) -> bool;
    async fn checkout(
        &self,
        kb_directory: &Path,
        coordinates: &KbCoordinates,
        db_options: &DbOptions,
    ) -> anyhow::Result<()>;
    async fn update(&self, kb_directory: &Path, coordinates: &KbCoordinates) -> anyhow::Result<()>;
}
