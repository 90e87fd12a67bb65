use crate::modules::kb_revisions::core::changelog::Changelog;
use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Checkout,
    Update,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Checkout => f.write_str("checkout"),
            SyncMode::Update => f.write_str("update"),
        }
    }
}

/// What a successful synchronization leaves behind for the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub mode: SyncMode,
    pub current_watermark: RevisionWatermark,
    pub changelog: Changelog,
}
