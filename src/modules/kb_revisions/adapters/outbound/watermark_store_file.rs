// File-backed implementation of the WatermarkStore port.
//
// Layout
// - {build.root_dir}/revision.json, next to the build's other metadata.
//
// Responsibilities
// - Write to a temporary sibling first and rename it into place, so a reader never observes a
//   half-written record.
// - A missing file is NotFound, an undecodable one is Corrupt, any other I/O failure is Backend.

use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::ports::{WatermarkStore, WatermarkStoreError};
use crate::modules::kb_revisions::core::revision_record;
use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

pub const DEFAULT_REVISION_FILE_NAME: &str = "revision.json";

pub struct FileWatermarkStore {
    file_name: String,
}

impl Default for FileWatermarkStore {
    fn default() -> Self {
        Self::new(DEFAULT_REVISION_FILE_NAME)
    }
}

impl FileWatermarkStore {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Path of the record for a given build.
    pub fn record_path(&self, build: &BuildRef) -> PathBuf {
        build.root_dir().join(&self.file_name)
    }
}

#[async_trait]
impl WatermarkStore for FileWatermarkStore {
    async fn load(&self, build: &BuildRef) -> Result<RevisionWatermark, WatermarkStoreError> {
        let path = self.record_path(build);
        let document = match fs::read_to_string(&path).await {
            Ok(document) => document,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WatermarkStoreError::NotFound {
                    build: build.number(),
                });
            }
            Err(e) => {
                return Err(WatermarkStoreError::Backend(format!(
                    "{}: {e}",
                    path.display()
                )));
            }
        };

        revision_record::decode(&document).map_err(|e| WatermarkStoreError::Corrupt {
            build: build.number(),
            reason: e.to_string(),
        })
    }

    async fn save(
        &self,
        build: &BuildRef,
        watermark: RevisionWatermark,
    ) -> Result<(), WatermarkStoreError> {
        let path = self.record_path(build);
        let backend = |e: std::io::Error| WatermarkStoreError::Backend(format!("{}: {e}", path.display()));

        let document = revision_record::encode(watermark)
            .map_err(|e| WatermarkStoreError::Backend(e.to_string()))?;

        fs::create_dir_all(build.root_dir()).await.map_err(backend)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, document).await.map_err(backend)?;
        fs::rename(&temp_path, &path).await.map_err(backend)?;

        debug!(
            build = build.number(),
            revision = watermark.revision(),
            path = %path.display(),
            "Stored revision record"
        );
        Ok(())
    }
}
