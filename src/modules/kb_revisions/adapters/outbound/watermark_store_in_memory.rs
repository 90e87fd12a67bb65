// In memory implementation of the WatermarkStore port.
//
// Purpose
// - Exercise baseline resolution and synchronization without touching the filesystem.
//
// Responsibilities
// - Keep the encoded record per build number, so corrupt documents can be planted and
//   decoding goes through the same path as the file store.

use crate::modules::kb_revisions::core::build::BuildRef;
use crate::modules::kb_revisions::core::ports::{WatermarkStore, WatermarkStoreError};
use crate::modules::kb_revisions::core::revision_record;
use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryWatermarkStore {
    documents: RwLock<HashMap<u64, String>>,
    is_offline: bool,
}

impl InMemoryWatermarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Store a raw document for a build, bypassing the encoder.
    pub async fn put_raw(&self, build: &BuildRef, document: impl Into<String>) {
        self.documents
            .write()
            .await
            .insert(build.number(), document.into());
    }

    pub async fn contains(&self, build: &BuildRef) -> bool {
        self.documents.read().await.contains_key(&build.number())
    }
}

#[async_trait::async_trait]
impl WatermarkStore for InMemoryWatermarkStore {
    async fn load(&self, build: &BuildRef) -> Result<RevisionWatermark, WatermarkStoreError> {
        if self.is_offline {
            return Err(WatermarkStoreError::Backend("Watermark store offline".into()));
        }

        let guard = self.documents.read().await;
        let document = guard
            .get(&build.number())
            .ok_or(WatermarkStoreError::NotFound {
                build: build.number(),
            })?;
        revision_record::decode(document).map_err(|e| WatermarkStoreError::Corrupt {
            build: build.number(),
            reason: e.to_string(),
        })
    }

    async fn save(
        &self,
        build: &BuildRef,
        watermark: RevisionWatermark,
    ) -> Result<(), WatermarkStoreError> {
        if self.is_offline {
            return Err(WatermarkStoreError::Backend("Watermark store offline".into()));
        }

        let document = revision_record::encode(watermark)
            .map_err(|e| WatermarkStoreError::Backend(e.to_string()))?;
        self.documents
            .write()
            .await
            .insert(build.number(), document);
        Ok(())
    }
}
