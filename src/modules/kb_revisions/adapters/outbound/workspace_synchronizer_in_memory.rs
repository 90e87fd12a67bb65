// In memory implementation of the WorkspaceSynchronizer port.
//
// Responsibilities
// - Remember whether the KB has been checked out, flipping to initialized after a checkout.
// - Record every checkout and update with the arguments it received.
// - Fail on demand, or stall for a while so cancellation can be exercised.

use crate::modules::kb_revisions::core::coordinates::{DbOptions, KbCoordinates};
use crate::modules::kb_revisions::core::ports::WorkspaceSynchronizer;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynchronizerCall {
    Checkout {
        kb_directory: PathBuf,
        db_options: DbOptions,
    },
    Update {
        kb_directory: PathBuf,
    },
}

#[derive(Default)]
pub struct InMemoryWorkspaceSynchronizer {
    initialized: AtomicBool,
    pub calls: Mutex<Vec<SynchronizerCall>>,
    delay_ms: AtomicU64,
    is_failing: bool,
}

impl InMemoryWorkspaceSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workspace that already holds a checked out KB.
    pub fn initialized() -> Self {
        let synchronizer = Self::default();
        synchronizer.initialized.store(true, Ordering::SeqCst);
        synchronizer
    }

    pub fn toggle_failing(&mut self) {
        self.is_failing = !self.is_failing;
    }

    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    async fn run(&self, call: SynchronizerCall) -> anyhow::Result<()> {
        self.calls.lock().await.push(call);
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        if self.is_failing {
            anyhow::bail!("synchronizer exited with code 1");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkspaceSynchronizer for InMemoryWorkspaceSynchronizer {
    async fn workspace_already_initialized(&self, _kb_directory: &Path) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn checkout(
        &self,
        kb_directory: &Path,
        _coordinates: &KbCoordinates,
        db_options: &DbOptions,
    ) -> anyhow::Result<()> {
        self.run(SynchronizerCall::Checkout {
            kb_directory: kb_directory.to_path_buf(),
            db_options: db_options.clone(),
        })
        .await?;
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, kb_directory: &Path, _coordinates: &KbCoordinates) -> anyhow::Result<()> {
        self.run(SynchronizerCall::Update {
            kb_directory: kb_directory.to_path_buf(),
        })
        .await
    }
}

#[cfg(test)]
mod in_memory_workspace_synchronizer_tests {
    use super::*;
    use crate::tests::fixtures::coordinates::{coordinates, db_options};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn a_checkout_initializes_the_workspace() {
        let synchronizer = InMemoryWorkspaceSynchronizer::new();
        let kb_directory = Path::new("/ws/Billing");
        assert!(!synchronizer.workspace_already_initialized(kb_directory).await);
        synchronizer
            .checkout(kb_directory, &coordinates(), &db_options())
            .await
            .unwrap();
        assert!(synchronizer.workspace_already_initialized(kb_directory).await);
    }

    #[rstest]
    #[tokio::test]
    async fn a_failed_checkout_leaves_the_workspace_uninitialized() {
        let mut synchronizer = InMemoryWorkspaceSynchronizer::new();
        synchronizer.toggle_failing();
        let kb_directory = Path::new("/ws/Billing");
        let result = synchronizer
            .checkout(kb_directory, &coordinates(), &db_options())
            .await;
        assert!(result.is_err());
        assert!(!synchronizer.workspace_already_initialized(kb_directory).await);
        assert_eq!(synchronizer.calls.lock().await.len(), 1);
    }
}
