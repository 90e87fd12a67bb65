use crate::modules::kb_revisions::adapters::outbound::build_history_directory::DirectoryBuildHistory;
use crate::modules::kb_revisions::adapters::outbound::remote_revision_source_in_memory::InMemoryRemoteRevisionSource;
use crate::modules::kb_revisions::adapters::outbound::watermark_store_file::FileWatermarkStore;
use crate::modules::kb_revisions::adapters::outbound::workspace_synchronizer_in_memory::InMemoryWorkspaceSynchronizer;
use crate::modules::kb_revisions::core::changelog::Changelog;
use crate::modules::kb_revisions::core::ports::WatermarkStore;
use crate::modules::kb_revisions::use_cases::poll_remote_revision::decision::PollingVerdict;
use crate::modules::kb_revisions::use_cases::poll_remote_revision::handler::PollingEngine;
use crate::modules::kb_revisions::use_cases::resolve_baseline::resolver::BaselineResolver;
use crate::modules::kb_revisions::use_cases::synchronize_workspace::handler::SyncOrchestrator;
use crate::modules::kb_revisions::use_cases::synchronize_workspace::sync_result::SyncMode;
use crate::shared::core::clock::FixedClock;
use crate::tests::fixtures::changes::change_entry;
use crate::tests::fixtures::coordinates::{coordinates, db_options};
use crate::tests::fixtures::watermarks::{at, watermark};
use rstest::{fixture, rstest};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use tokio_util::sync::CancellationToken;

struct Job {
    temp: TempDir,
    clock: Arc<FixedClock>,
    history: Arc<DirectoryBuildHistory>,
    store: Arc<FileWatermarkStore>,
    engine: PollingEngine<InMemoryRemoteRevisionSource>,
    resolver: BaselineResolver<FileWatermarkStore, DirectoryBuildHistory>,
    orchestrator: SyncOrchestrator<
        InMemoryRemoteRevisionSource,
        InMemoryWorkspaceSynchronizer,
        FileWatermarkStore,
        DirectoryBuildHistory,
    >,
}

#[fixture]
fn before_each() -> Job {
    let temp = TempDir::new().unwrap();
    let clock = Arc::new(FixedClock::new(at(1_000)));
    let remote = Arc::new(InMemoryRemoteRevisionSource::new(vec![
        change_entry(5, 100),
        change_entry(8, 300),
        change_entry(9, 2_000),
    ]));
    let history = Arc::new(DirectoryBuildHistory::new(temp.path().join("builds")));
    let store = Arc::new(FileWatermarkStore::default());

    Job {
        engine: PollingEngine::new(remote.clone(), coordinates(), clock.clone()),
        resolver: BaselineResolver::new(store.clone(), history.clone()),
        orchestrator: SyncOrchestrator::new(
            remote,
            Arc::new(InMemoryWorkspaceSynchronizer::new()),
            store.clone(),
            history.clone(),
            coordinates(),
            db_options(),
            clock.clone(),
        ),
        temp,
        clock,
        history,
        store,
    }
}

impl Job {
    async fn run_build(&self, number: u64) -> (SyncMode, Changelog) {
        let build = self.history.build(number);
        fs::create_dir_all(build.root_dir()).await.unwrap();
        let changelog_path = build.root_dir().join("changelog.json");

        let result = self
            .orchestrator
            .synchronize(
                &build,
                &self.temp.path().join("workspace"),
                Some(&changelog_path),
                None,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let written = fs::read_to_string(&changelog_path).await.unwrap();
        assert_eq!(written, result.changelog.to_document().unwrap());
        (result.mode, result.changelog)
    }

    async fn poll(&self) -> PollingVerdict {
        self.engine
            .compare_remote_revision_with(&self.resolver, None, &CancellationToken::new())
            .await
            .unwrap()
            .verdict
    }
}

#[rstest]
#[tokio::test]
async fn a_job_polls_builds_and_settles(before_each: Job) {
    let job = before_each;

    assert_eq!(job.poll().await, PollingVerdict::SignificantChange);

    let (mode, changelog) = job.run_build(1).await;
    assert_eq!(mode, SyncMode::Checkout);
    let revisions: Vec<u64> = changelog.entries().iter().map(|e| e.revision).collect();
    assert_eq!(revisions, vec![5, 8]);
    assert_eq!(
        job.store.load(&job.history.build(1)).await.unwrap(),
        watermark(8, 300)
    );

    assert_eq!(job.poll().await, PollingVerdict::NoChange);

    job.clock.set(at(2_500));
    assert_eq!(job.poll().await, PollingVerdict::SignificantChange);

    let (mode, changelog) = job.run_build(2).await;
    assert_eq!(mode, SyncMode::Update);
    let revisions: Vec<u64> = changelog.entries().iter().map(|e| e.revision).collect();
    assert_eq!(revisions, vec![9]);

    assert_eq!(job.poll().await, PollingVerdict::NoChange);
}

#[rstest]
#[tokio::test]
async fn a_build_without_a_record_is_stepped_over(before_each: Job) {
    let job = before_each;
    job.run_build(1).await;
    fs::create_dir_all(job.history.build(2).root_dir())
        .await
        .unwrap();
    job.clock.set(at(2_500));

    let (_, changelog) = job.run_build(3).await;

    let revisions: Vec<u64> = changelog.entries().iter().map(|e| e.revision).collect();
    assert_eq!(revisions, vec![9]);
}
