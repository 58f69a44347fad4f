//! Task numbering tests for the in-memory store.

use std::sync::Arc;

use rstest::rstest;
use trellis::tracker::{
    domain::{NewTask, TaskDescription, TaskNumber, TaskTitle},
    ports::{ProjectRepository, TaskRepository},
};

use super::helpers::{MemoryTracker, shared_tracker, tracker};
use crate::test_helpers::contract;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn numbers_tasks_per_project(tracker: MemoryTracker) -> eyre::Result<()> {
    contract::numbers_tasks_per_project(&tracker).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn never_reuses_deleted_numbers(tracker: MemoryTracker) -> eyre::Result<()> {
    contract::never_reuses_deleted_numbers(&tracker).await
}

#[rstest]
#[case(2)]
#[case(16)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_get_distinct_numbers(
    shared_tracker: Arc<MemoryTracker>,
    #[case] count: u32,
) -> eyre::Result<()> {
    contract::allocates_distinct_numbers_concurrently(shared_tracker, count).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_every_task_keeps_the_high_water_mark(
    tracker: MemoryTracker,
) -> eyre::Result<()> {
    let project = tracker.project("Emptied").await?;
    for title in ["One", "Two"] {
        let created = tracker
            .task(project.id(), trellis::tracker::services::CreateTaskRequest::new(title))
            .await?;
        tracker
            .tasks
            .delete_task(tracker.owner, created.task().id())
            .await?;
    }

    let draft = NewTask::new(
        project.id(),
        TaskTitle::new("Direct")?,
        TaskDescription::new("")?,
        &mockable::DefaultClock,
    );
    let stored = TaskRepository::create(&*tracker.store, &draft).await?;

    eyre::ensure!(
        stored.task().number() == TaskNumber::new(3)?,
        "expected #3, got {}",
        stored.task().number()
    );
    eyre::ensure!(
        ProjectRepository::find_by_id(&*tracker.store, project.id())
            .await?
            .is_some(),
        "project should remain"
    );
    Ok(())
}
