//! Ownership and naming tests for the in-memory store.

use rstest::rstest;

use super::helpers::{MemoryTracker, tracker};
use crate::test_helpers::contract;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn denies_strangers(tracker: MemoryTracker) -> eyre::Result<()> {
    contract::denies_strangers(&tracker).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn scopes_name_uniqueness(tracker: MemoryTracker) -> eyre::Result<()> {
    contract::scopes_name_uniqueness(&tracker).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_only_see_their_projects(tracker: MemoryTracker) -> eyre::Result<()> {
    let mine = tracker.project("Mine").await?;
    tracker
        .projects
        .create_project(tracker.stranger, "Theirs")
        .await?;

    let listed = tracker.projects.list_projects(tracker.owner).await?;

    eyre::ensure!(
        listed.iter().map(|project| project.id()).eq([mine.id()]),
        "unexpected projects {listed:?}"
    );
    Ok(())
}
