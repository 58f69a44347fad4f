//! Task numbering tests for the `PostgreSQL` store.

use diesel::prelude::*;
use rstest::rstest;
use trellis::tracker::services::CreateTaskRequest;

use super::helpers::{PgTestContext, pg};
use crate::test_helpers::contract;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn numbers_tasks_per_project(
    pg: eyre::Result<Option<PgTestContext>>,
) -> eyre::Result<()> {
    let Some(ctx) = pg? else { return Ok(()) };
    contract::numbers_tasks_per_project(&ctx.tracker).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn never_reuses_deleted_numbers(
    pg: eyre::Result<Option<PgTestContext>>,
) -> eyre::Result<()> {
    let Some(ctx) = pg? else { return Ok(()) };
    contract::never_reuses_deleted_numbers(&ctx.tracker).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_get_distinct_numbers(
    pg: eyre::Result<Option<PgTestContext>>,
) -> eyre::Result<()> {
    let Some(ctx) = pg? else { return Ok(()) };
    contract::allocates_distinct_numbers_concurrently(std::sync::Arc::clone(&ctx.tracker), 8)
        .await
}

#[derive(QueryableByName)]
struct HighWaterMark {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    last_task_nr: i32,
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_advances_the_project_high_water_mark(
    pg: eyre::Result<Option<PgTestContext>>,
) -> eyre::Result<()> {
    let Some(ctx) = pg? else { return Ok(()) };
    let project = ctx.tracker.project("Marked").await?;
    for title in ["One", "Two"] {
        ctx.tracker
            .task(project.id(), CreateTaskRequest::new(title))
            .await?;
    }

    let mut connection = ctx.connection()?;
    let mark = diesel::sql_query("SELECT last_task_nr FROM projects WHERE id = $1")
        .bind::<diesel::sql_types::Uuid, _>(project.id().into_inner())
        .get_result::<HighWaterMark>(&mut connection)?;

    eyre::ensure!(
        mark.last_task_nr == 2,
        "expected high-water mark 2, got {}",
        mark.last_task_nr
    );
    Ok(())
}
