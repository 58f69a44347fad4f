//! Tag assignment tests for the `PostgreSQL` store.

use rstest::rstest;

use super::helpers::{PgTestContext, pg};
use crate::test_helpers::contract;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replaces_tag_sets(pg: eyre::Result<Option<PgTestContext>>) -> eyre::Result<()> {
    let Some(ctx) = pg? else { return Ok(()) };
    contract::replaces_tag_sets(&ctx.tracker).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejects_foreign_tags(pg: eyre::Result<Option<PgTestContext>>) -> eyre::Result<()> {
    let Some(ctx) = pg? else { return Ok(()) };
    contract::rejects_foreign_tags(&ctx.tracker).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_updates_keep_stored_tags_and_status(
    pg: eyre::Result<Option<PgTestContext>>,
) -> eyre::Result<()> {
    let Some(ctx) = pg? else { return Ok(()) };
    contract::partial_updates_keep_stored_tags_and_status(&ctx.tracker).await
}
