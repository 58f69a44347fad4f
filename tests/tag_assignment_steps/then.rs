//! Then steps for tag assignment BDD scenarios.

use super::world::{TagAssignmentWorld, split_names};
use rstest_bdd_macros::then;
use trellis::tracker::{domain::ValidationError, services::TrackerServiceError};

fn tag_names(world: &TagAssignmentWorld) -> eyre::Result<Vec<String>> {
    Ok(world
        .reload_task()?
        .tags()
        .iter()
        .map(|tag| tag.name().as_str().to_owned())
        .collect())
}

#[then("the update succeeds")]
fn update_succeeds(world: &TagAssignmentWorld) -> Result<(), eyre::Report> {
    match world.last_update.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected the update to succeed, got {err}")),
        None => Err(eyre::eyre!("missing update result")),
    }
}

#[then(r#"the task has tags "{tags}""#)]
fn task_has_tags(world: &TagAssignmentWorld, tags: String) -> Result<(), eyre::Report> {
    let actual = tag_names(world)?;
    let expected: Vec<&str> = split_names(&tags).collect();
    if actual != expected {
        return Err(eyre::eyre!("expected tags {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the task has no tags")]
fn task_has_no_tags(world: &TagAssignmentWorld) -> Result<(), eyre::Report> {
    let actual = tag_names(world)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected no tags, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the task is titled "{title}""#)]
fn task_is_titled(world: &TagAssignmentWorld, title: String) -> Result<(), eyre::Report> {
    let reloaded = world.reload_task()?;
    if reloaded.task().title().as_str() != title {
        return Err(eyre::eyre!(
            "expected title {title:?}, found {:?}",
            reloaded.task().title().as_str()
        ));
    }
    Ok(())
}

#[then("the update is rejected for a foreign tag")]
fn update_rejected_for_foreign_tag(world: &TagAssignmentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    if !matches!(
        result,
        Err(TrackerServiceError::Validation(
            ValidationError::TagNotInProject(_)
        ))
    ) {
        return Err(eyre::eyre!("expected TagNotInProject error, got {result:?}"));
    }
    Ok(())
}

#[then("the update is denied")]
fn update_denied(world: &TagAssignmentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    if !matches!(result, Err(TrackerServiceError::AccessDenied(_))) {
        return Err(eyre::eyre!("expected access denied, got {result:?}"));
    }
    Ok(())
}
