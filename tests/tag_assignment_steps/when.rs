//! When steps for tag assignment BDD scenarios.

use super::world::{TagAssignmentWorld, run_async};
use rstest_bdd_macros::when;
use trellis::tracker::{domain::TagId, policy::Actor, services::UpdateTaskRequest};

fn update(
    world: &mut TagAssignmentWorld,
    actor: Actor,
    request: UpdateTaskRequest,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.task().id();
    let result = run_async(world.tracker.tasks.update_task(actor, task_id, request));
    world.last_update = Some(result);
    Ok(())
}

fn same_text(world: &TagAssignmentWorld) -> eyre::Result<UpdateTaskRequest> {
    let task = world.task()?.task();
    Ok(UpdateTaskRequest::new(
        task.title().as_str(),
        task.description().as_str(),
    ))
}

#[when(r#"the owner updates the task with tags "{tags}""#)]
fn owner_updates_tags(world: &mut TagAssignmentWorld, tags: String) -> Result<(), eyre::Report> {
    let request = same_text(world)?.with_tags(world.tag_ids(&tags)?);
    let owner = world.tracker.owner;
    update(world, owner, request)
}

#[when("the owner updates the task with no tags")]
fn owner_clears_tags(world: &mut TagAssignmentWorld) -> Result<(), eyre::Report> {
    let request = same_text(world)?.with_tags(Vec::<TagId>::new());
    let owner = world.tracker.owner;
    update(world, owner, request)
}

#[when(r#"the owner retitles the task to "{title}""#)]
fn owner_retitles(world: &mut TagAssignmentWorld, title: String) -> Result<(), eyre::Report> {
    let description = world.task()?.task().description().as_str().to_owned();
    let owner = world.tracker.owner;
    update(world, owner, UpdateTaskRequest::new(title, description))
}

#[when(r#"a stranger updates the task with tags "{tags}""#)]
fn stranger_updates_tags(world: &mut TagAssignmentWorld, tags: String) -> Result<(), eyre::Report> {
    let request = same_text(world)?.with_tags(world.tag_ids(&tags)?);
    let stranger = world.tracker.stranger;
    update(world, stranger, request)
}
