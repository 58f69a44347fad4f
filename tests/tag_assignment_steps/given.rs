//! Given steps for tag assignment BDD scenarios.

use super::world::{TagAssignmentWorld, run_async, split_names};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use trellis::tracker::{domain::Project, services::CreateTaskRequest};

fn create_project_with_tags(
    world: &mut TagAssignmentWorld,
    name: &str,
    tags: &str,
) -> Result<Project, eyre::Report> {
    let project = run_async(world.tracker.project(name)).wrap_err("create scenario project")?;
    for tag_name in split_names(tags) {
        let tag = run_async(world.tracker.tag(project.id(), tag_name))
            .wrap_err_with(|| format!("create tag {tag_name:?}"))?;
        world.tags_by_name.insert(tag_name.to_owned(), tag.id());
    }
    Ok(project)
}

#[given(r#"a project "{name}" with tags "{tags}""#)]
fn project_with_tags(
    world: &mut TagAssignmentWorld,
    name: String,
    tags: String,
) -> Result<(), eyre::Report> {
    let project = create_project_with_tags(world, &name, &tags)?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"another project "{name}" with tags "{tags}""#)]
fn another_project_with_tags(
    world: &mut TagAssignmentWorld,
    name: String,
    tags: String,
) -> Result<(), eyre::Report> {
    create_project_with_tags(world, &name, &tags)?;
    Ok(())
}

#[given(r#"a task "{title}" tagged "{tags}""#)]
fn task_tagged(
    world: &mut TagAssignmentWorld,
    title: String,
    tags: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let request = CreateTaskRequest::new(title).with_tags(world.tag_ids(&tags)?);
    let created =
        run_async(world.tracker.task(project_id, request)).wrap_err("create scenario task")?;
    world.task = Some(created);
    Ok(())
}
