//! Store-independent behaviour checks.
//!
//! Each check builds its own project through a [`Tracker`] and fails with a
//! descriptive report, so the in-memory and `PostgreSQL` suites can share
//! them unchanged.

use std::collections::BTreeSet;
use std::sync::Arc;

use eyre::{WrapErr, ensure, eyre};
use mockable::{Clock, DefaultClock};
use trellis::tracker::{
    domain::{Status, StatusId, TagId, TaskDescription, TaskRevision, TaskTitle, ValidationError},
    ports::{ProjectRepository, TagRepository, TaskRepository},
    services::{CreateTaskRequest, ListTasksRequest, TrackerServiceError, UpdateTaskRequest},
};

use super::Tracker;

/// Bound shared by every check.
pub trait TrackerStore: ProjectRepository + TaskRepository + TagRepository + 'static {}

impl<S> TrackerStore for S where S: ProjectRepository + TaskRepository + TagRepository + 'static {}

fn tag_names(details: &trellis::tracker::domain::TaskDetails) -> Vec<String> {
    details
        .tags()
        .iter()
        .map(|tag| tag.name().as_str().to_owned())
        .collect()
}

/// Tasks in a fresh project are numbered 1, 2, 3 and numbering is per project.
pub async fn numbers_tasks_per_project<S: TrackerStore>(tracker: &Tracker<S>) -> eyre::Result<()> {
    let first = tracker.project("Numbering A").await?;
    let second = tracker.project("Numbering B").await?;

    let mut numbers = Vec::new();
    for title in ["One", "Two", "Three"] {
        let created = tracker.task(first.id(), CreateTaskRequest::new(title)).await?;
        numbers.push(created.task().number().value());
    }
    let elsewhere = tracker
        .task(second.id(), CreateTaskRequest::new("Other"))
        .await?;

    ensure!(numbers == [1, 2, 3], "expected [1, 2, 3], got {numbers:?}");
    ensure!(
        elsewhere.task().number().value() == 1,
        "second project should start at 1, got {}",
        elsewhere.task().number()
    );
    Ok(())
}

/// Deleting the newest task never frees its number.
pub async fn never_reuses_deleted_numbers<S: TrackerStore>(
    tracker: &Tracker<S>,
) -> eyre::Result<()> {
    let project = tracker.project("Reuse").await?;
    tracker.task(project.id(), CreateTaskRequest::new("Kept")).await?;
    let doomed = tracker
        .task(project.id(), CreateTaskRequest::new("Doomed"))
        .await?;
    tracker
        .tasks
        .delete_task(tracker.owner, doomed.task().id())
        .await
        .wrap_err("delete newest task")?;

    let next = tracker
        .task(project.id(), CreateTaskRequest::new("Next"))
        .await?;

    ensure!(
        next.task().number().value() == 3,
        "expected #3 after deleting #2, got {}",
        next.task().number()
    );
    Ok(())
}

/// Concurrent creations in one project all succeed with distinct numbers.
pub async fn allocates_distinct_numbers_concurrently<S: TrackerStore>(
    tracker: Arc<Tracker<S>>,
    count: u32,
) -> eyre::Result<()> {
    let project = tracker.project("Contended").await?;

    let mut handles = Vec::new();
    for index in 0..count {
        let shared = Arc::clone(&tracker);
        let project_id = project.id();
        handles.push(tokio::spawn(async move {
            shared
                .task(project_id, CreateTaskRequest::new(format!("Task {index}")))
                .await
        }));
    }

    let mut numbers = BTreeSet::new();
    for handle in handles {
        let created = handle.await.wrap_err("join creation task")??;
        numbers.insert(created.task().number().value());
    }

    let expected: BTreeSet<u32> = (1..=count).collect();
    ensure!(numbers == expected, "expected {expected:?}, got {numbers:?}");
    Ok(())
}

/// Updating with a tag list makes it the task's exact tag set.
pub async fn replaces_tag_sets<S: TrackerStore>(tracker: &Tracker<S>) -> eyre::Result<()> {
    let project = tracker.project("Labels").await?;
    let alpha = tracker.tag(project.id(), "alpha").await?;
    let beta = tracker.tag(project.id(), "beta").await?;
    let gamma = tracker.tag(project.id(), "gamma").await?;
    let created = tracker
        .task(
            project.id(),
            CreateTaskRequest::new("Tagged").with_tags([alpha.id(), beta.id()]),
        )
        .await?;
    ensure!(
        tag_names(&created) == ["alpha", "beta"],
        "unexpected initial tags {:?}",
        tag_names(&created)
    );

    let replaced = tracker
        .tasks
        .update_task(
            tracker.owner,
            created.task().id(),
            UpdateTaskRequest::new("Tagged", "").with_tags([beta.id(), gamma.id()]),
        )
        .await
        .wrap_err("replace tags")?;
    ensure!(
        tag_names(&replaced) == ["beta", "gamma"],
        "unexpected replaced tags {:?}",
        tag_names(&replaced)
    );

    let cleared = tracker
        .tasks
        .update_task(
            tracker.owner,
            created.task().id(),
            UpdateTaskRequest::new("Tagged", "").with_tags(Vec::<TagId>::new()),
        )
        .await
        .wrap_err("clear tags")?;
    ensure!(cleared.tags().is_empty(), "tags should be cleared");
    Ok(())
}

/// A tag from another project rejects the whole update.
pub async fn rejects_foreign_tags<S: TrackerStore>(tracker: &Tracker<S>) -> eyre::Result<()> {
    let home = tracker.project("Home").await?;
    let away = tracker.project("Away").await?;
    let local = tracker.tag(home.id(), "local").await?;
    let foreign = tracker.tag(away.id(), "foreign").await?;
    let created = tracker
        .task(
            home.id(),
            CreateTaskRequest::new("Original").with_tags([local.id()]),
        )
        .await?;

    let rejected_create = tracker
        .tasks
        .create_task(
            tracker.owner,
            home.id(),
            CreateTaskRequest::new("Smuggled").with_tags([foreign.id()]),
        )
        .await;
    let rejected_update = tracker
        .tasks
        .update_task(
            tracker.owner,
            created.task().id(),
            UpdateTaskRequest::new("Changed", "changed").with_tags([foreign.id()]),
        )
        .await;

    for result in [rejected_create.map(|_| ()), rejected_update.map(|_| ())] {
        ensure!(
            matches!(
                result,
                Err(TrackerServiceError::Validation(ValidationError::TagNotInProject(tag_id)))
                    if tag_id == foreign.id()
            ),
            "expected TagNotInProject, got {result:?}"
        );
    }

    let listed = tracker
        .tasks
        .list_tasks(tracker.owner, home.id(), &ListTasksRequest::new())
        .await?;
    let [only] = listed.as_slice() else {
        return Err(eyre!("expected one task, got {}", listed.len()));
    };
    ensure!(only.task().title().as_str() == "Original", "title changed");
    ensure!(tag_names(only) == ["local"], "tags changed");
    Ok(())
}

/// A revision without a status or tag set keeps what the store holds at
/// write time, even after other writers changed or deleted those tags.
pub async fn partial_updates_keep_stored_tags_and_status<S: TrackerStore>(
    tracker: &Tracker<S>,
) -> eyre::Result<()> {
    let project = tracker.project("Partial").await?;
    let first = tracker.tag(project.id(), "first").await?;
    let second = tracker.tag(project.id(), "second").await?;
    let created = tracker
        .task(project.id(), CreateTaskRequest::new("Shared").with_tags([first.id()]))
        .await?;
    let task_id = created.task().id();

    tracker
        .tasks
        .update_task(
            tracker.owner,
            task_id,
            UpdateTaskRequest::new("Shared", "")
                .with_status(Status::Done.id())
                .with_tags([second.id()]),
        )
        .await
        .wrap_err("retag from another writer")?;
    let title_only = TaskRevision {
        title: TaskTitle::new("Renamed")?,
        description: TaskDescription::new("")?,
        status: None,
        tag_ids: None,
    };
    let renamed = TaskRepository::update(&*tracker.store, task_id, &title_only, DefaultClock.utc())
        .await
        .wrap_err("title-only update after retag")?;

    ensure!(renamed.task().title().as_str() == "Renamed", "title not applied");
    ensure!(
        renamed.status() == Status::Done,
        "status reverted to {:?}",
        renamed.status()
    );
    ensure!(
        tag_names(&renamed) == ["second"],
        "retag reverted to {:?}",
        tag_names(&renamed)
    );

    tracker
        .tags
        .delete_tag(tracker.owner, second.id())
        .await
        .wrap_err("delete tag from another writer")?;
    let after_delete =
        TaskRepository::update(&*tracker.store, task_id, &title_only, DefaultClock.utc())
            .await
            .wrap_err("title-only update after tag deletion")?;

    ensure!(after_delete.tags().is_empty(), "deleted tag came back");
    Ok(())
}

/// Status filters and the sort allow-list behave as documented.
pub async fn filters_and_sorts_listings<S: TrackerStore>(
    tracker: &Tracker<S>,
) -> eyre::Result<()> {
    let project = tracker.project("Listing").await?;
    for (title, status) in [
        ("Beta", Status::Done),
        ("Alpha", Status::ToDo),
        ("Gamma", Status::Done),
        ("Alpha", Status::InProgress),
    ] {
        tracker
            .task(
                project.id(),
                CreateTaskRequest::new(title).with_status(status.id()),
            )
            .await?;
    }

    let cases = [
        (ListTasksRequest::new(), vec![1, 2, 3, 4]),
        (
            ListTasksRequest::new()
                .with_statuses([Status::Done.id()])
                .order_by("title")
                .descending(),
            vec![3, 1],
        ),
        (ListTasksRequest::new().order_by("title"), vec![2, 4, 1, 3]),
        (
            ListTasksRequest::new().order_by("status_id").descending(),
            vec![1, 3, 4, 2],
        ),
        (ListTasksRequest::new().order_by("bogus"), vec![1, 2, 3, 4]),
        (
            ListTasksRequest::new().with_statuses([StatusId::new(99)]),
            Vec::new(),
        ),
    ];
    for (request, expected) in cases {
        let numbers = tracker.numbers(project.id(), &request).await?;
        ensure!(
            numbers == expected,
            "{request:?}: expected {expected:?}, got {numbers:?}"
        );
    }
    Ok(())
}

/// Deleting a project removes its tasks and tags.
pub async fn deletes_projects_with_contents<S: TrackerStore>(
    tracker: &Tracker<S>,
) -> eyre::Result<()> {
    let project = tracker.project("Doomed").await?;
    let tag = tracker.tag(project.id(), "gone").await?;
    let task = tracker
        .task(project.id(), CreateTaskRequest::new("Gone").with_tags([tag.id()]))
        .await?;

    tracker
        .projects
        .delete_project(tracker.owner, project.id())
        .await
        .wrap_err("delete project")?;

    let store = &*tracker.store;
    ensure!(
        ProjectRepository::find_by_id(store, project.id()).await?.is_none(),
        "project survived"
    );
    ensure!(
        TaskRepository::find_by_id(store, task.task().id()).await?.is_none(),
        "task survived"
    );
    ensure!(
        TagRepository::find_by_id(store, tag.id()).await?.is_none(),
        "tag survived"
    );
    Ok(())
}

/// Deleting a tag unlinks it and leaves its tasks in place.
pub async fn deletes_tags_without_tasks<S: TrackerStore>(
    tracker: &Tracker<S>,
) -> eyre::Result<()> {
    let project = tracker.project("Unlink").await?;
    let keep = tracker.tag(project.id(), "keep").await?;
    let drop = tracker.tag(project.id(), "drop").await?;
    let task = tracker
        .task(
            project.id(),
            CreateTaskRequest::new("Survivor").with_tags([keep.id(), drop.id()]),
        )
        .await?;

    tracker
        .tags
        .delete_tag(tracker.owner, drop.id())
        .await
        .wrap_err("delete tag")?;

    let listed = tracker
        .tasks
        .list_tasks(tracker.owner, project.id(), &ListTasksRequest::new())
        .await?;
    let [only] = listed.as_slice() else {
        return Err(eyre!("expected one task, got {}", listed.len()));
    };
    ensure!(only.task().id() == task.task().id(), "task replaced");
    ensure!(tag_names(only) == ["keep"], "unexpected tags {:?}", tag_names(only));
    Ok(())
}

/// Names are unique per owner for projects and per project for tags.
pub async fn scopes_name_uniqueness<S: TrackerStore>(tracker: &Tracker<S>) -> eyre::Result<()> {
    let project = tracker.project("Unique").await?;
    let duplicate_project = tracker
        .projects
        .create_project(tracker.owner, "Unique")
        .await;
    let strangers_project = tracker
        .projects
        .create_project(tracker.stranger, "Unique")
        .await
        .wrap_err("another owner may reuse the name")?;

    tracker.tag(project.id(), "urgent").await?;
    let duplicate_tag = tracker
        .tags
        .create_tag(tracker.owner, project.id(), "urgent")
        .await;
    tracker
        .tags
        .create_tag(tracker.stranger, strangers_project.id(), "urgent")
        .await
        .wrap_err("another project may reuse the tag name")?;

    ensure!(
        matches!(
            duplicate_project,
            Err(TrackerServiceError::Validation(ValidationError::DuplicateProjectName(_)))
        ),
        "expected duplicate project name, got {duplicate_project:?}"
    );
    ensure!(
        matches!(
            duplicate_tag,
            Err(TrackerServiceError::Validation(ValidationError::DuplicateTagName(_)))
        ),
        "expected duplicate tag name, got {duplicate_tag:?}"
    );
    Ok(())
}

/// Non-owners are denied everything and cannot tell missing from foreign.
pub async fn denies_strangers<S: TrackerStore>(tracker: &Tracker<S>) -> eyre::Result<()> {
    let project = tracker.project("Private").await?;
    let task = tracker
        .task(project.id(), CreateTaskRequest::new("Secret"))
        .await?;
    let stranger = tracker.stranger;

    let denied = [
        tracker.projects.get_project(stranger, project.id()).await.map(|_| ()),
        tracker
            .tasks
            .list_tasks(stranger, project.id(), &ListTasksRequest::new())
            .await
            .map(|_| ()),
        tracker
            .tasks
            .update_task(stranger, task.task().id(), UpdateTaskRequest::new("Mine", ""))
            .await
            .map(|_| ()),
        tracker.tasks.delete_task(stranger, task.task().id()).await,
        tracker.tags.create_tag(stranger, project.id(), "mine").await.map(|_| ()),
    ];
    for result in denied {
        ensure!(
            matches!(result, Err(TrackerServiceError::AccessDenied(_))),
            "expected access denied, got {result:?}"
        );
    }

    let listed = tracker
        .tasks
        .list_tasks(tracker.owner, project.id(), &ListTasksRequest::new())
        .await?;
    ensure!(
        listed.len() == 1 && listed.iter().all(|d| d.task().title().as_str() == "Secret"),
        "stranger changed the project"
    );
    Ok(())
}

/// Titles sort by byte value, so upper case precedes lower case.
pub async fn orders_titles_by_bytes<S: TrackerStore>(tracker: &Tracker<S>) -> eyre::Result<()> {
    let project = tracker.project("Collation").await?;
    for title in ["alpha", "Beta", "ähnlich", "Alpha"] {
        tracker.task(project.id(), CreateTaskRequest::new(title)).await?;
    }

    let ascending = tracker
        .numbers(project.id(), &ListTasksRequest::new().order_by("title"))
        .await?;

    ensure!(
        ascending == [4, 2, 1, 3],
        "expected byte order [4, 2, 1, 3], got {ascending:?}"
    );
    Ok(())
}
