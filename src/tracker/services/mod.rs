//! Application services for the tracker.
//!
//! Each operation resolves its targets, asks the access policy, validates
//! input and only then mutates the store. Missing targets are reported as
//! [`TrackerServiceError::AccessDenied`], so callers cannot tell another
//! user's project from one that does not exist.

mod error;
mod project;
mod retry;
mod tag;
mod task;

pub use error::{TrackerServiceError, TrackerServiceResult};
pub use project::ProjectService;
pub use tag::TagService;
pub use task::{CreateTaskRequest, ListTasksRequest, TaskService, UpdateTaskRequest};

use crate::tracker::{
    domain::{Project, ProjectId},
    policy::{Action, Actor, Resource, authorize},
    ports::ProjectRepository,
};
use tracing::debug;

/// Fetches a project on behalf of `actor`, treating absence as a denial.
async fn load_project<P>(
    projects: &P,
    actor: Actor,
    action: Action,
    id: ProjectId,
) -> TrackerServiceResult<Project>
where
    P: ProjectRepository + ?Sized,
{
    projects
        .find_by_id(id)
        .await
        .map_err(|err| TrackerServiceError::from_repository(actor, action, err))?
        .ok_or_else(|| TrackerServiceError::missing(actor, action))
}

/// Runs the policy check and logs denials.
fn check(actor: Actor, action: Action, resource: Resource<'_>) -> TrackerServiceResult<()> {
    authorize(actor, action, resource).map_err(|denial| {
        debug!(%actor, ?action, missing = false, "access denied");
        TrackerServiceError::from(denial)
    })
}
