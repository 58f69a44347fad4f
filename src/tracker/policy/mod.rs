//! Access policy for tracker operations.
//!
//! Every service operation resolves its target entities first and then asks
//! [`decide`] whether the actor may perform the action. Ownership is the only
//! permission source: a project's owner may do everything with it and its
//! tasks and tags, nobody else may do anything.

use super::domain::{Project, Tag, Task, UserId};
use std::fmt;
use thiserror::Error;

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    user_id: UserId,
}

impl Actor {
    /// Creates an actor for an authenticated user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.user_id)
    }
}

/// Operation being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read a single resource.
    View,
    /// Read the tasks or tags of a project.
    ViewAny,
    /// Create a resource.
    Create,
    /// Modify a resource.
    Update,
    /// Remove a resource.
    Delete,
}

/// Resource an action targets.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// A project that does not exist yet.
    NewProject,
    /// An existing project.
    Project(&'a Project),
    /// The task collection of a project.
    ProjectTasks(&'a Project),
    /// The tag collection of a project.
    ProjectTags(&'a Project),
    /// A task and the project it claims to belong to.
    Task {
        /// The task.
        task: &'a Task,
        /// Its owning project.
        project: &'a Project,
    },
    /// A tag and the project it claims to belong to.
    Tag {
        /// The tag.
        tag: &'a Tag,
        /// Its owning project.
        project: &'a Project,
    },
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The action may proceed.
    Allow,
    /// The action must be rejected.
    Deny,
}

impl Decision {
    const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }

    /// Returns `true` for [`Decision::Allow`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Rejection returned by [`authorize`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{actor} may not {action:?} this resource")]
pub struct AccessDenied {
    /// Actor that was refused.
    pub actor: Actor,
    /// Refused action.
    pub action: Action,
}

/// Decides whether `actor` may perform `action` on `resource`.
///
/// Combinations not listed below are denied:
///
/// - create a new project: any actor;
/// - view, update or delete a project: its owner;
/// - view the tasks of a project: whoever may view the project;
/// - create tasks or tags in, or view the tags of, a project: whoever may
///   update the project;
/// - update or delete a task or tag: whoever may update its project, provided
///   the task or tag really belongs to that project.
#[must_use]
pub fn decide(actor: Actor, action: Action, resource: Resource<'_>) -> Decision {
    let allowed = match (action, resource) {
        (Action::Create, Resource::NewProject) => true,
        (Action::View | Action::Update | Action::Delete, Resource::Project(project)) => {
            owns(actor, project)
        }
        (Action::ViewAny, Resource::ProjectTasks(project)) => {
            decide(actor, Action::View, Resource::Project(project)).is_allowed()
        }
        (Action::Create, Resource::ProjectTasks(project) | Resource::ProjectTags(project))
        | (Action::ViewAny, Resource::ProjectTags(project)) => {
            decide(actor, Action::Update, Resource::Project(project)).is_allowed()
        }
        (Action::Update | Action::Delete, Resource::Task { task, project }) => {
            task.project_id() == project.id()
                && decide(actor, Action::Update, Resource::Project(project)).is_allowed()
        }
        (Action::Update | Action::Delete, Resource::Tag { tag, project }) => {
            tag.project_id() == project.id()
                && decide(actor, Action::Update, Resource::Project(project)).is_allowed()
        }
        _ => false,
    };
    Decision::from_bool(allowed)
}

/// Like [`decide`], but returns an error for a denial.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the policy denies the action.
pub fn authorize(actor: Actor, action: Action, resource: Resource<'_>) -> Result<(), AccessDenied> {
    if decide(actor, action, resource).is_allowed() {
        Ok(())
    } else {
        Err(AccessDenied { actor, action })
    }
}

fn owns(actor: Actor, project: &Project) -> bool {
    project.is_owned_by(actor.user_id())
}
