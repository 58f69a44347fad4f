//! In-memory tracker store.
//!
//! One shared state backs all three repository ports so that cascades and
//! cross-entity checks (tag membership, per-project numbering) see a single
//! consistent view. Each operation holds the state lock for its whole
//! duration, which makes it atomic with respect to concurrent callers.

mod project;
mod tag;
mod task;

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tracker::{
    domain::{Project, ProjectId, Tag, TagId, Task, TaskDetails, TaskId, TaskNumber},
    ports::{RepositoryError, RepositoryResult},
};

/// Thread-safe in-memory implementation of the tracker repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<RwLock<TrackerState>>,
}

#[derive(Debug, Default)]
struct TrackerState {
    projects: HashMap<ProjectId, Project>,
    /// Highest task number ever assigned per project.
    last_task_numbers: HashMap<ProjectId, TaskNumber>,
    tasks: HashMap<TaskId, Task>,
    tags: HashMap<TagId, Tag>,
}

impl InMemoryTrackerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, TrackerState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, TrackerState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl TrackerState {
    fn tag_ids_of_project(&self, project_id: ProjectId) -> std::collections::BTreeSet<TagId> {
        self.tags
            .values()
            .filter(|tag| tag.project_id() == project_id)
            .map(Tag::id)
            .collect()
    }

    fn details(&self, task: &Task) -> TaskDetails {
        let tags = task
            .tag_ids()
            .iter()
            .filter_map(|tag_id| self.tags.get(tag_id).cloned())
            .collect();
        TaskDetails::new(task.clone(), tags)
    }
}
