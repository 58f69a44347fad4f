//! [`ProjectRepository`] for the in-memory store.

use async_trait::async_trait;

use super::{InMemoryTrackerStore, TrackerState};
use crate::tracker::{
    domain::{Project, ProjectId, UserId},
    ports::{ProjectRepository, RepositoryError, RepositoryResult},
};

fn ensure_unique_name(state: &TrackerState, project: &Project) -> RepositoryResult<()> {
    let taken = state.projects.values().any(|existing| {
        existing.id() != project.id()
            && existing.owner_id() == project.owner_id()
            && existing.name() == project.name()
    });
    if taken {
        return Err(RepositoryError::DuplicateProjectName {
            owner_id: project.owner_id(),
            name: project.name().clone(),
        });
    }
    Ok(())
}

#[async_trait]
impl ProjectRepository for InMemoryTrackerStore {
    async fn store(&self, project: &Project) -> RepositoryResult<()> {
        let mut state = self.write()?;
        ensure_unique_name(&state, project)?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&project.id()) {
            return Err(RepositoryError::ProjectNotFound(project.id()));
        }
        ensure_unique_name(&state, project)?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.remove(&id).is_none() {
            return Err(RepositoryError::ProjectNotFound(id));
        }
        state.last_task_numbers.remove(&id);
        state.tasks.retain(|_, task| task.project_id() != id);
        state.tags.retain(|_, tag| tag.project_id() != id);
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> RepositoryResult<Vec<Project>> {
        let state = self.read()?;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.is_owned_by(owner_id))
            .cloned()
            .collect();
        projects.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.name().as_str().cmp(right.name().as_str()))
        });
        Ok(projects)
    }
}
