//! [`TaskRepository`] for the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::InMemoryTrackerStore;
use crate::tracker::{
    adapters::tag_membership_error,
    domain::{
        NewTask, ProjectId, TagAssignment, Task, TaskDetails, TaskId, TaskNumber, TaskQuery,
        TaskRevision, ensure_tags_in_project,
    },
    ports::{RepositoryError, RepositoryResult, TaskRepository},
};

#[async_trait]
impl TaskRepository for InMemoryTrackerStore {
    async fn create(&self, task: &NewTask) -> RepositoryResult<TaskDetails> {
        let mut state = self.write()?;
        let project_id = task.project_id();
        if !state.projects.contains_key(&project_id) {
            return Err(RepositoryError::ProjectNotFound(project_id));
        }

        let project_tags = state.tag_ids_of_project(project_id);
        ensure_tags_in_project(task.tag_ids(), &project_tags)
            .map_err(|err| tag_membership_error(project_id, err))?;

        let previous = state.last_task_numbers.get(&project_id).copied();
        let number = TaskNumber::after(previous)
            .map_err(|_| RepositoryError::TaskNumbersExhausted(project_id))?;
        let number_taken = state
            .tasks
            .values()
            .any(|existing| existing.project_id() == project_id && existing.number() == number);
        if number_taken {
            return Err(RepositoryError::TaskNumberConflict { project_id, number });
        }

        let created = task.clone().into_task(number);
        state.last_task_numbers.insert(project_id, number);
        state.tasks.insert(created.id(), created.clone());
        Ok(state.details(&created))
    }

    async fn update(
        &self,
        id: TaskId,
        revision: &TaskRevision,
        updated_at: DateTime<Utc>,
    ) -> RepositoryResult<TaskDetails> {
        let mut state = self.write()?;
        let mut updated = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::TaskNotFound(id))?;

        if let Some(requested) = revision.tag_ids.as_ref() {
            let project_id = updated.project_id();
            let project_tags = state.tag_ids_of_project(project_id);
            ensure_tags_in_project(requested, &project_tags)
                .map_err(|err| tag_membership_error(project_id, err))?;
            let assignment = TagAssignment::plan(updated.tag_ids(), requested);
            debug!(
                task_id = %id,
                linked = assignment.to_link().len(),
                unlinked = assignment.to_unlink().len(),
                "applying tag assignment"
            );
        }

        updated.revise(revision.clone(), updated_at);
        state.tasks.insert(id, updated.clone());
        Ok(state.details(&updated))
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::TaskNotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(
        &self,
        project_id: ProjectId,
        query: &TaskQuery,
    ) -> RepositoryResult<Vec<TaskDetails>> {
        let state = self.read()?;
        let mut tasks: Vec<&Task> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id && query.matches(task))
            .collect();
        let order = query.order();
        tasks.sort_by(|left, right| order.compare(left, right));
        Ok(tasks.into_iter().map(|task| state.details(task)).collect())
    }
}
