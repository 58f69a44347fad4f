//! [`TagRepository`] for the in-memory store.

use async_trait::async_trait;

use super::{InMemoryTrackerStore, TrackerState};
use crate::tracker::{
    domain::{ProjectId, Tag, TagId},
    ports::{RepositoryError, RepositoryResult, TagRepository},
};

fn ensure_unique_name(state: &TrackerState, tag: &Tag) -> RepositoryResult<()> {
    let taken = state.tags.values().any(|existing| {
        existing.id() != tag.id()
            && existing.project_id() == tag.project_id()
            && existing.name() == tag.name()
    });
    if taken {
        return Err(RepositoryError::DuplicateTagName {
            project_id: tag.project_id(),
            name: tag.name().clone(),
        });
    }
    Ok(())
}

#[async_trait]
impl TagRepository for InMemoryTrackerStore {
    async fn store(&self, tag: &Tag) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&tag.project_id()) {
            return Err(RepositoryError::ProjectNotFound(tag.project_id()));
        }
        ensure_unique_name(&state, tag)?;
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn update(&self, tag: &Tag) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tags.contains_key(&tag.id()) {
            return Err(RepositoryError::TagNotFound(tag.id()));
        }
        ensure_unique_name(&state, tag)?;
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn delete(&self, id: TagId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.tags.remove(&id).is_none() {
            return Err(RepositoryError::TagNotFound(id));
        }
        for task in state.tasks.values_mut() {
            task.unlink_tag(id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>> {
        let state = self.read()?;
        Ok(state.tags.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Tag>> {
        let state = self.read()?;
        let mut tags: Vec<Tag> = state
            .tags
            .values()
            .filter(|tag| tag.project_id() == project_id)
            .cloned()
            .collect();
        tags.sort_by(|left, right| {
            left.name()
                .cmp(right.name())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(tags)
    }
}
