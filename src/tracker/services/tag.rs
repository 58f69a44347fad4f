//! Tag management service.

use super::{TrackerServiceError, TrackerServiceResult, check, load_project};
use crate::tracker::{
    domain::{Project, ProjectId, Tag, TagId, TagName},
    policy::{Action, Actor, Resource},
    ports::{ProjectRepository, TagRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Creates, renames, deletes and lists project tags.
#[derive(Clone)]
pub struct TagService<P, G, C>
where
    P: ProjectRepository,
    G: TagRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tags: Arc<G>,
    clock: Arc<C>,
}

impl<P, G, C> TagService<P, G, C>
where
    P: ProjectRepository,
    G: TagRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new tag service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tags: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tags,
            clock,
        }
    }

    /// Creates a tag in `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// project, or [`TrackerServiceError::Validation`] for an invalid name or
    /// one already used in the project.
    pub async fn create_tag(
        &self,
        actor: Actor,
        project_id: ProjectId,
        name: impl Into<String> + Send,
    ) -> TrackerServiceResult<Tag> {
        let project = load_project(&*self.projects, actor, Action::Create, project_id).await?;
        check(actor, Action::Create, Resource::ProjectTags(&project))?;
        let tag = Tag::new(project.id(), TagName::new(name)?, &*self.clock);
        self.tags
            .store(&tag)
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Create, err))?;
        info!(project_id = %project.id(), tag_id = %tag.id(), "tag created");
        Ok(tag)
    }

    /// Renames a tag; tasks keep their link to it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// tag's project, or [`TrackerServiceError::Validation`] for an invalid or
    /// duplicate name.
    pub async fn rename_tag(
        &self,
        actor: Actor,
        tag_id: TagId,
        name: impl Into<String> + Send,
    ) -> TrackerServiceResult<Tag> {
        let (mut tag, project) = self.load_tag(actor, Action::Update, tag_id).await?;
        check(
            actor,
            Action::Update,
            Resource::Tag {
                tag: &tag,
                project: &project,
            },
        )?;
        tag.rename(TagName::new(name)?, &*self.clock);
        self.tags
            .update(&tag)
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Update, err))?;
        info!(project_id = %project.id(), tag_id = %tag.id(), "tag renamed");
        Ok(tag)
    }

    /// Deletes a tag and unlinks it from every task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// tag's project.
    pub async fn delete_tag(&self, actor: Actor, tag_id: TagId) -> TrackerServiceResult<()> {
        let (tag, project) = self.load_tag(actor, Action::Delete, tag_id).await?;
        check(
            actor,
            Action::Delete,
            Resource::Tag {
                tag: &tag,
                project: &project,
            },
        )?;
        self.tags
            .delete(tag.id())
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Delete, err))?;
        info!(project_id = %project.id(), tag_id = %tag.id(), "tag deleted");
        Ok(())
    }

    /// Lists a project's tags by name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// project.
    pub async fn list_tags(
        &self,
        actor: Actor,
        project_id: ProjectId,
    ) -> TrackerServiceResult<Vec<Tag>> {
        let project = load_project(&*self.projects, actor, Action::ViewAny, project_id).await?;
        check(actor, Action::ViewAny, Resource::ProjectTags(&project))?;
        self.tags
            .list_by_project(project.id())
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::ViewAny, err))
    }

    async fn load_tag(
        &self,
        actor: Actor,
        action: Action,
        tag_id: TagId,
    ) -> TrackerServiceResult<(Tag, Project)> {
        let tag = self
            .tags
            .find_by_id(tag_id)
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, action, err))?
            .ok_or_else(|| TrackerServiceError::missing(actor, action))?;
        let project = load_project(&*self.projects, actor, action, tag.project_id()).await?;
        Ok((tag, project))
    }
}
