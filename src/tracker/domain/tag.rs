//! Project-scoped tags.

use super::{ProjectId, TagId, TagName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Label scoped to a single project, linked many-to-many with its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    project_id: ProjectId,
    name: TagName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTagData {
    /// Persisted tag identifier.
    pub id: TagId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: TagName,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new tag in `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, name: TagName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TagId::new(),
            project_id,
            name,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a tag from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTagData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the tag name.
    #[must_use]
    pub const fn name(&self) -> &TagName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the tag. Task links are unaffected.
    pub fn rename(&mut self, name: TagName, clock: &impl Clock) {
        self.name = name;
        self.updated_at = clock.utc();
    }
}
