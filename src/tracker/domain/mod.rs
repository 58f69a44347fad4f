//! Domain model for the project/task tracker.
//!
//! Holds the entities (projects, tasks, tags, statuses) together with the
//! rules that need no infrastructure: task numbering, tag assignment planning
//! and task list query plans. Persistence and authorization live outside.

mod assignment;
mod error;
mod ids;
mod names;
mod numbering;
mod project;
mod query;
mod status;
mod tag;
mod task;

pub use assignment::{TagAssignment, ensure_tags_in_project};
pub use error::{Field, ValidationError};
pub use ids::{ProjectId, StatusId, TagId, TaskId, UserId};
pub use names::{
    MAX_DESCRIPTION_BYTES, MAX_NAME_CHARS, ProjectName, TagName, TaskDescription, TaskTitle,
};
pub use numbering::TaskNumber;
pub use project::{PersistedProjectData, Project};
pub use query::{SortDirection, StatusFilter, TaskOrder, TaskQuery, TaskSortField};
pub use status::Status;
pub use tag::{PersistedTagData, Tag};
pub use task::{NewTask, PersistedTaskData, Task, TaskDetails, TaskRevision};
