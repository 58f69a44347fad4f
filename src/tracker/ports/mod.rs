//! Port contracts for tracker persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker services.

pub mod repository;

#[cfg(test)]
pub use repository::MockTaskRepository;
pub use repository::{
    ProjectRepository, RepositoryError, RepositoryResult, TagRepository, TaskRepository,
};
