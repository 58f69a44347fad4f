//! Project and task tracking.
//!
//! Users own projects; projects hold tasks numbered sequentially per project
//! and project-scoped tags linked to tasks many-to-many. The module follows
//! hexagonal architecture:
//!
//! - Domain types and pure rules in [`domain`]
//! - The ownership-based access policy in [`policy`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod policy;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
