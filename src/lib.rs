//! Trellis: a project and task tracker core.
//!
//! Users own projects. Each project holds tasks, numbered `1, 2, 3, …` within
//! the project, and tags that can be attached to its tasks. Every operation
//! is authorized against project ownership.
//!
//! # Architecture
//!
//! Trellis follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: An in-memory store and, behind the `postgres` feature, a
//!   Diesel store
//!
//! # Modules
//!
//! - [`tracker`]: Projects, tasks, tags, access policy and services
//! - [`config`]: Service and store configuration

pub mod config;
pub mod tracker;
