//! Shared fixtures for in-memory tracker integration tests.

use std::sync::Arc;

use rstest::fixture;
use trellis::tracker::adapters::memory::InMemoryTrackerStore;

use crate::test_helpers::Tracker;

/// Tracker services over the in-memory store.
pub type MemoryTracker = Tracker<InMemoryTrackerStore>;

/// Provides services over a fresh, empty store.
#[fixture]
pub fn tracker() -> MemoryTracker {
    Tracker::new(InMemoryTrackerStore::new())
}

/// Provides shareable services for tests that spawn concurrent work.
#[fixture]
pub fn shared_tracker() -> Arc<MemoryTracker> {
    Arc::new(Tracker::new(InMemoryTrackerStore::new()))
}
