//! Task list query plans: status filtering and allow-listed ordering.
//!
//! Request parameters never fail to parse. Unknown order fields fall back to
//! the default order and unknown status ids simply match nothing, so every
//! request maps to one deterministic plan.

use super::{Status, StatusId, Task};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Column a task list may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskSortField {
    /// Per-project task number (`nr`).
    #[default]
    Number,
    /// Task title (`title`).
    Title,
    /// Status identifier (`status_id`).
    Status,
}

impl TaskSortField {
    /// The allow-list of orderable fields.
    pub const ALLOWED: [Self; 3] = [Self::Number, Self::Title, Self::Status];

    /// Returns the request/storage column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Number => "nr",
            Self::Title => "title",
            Self::Status => "status_id",
        }
    }

    /// Looks up an allow-listed field by column name.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALLOWED
            .into_iter()
            .find(|field| field.column() == name)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Maps a "descending" request flag to a direction.
    #[must_use]
    pub const fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    const fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Ordering of a task list. Defaults to `nr` ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskOrder {
    field: TaskSortField,
    direction: SortDirection,
}

impl TaskOrder {
    /// Creates an order from a field and direction.
    #[must_use]
    pub const fn new(field: TaskSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Builds an order from raw request parameters.
    ///
    /// An absent or blank `order_by` orders by `nr` in the requested
    /// direction. A field outside the allow-list is ignored together with the
    /// direction flag, yielding the default `nr` ascending.
    #[must_use]
    pub fn from_request(order_by: Option<&str>, descending: bool) -> Self {
        let direction = SortDirection::from_descending(descending);
        match order_by.map(str::trim).filter(|name| !name.is_empty()) {
            None => Self::new(TaskSortField::Number, direction),
            Some(name) => TaskSortField::from_column(name)
                .map_or_else(Self::default, |field| Self::new(field, direction)),
        }
    }

    /// Returns the sort field.
    #[must_use]
    pub const fn field(self) -> TaskSortField {
        self.field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn direction(self) -> SortDirection {
        self.direction
    }

    /// Compares two tasks of one project.
    ///
    /// Ties on title or status are broken by `nr` ascending, which is unique
    /// within a project.
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        let primary = match self.field {
            TaskSortField::Number => left.number().cmp(&right.number()),
            TaskSortField::Title => left.title().as_str().cmp(right.title().as_str()),
            TaskSortField::Status => left.status().cmp(&right.status()),
        };
        self.direction
            .orient(primary)
            .then_with(|| left.number().cmp(&right.number()))
    }
}

/// Status filter of a task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every status is included.
    #[default]
    Any,
    /// Only the listed statuses are included. An empty set matches nothing.
    Only(BTreeSet<Status>),
}

impl StatusFilter {
    /// Builds a filter from requested status ids.
    ///
    /// No ids means no filtering. Ids that name no status are dropped, so a
    /// request made only of unknown ids matches no task.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = StatusId>) -> Self {
        let requested: Vec<StatusId> = ids.into_iter().collect();
        if requested.is_empty() {
            return Self::Any;
        }
        Self::Only(requested.into_iter().filter_map(Status::from_id).collect())
    }

    /// Returns `true` when a task with `status` passes the filter.
    #[must_use]
    pub fn matches(&self, status: Status) -> bool {
        match self {
            Self::Any => true,
            Self::Only(statuses) => statuses.contains(&status),
        }
    }
}

/// Complete plan for listing a project's tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    filter: StatusFilter,
    order: TaskOrder,
}

impl TaskQuery {
    /// Creates a plan from a filter and an order.
    #[must_use]
    pub const fn new(filter: StatusFilter, order: TaskOrder) -> Self {
        Self { filter, order }
    }

    /// Builds a plan from raw request parameters.
    #[must_use]
    pub fn from_request(
        status_ids: impl IntoIterator<Item = StatusId>,
        order_by: Option<&str>,
        descending: bool,
    ) -> Self {
        Self::new(
            StatusFilter::from_ids(status_ids),
            TaskOrder::from_request(order_by, descending),
        )
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    /// Returns the ordering.
    #[must_use]
    pub const fn order(&self) -> TaskOrder {
        self.order
    }

    /// Returns `true` when `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.filter.matches(task.status())
    }
}
