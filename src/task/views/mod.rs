//! Derived, read-only projections over a task collection.
//!
//! Every function borrows the collection and returns references in the
//! collection's relative order. Nothing is cached; callers recompute views
//! whenever the collection changes.

mod filter;
mod group;
mod sort;
mod text;

pub use filter::{
    QuadrantCounts, TaskFilters, apply_filters, by_quadrant, completed, count_by_quadrant,
    is_overdue, overdue, unassigned,
};
pub use group::{GroupBy, ParseGroupByError, TaskGroup, group_by};
pub use sort::{TaskSort, sort_tasks};
pub use text::plain_text;
