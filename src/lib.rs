//! Eisenhower: task prioritisation on the urgent/important matrix.
//!
//! This crate owns the canonical task collection, the rules that move tasks
//! between the four matrix quadrants and the unassigned inbox, and the
//! derived views (filters, groupings, orderings) presentation layers render.
//!
//! # Architecture
//!
//! Eisenhower follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and the remote
//!   task service
//! - **Adapters**: Concrete implementations of ports (memory, JSON file,
//!   `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task model, store, optimistic sync and views
//! - [`config`]: Environment-driven storage and validation settings

pub mod config;
pub mod task;
