//! Task management on the Eisenhower matrix.
//!
//! A task is created in the unassigned inbox and categorised by moving it
//! into one of the four quadrants, which rewrites its urgent/important
//! flags. Editing the flags directly never relocates a task. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Field rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Stateful services in [`services`]
//! - Read-only projections in [`views`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;
