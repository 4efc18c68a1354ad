//! Adapter implementations for the task ports.

pub mod file;
mod integrity;
pub mod memory;
pub mod postgres;
