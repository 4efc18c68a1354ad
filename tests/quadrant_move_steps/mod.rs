//! Step definitions for quadrant move scenarios.

mod given;
mod then;
mod when;
pub mod world;
