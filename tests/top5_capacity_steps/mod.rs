//! Step definitions for Top 5 capacity behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
