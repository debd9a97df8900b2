//! Workspace-scoped task tracking.
//!
//! This module implements the tracker core: workspace-partitioned task
//! CRUD over a key-value backend, the capacity-limited Top 5 bucket with
//! its interactive conflict-resolution workflow, completion toggling, the
//! deletion guard, debounced autosave, and the daily-reminder reset sweep.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
