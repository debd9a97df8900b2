//! Quintet: a workspace task tracker built around a five-slot priority
//! bucket.
//!
//! This crate provides the core functionality for tracking tasks across
//! workspaces on top of a key-value backend: CRUD with workspace
//! partitioning, the capacity-limited Top 5 bucket and its interactive
//! conflict-resolution workflow, debounced autosave, and the scheduled
//! daily-reminder reset sweep.
//!
//! # Architecture
//!
//! Quintet follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (key-value backend,
//!   REST surface)
//!
//! # Modules
//!
//! - [`task`]: Task domain, persistence, and lifecycle workflows
//! - [`http`]: REST adapter exposing the tracker over HTTP

pub mod http;
pub mod task;
