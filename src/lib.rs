//! Read-only status surface for a service-discovery cluster.
//!
//! Renders the cluster's current membership and the services each member
//! advertises, either as a JSON document or as an auto-refreshing HTML page.
//! Membership and service state are owned elsewhere (by the gossip layer)
//! and are only read through the provider traits in [`cluster`].
//!
//! # Endpoints
//!
//! ```text
//! GET /services        HTML page, refreshes every 4 seconds
//! GET /services.json   services grouped by name, 2-space indented JSON
//! GET /servers         same dispatch as /services{extension}, no extension
//! GET /health          liveness
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`cluster`]: Cluster types, provider traits and in-memory state
//! - [`view`]: View model assembly and rendering
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod cluster;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;
pub mod view;

pub use config::Config;
pub use error::{Result, StatusError};
