//! View building for the status pages.
//!
//! This module handles:
//! - Relative-age formatting
//! - Member display ordering
//! - Per-request view model assembly
//! - JSON and HTML rendering

pub mod humanize;
pub mod model;
pub mod ordering;
pub mod render;

pub use humanize::time_ago;
pub use model::ViewModel;
pub use ordering::sort_members;
pub use render::{render, render_json, render_page, status_str, RenderFormat, ServicesPage};
