//! UI components and pages.
//!
//! Leptos SSR components rendered to HTML strings by the HTTP handlers and
//! the static export. Interactivity in the browser comes from HTMX and
//! Alpine.js attributes.
//!
//! # Structure
//!
//! - [`app`]: Document shell and the render entry point
//! - [`components`]: Reusable themed components
//! - [`nav`]: Shared navigation bar with the account popover
//! - [`pages`]: Landing, plan chooser, dashboard and completion pages

use std::sync::Arc;

use leptos::prelude::*;

use crate::branding::Branding;

pub mod app;
pub mod components;
pub mod nav;
pub mod pages;

pub use app::render_page;

/// Branding provided to the current render, or the defaults outside one.
pub fn use_branding() -> Arc<Branding> {
    use_context::<Arc<Branding>>().unwrap_or_default()
}
