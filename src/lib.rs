//! SaaS Starter
//!
//! A server-rendered SaaS front end: marketing landing page, hosted sign-in,
//! plan chooser with checkout, usage dashboard and billing portal hand-off,
//! all backed by the Dream API and themed from configuration.
//!
//! # Architecture
//!
//! - **Server**: Axum router; each request is one page load
//! - **Dream API**: trait-based client for auth, billing, usage and tiers
//! - **Session**: per-request container that resolves the visitor's credential
//! - **UI**: Leptos SSR + HTMX + Alpine.js
//!
//! # Modules
//!
//! - [`branding`]: Brand copy, theme and accent palettes
//! - [`config`]: Layered configuration and CLI
//! - [`dream`]: Dream API trait, HTTP client and facade
//! - [`session`]: Session container and credential cookie
//! - [`pricing`], [`plans`], [`dashboard`]: page logic independent of markup
//! - [`ui`]: Components and pages

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]
#![allow(clippy::must_use_candidate)]

pub mod branding;
pub mod config;
pub mod dashboard;
pub mod dream;
pub mod plans;
pub mod pricing;
pub mod server;
pub mod session;
pub mod ui;

use std::sync::Arc;

use crate::branding::Branding;
use crate::config::AppConfig;
use crate::dream::DreamFacade;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Global Configuration
    pub config: Arc<AppConfig>,
    /// Branding provided to every render.
    pub branding: Arc<Branding>,
    /// Dream API facade, cloned into each page load's session.
    pub api: DreamFacade,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, api: DreamFacade) -> Self {
        let branding = Arc::new(config.branding.clone());
        Self {
            config,
            branding,
            api,
        }
    }

    /// Absolute URL under the configured public origin.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            self.config.server.public_url.trim_end_matches('/')
        )
    }
}
