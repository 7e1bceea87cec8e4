//! SaaS Starter server
//!
//! Entry point: loads configuration, initializes tracing, then either serves
//! the application or writes the static export.

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::map_err_ignore)]
#![allow(clippy::manual_let_else)]

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use saas_starter::config::{AppConfig, LogFormat};
use saas_starter::dream;
use saas_starter::server::{export_static, start_server};

#[tokio::main]
async fn main() {
    // Load .env (if present) before the config layers read the environment
    let _ = dotenv();

    let config = match AppConfig::load() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing (M-LOG-STRUCTURED)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log.format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }

    let result = match &config.export {
        Some(dir) => {
            info!(name: "export.started", dir = %dir.display(), "Exporting static pages");
            export_static(Arc::clone(&config), dir).await
        }
        None => start_server(Arc::clone(&config)).await,
    };

    if let Err(e) = result {
        if let Some(dream::Error::Configuration(msg)) = e.downcast_ref::<dream::Error>() {
            eprintln!("Configuration error: {msg}");
        } else {
            eprintln!("Fatal error: {e:#}");
        }
        std::process::exit(1);
    }
}
