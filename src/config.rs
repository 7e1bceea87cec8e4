use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::branding::Branding;

/// Environment prefix for layered settings, e.g. `SAAS__SERVER__PORT`.
pub const ENV_PREFIX: &str = "SAAS";

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Externally visible origin, used for billing return URLs
    #[arg(long, env = "PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Dream API publishable key
    #[arg(long, env = "DREAM_PUBLISHABLE_KEY", hide_env_values = true)]
    pub publishable_key: Option<String>,

    /// Dream API base URL
    #[arg(long, env = "DREAM_API_URL")]
    pub dream_api_url: Option<String>,

    /// Log output format: pretty or json
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Render the public pages to this directory and exit
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dream: DreamConfig,
    pub log: LogConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub branding: Branding,
    /// Static export target; only ever set from the command line.
    #[serde(skip)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_url: String,
    pub static_dir: PathBuf,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DreamConfig {
    pub base_url: String,
    pub auth_url: String,
    #[serde(default)]
    pub publishable_key: Option<String>,
    pub timeout_secs: u64,
}

impl DreamConfig {
    /// The publishable key, if set to something non-blank.
    pub fn publishable_key(&self) -> Option<&str> {
        self.publishable_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

/// Timings of the client-side transitions.
#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Wait after a billing success redirect before refreshing the user.
    pub success_settle_ms: u64,
    /// How long a dashboard notice stays visible.
    pub notice_ms: u64,
    /// Delay before the completion page forwards to the dashboard.
    pub complete_redirect_ms: u64,
}

impl UiConfig {
    pub fn success_settle(&self) -> Duration {
        Duration::from_millis(self.success_settle_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.public_url", "http://localhost:3000")?
            .set_default("server.static_dir", "static")?
            .set_default("server.secure_cookies", false)?
            .set_default("dream.base_url", "https://api.dream-api.com")?
            .set_default("dream.auth_url", "https://auth.dream-api.com")?
            .set_default("dream.timeout_secs", 15)?
            .set_default("log.format", LogFormat::default().as_str())?
            .set_default("ui.success_settle_ms", 1500)?
            .set_default("ui.notice_ms", 3000)?
            .set_default("ui.complete_redirect_ms", 500)?;

        // 2. Config file: explicit path must exist, the default one is optional
        builder = match &cli.config {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        // 3. Prefixed environment, e.g. SAAS__DREAM__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags and their env fallbacks win over everything
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = cli.public_url {
            builder = builder.set_override("server.public_url", url)?;
        }
        if let Some(key) = cli.publishable_key {
            builder = builder.set_override("dream.publishable_key", key)?;
        }
        if let Some(url) = cli.dream_api_url {
            builder = builder.set_override("dream.base_url", url)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("log.format", format.as_str())?;
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.export = cli.export;
        Ok(cfg)
    }

    /// Socket address string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
