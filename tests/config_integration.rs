use saas_starter::branding::{Accent, Theme};
use saas_starter::config::{AppConfig, LogFormat};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;

const ENV_VARS: &[&str] = &[
    "SAAS__SERVER__PORT",
    "SAAS__DREAM__BASE_URL",
    "SAAS__BRANDING__ACCENT_COLOR",
    "CONFIG_FILE",
    "PORT",
    "PUBLIC_URL",
    "DREAM_PUBLISHABLE_KEY",
    "DREAM_API_URL",
    "LOG_FORMAT",
];

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    for var in ENV_VARS {
        unsafe {
            env::remove_var(var);
        }
    }
}

fn write_config(dir: &Path, content: &str) -> String {
    let path = dir.join("config.yaml");
    fs::write(&path, content).expect("Failed to write temp config");
    path.to_string_lossy().into_owned()
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["saas-starter"]).expect("defaults load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.public_url, "http://localhost:3000");
    assert_eq!(config.dream.base_url, "https://api.dream-api.com");
    assert_eq!(config.dream.publishable_key(), None);
    assert_eq!(config.log.format, LogFormat::Pretty);
    assert_eq!(config.ui.success_settle_ms, 1500);
    assert_eq!(config.ui.notice_ms, 3000);
    assert_eq!(config.ui.complete_redirect_ms, 500);
    assert_eq!(config.branding.accent_color, Accent::Emerald);
    assert_eq!(config.branding.theme, Theme::Light);
    assert!(config.export.is_none());
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("SAAS__SERVER__PORT", "9090");
        env::set_var("SAAS__DREAM__BASE_URL", "http://localhost:8787");
    }

    let config = AppConfig::load_from_args(["saas-starter"]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.dream.base_url, "http://localhost:8787");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
server:
  port: 7070
dream:
  publishable_key: pk_file
branding:
  app_name: Acme
  accent_color: violet
  theme: dark
  hero:
    headline: Ship faster
    image: /static/hero.png
"#,
    );

    let config = AppConfig::load_from_args(["saas-starter", "--config", &path])
        .expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.dream.publishable_key(), Some("pk_file"));
    assert_eq!(config.branding.app_name, "Acme");
    assert_eq!(config.branding.accent_color, Accent::Violet);
    assert_eq!(config.branding.theme, Theme::Dark);
    assert_eq!(config.branding.hero.headline, "Ship faster");
    assert_eq!(config.branding.hero.image.as_deref(), Some("/static/hero.png"));
    // Fields the file leaves out keep their defaults
    assert!(!config.branding.faq.items.is_empty());
}

#[test]
#[serial]
fn test_config_file_from_env() {
    clear_env_vars();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "server:\n  port: 6060\n");
    unsafe {
        env::set_var("CONFIG_FILE", &path);
    }

    let config = AppConfig::load_from_args(["saas-starter"]).expect("Failed to load config");
    assert_eq!(config.server.port, 6060);

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_fails() {
    clear_env_vars();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");

    let result = AppConfig::load_from_args(["saas-starter", "--config", path.to_str().unwrap()]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_unknown_accent_fails() {
    clear_env_vars();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "branding:\n  accent_color: chartreuse\n");

    let result = AppConfig::load_from_args(["saas-starter", "--config", &path]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cli_beats_env_and_file() {
    clear_env_vars();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "server:\n  port: 7070\n");
    unsafe {
        env::set_var("SAAS__SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args([
        "saas-starter",
        "--config",
        &path,
        "--port",
        "4000",
        "--publishable-key",
        "pk_cli",
        "--log-format",
        "json",
        "--export",
        "dist",
    ])
    .expect("Failed to load config");

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.dream.publishable_key(), Some("pk_cli"));
    assert_eq!(config.log.format, LogFormat::Json);
    assert_eq!(config.export.as_deref(), Some(Path::new("dist")));

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_beats_file() {
    clear_env_vars();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "server:\n  port: 7070\n");
    unsafe {
        env::set_var("SAAS__SERVER__PORT", "9090");
    }

    let config =
        AppConfig::load_from_args(["saas-starter", "--config", &path]).expect("Failed to load");
    assert_eq!(config.server.port, 9090);

    clear_env_vars();
}
