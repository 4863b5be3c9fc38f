//! Layered application configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. `BOOKSTORE__*` environment variables (`BOOKSTORE__SERVER__PORT=8080`
//!    maps to `server.port`).

use bookstore_core::db::DEFAULT_DATABASE_FILE;
use bookstore_core::{default_log_level, SeedData};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "BOOKSTORE";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    /// Rows inserted when catalog tables are created for the first time.
    pub seed: SeedData,
    /// File the settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rotated log files; stderr only when unset.
    pub dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_FILE),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Loads configuration from an optional file plus environment overrides.
///
/// # Errors
/// Returns an error when the given file is missing or malformed, or when
/// a value cannot be deserialized into `AppConfig`.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let mut config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<AppConfig>()?;
    config.source = path.map(Path::to_path_buf);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{load_config, AppConfig};
    use serial_test::serial;
    use std::io::Write;
    use std::path::PathBuf;

    const OVERRIDES: [(&str, &str); 3] = [
        ("BOOKSTORE__SERVER__PORT", "8181"),
        ("BOOKSTORE__DATABASE__PATH", "/tmp/overridden.db"),
        ("BOOKSTORE__LOGGING__LEVEL", "warn"),
    ];

    /// Sets variables for one test and restores the previous values on drop.
    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            let saved = vars
                .iter()
                .map(|(key, value)| {
                    let previous = std::env::var(key).ok();
                    std::env::set_var(key, value);
                    (*key, previous)
                })
                .collect();
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, previous) in &self.saved {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, PathBuf::from("table_books.db"));
        assert!(config.logging.dir.is_none());
        assert_eq!(config.seed.authors.len(), 4);
        assert_eq!(config.seed.books.len(), 3);
    }

    #[test]
    fn config_deserializes_partial_sections() {
        let raw = serde_json::json!({
            "server": { "address": "0.0.0.0", "port": 8080 },
            "seed": { "books": [] }
        });

        let config: AppConfig = serde_json::from_value(raw).unwrap();
        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database.path, PathBuf::from("table_books.db"));
        assert!(config.seed.books.is_empty());
        assert_eq!(config.seed.authors.len(), 4);
    }

    #[test]
    #[serial]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstore.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[database]
path = "/tmp/catalog.db"

[[seed.authors]]
first_name = "Leo"
last_name = "Tolstoy"

[[seed.books]]
title = "War and Peace"
author = 1
"#
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.seed.authors.len(), 1);
        assert_eq!(config.seed.books[0].title, "War and Peace");
    }

    #[test]
    #[serial]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn environment_overrides_defaults() {
        let _env = EnvGuard::set(&OVERRIDES);

        let config = load_config(None).unwrap();
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.database.path, PathBuf::from("/tmp/overridden.db"));
        assert_eq!(config.logging.level, "warn");
        assert!(config.source.is_none());
        assert_eq!(config.server.address.to_string(), "127.0.0.1");
    }

    #[test]
    #[serial]
    fn environment_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstore.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();
        let _env = EnvGuard::set(&OVERRIDES[..1]);

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8181);
    }
}
