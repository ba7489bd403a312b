//! Configuration module for PICCULL.

use serde::Deserialize;
use std::path::Path;

use crate::{PiccullError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins (empty = permissive development mode).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve the bundled front end.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    /// Path to the static front end directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_serve_static() -> bool {
    true
}

fn default_static_path() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            serve_static: default_serve_static(),
            static_path: default_static_path(),
        }
    }
}

/// Photo library configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotosConfig {
    /// Base directory holding the photographs.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Directory for the on-disk thumbnail cache.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
}

fn default_base_dir() -> String {
    "data/photos".to_string()
}

fn default_cache_dir() -> String {
    "data/cache".to_string()
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            cache_dir: default_cache_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/piccull.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Photo library configuration.
    #[serde(default)]
    pub photos: PhotosConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PiccullError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PiccullError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PICCULL_PHOTOS_DIR`: Override the photo base directory
    /// - `PICCULL_CACHE_DIR`: Override the thumbnail cache directory
    /// - `PICCULL_PORT`: Override the listen port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("PICCULL_PHOTOS_DIR") {
            if !dir.is_empty() {
                self.photos.base_dir = dir;
            }
        }
        if let Ok(dir) = std::env::var("PICCULL_CACHE_DIR") {
            if !dir.is_empty() {
                self.photos.cache_dir = dir;
            }
        }
        if let Ok(port) = std::env::var("PICCULL_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PICCULL_PORT value: {}", port),
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.photos.base_dir.is_empty() {
            return Err(PiccullError::Validation(
                "photos.base_dir must not be empty. \
                 Set it in config.toml or via PICCULL_PHOTOS_DIR."
                    .to_string(),
            ));
        }
        if self.photos.cache_dir.is_empty() {
            return Err(PiccullError::Validation(
                "photos.cache_dir must not be empty. \
                 Set it in config.toml or via PICCULL_CACHE_DIR."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.cors_origins.is_empty());
        assert!(config.server.serve_static);
        assert_eq!(config.server.static_path, "static");

        assert_eq!(config.photos.base_dir, "data/photos");
        assert_eq!(config.photos.cache_dir, "data/cache");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/piccull.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]
serve_static = false
static_path = "web/dist"

[photos]
base_dir = "/srv/photos"
cache_dir = "/srv/cache"

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert!(!config.server.serve_static);
        assert_eq!(config.server.static_path, "web/dist");

        assert_eq!(config.photos.base_dir, "/srv/photos");
        assert_eq!(config.photos.cache_dir, "/srv/cache");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[photos]
base_dir = "/mnt/pictures"
"#;

        let config = Config::parse(toml).unwrap();

        // Specified value
        assert_eq!(config.photos.base_dir, "/mnt/pictures");

        // Default values
        assert_eq!(config.photos.cache_dir, "data/cache");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.photos.base_dir, "data/photos");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(PiccullError::Validation(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(PiccullError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides_photos_dir() {
        let original = std::env::var("PICCULL_PHOTOS_DIR").ok();

        std::env::set_var("PICCULL_PHOTOS_DIR", "/env/photos");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.photos.base_dir, "/env/photos");

        if let Some(val) = original {
            std::env::set_var("PICCULL_PHOTOS_DIR", val);
        } else {
            std::env::remove_var("PICCULL_PHOTOS_DIR");
        }
    }

    #[test]
    fn test_apply_env_overrides_empty_value() {
        let original = std::env::var("PICCULL_CACHE_DIR").ok();

        std::env::set_var("PICCULL_CACHE_DIR", "");

        let mut config = Config::default();
        config.photos.cache_dir = "original/cache".to_string();
        config.apply_env_overrides();

        // Should not override with empty string
        assert_eq!(config.photos.cache_dir, "original/cache");

        if let Some(val) = original {
            std::env::set_var("PICCULL_CACHE_DIR", val);
        } else {
            std::env::remove_var("PICCULL_CACHE_DIR");
        }
    }

    #[test]
    fn test_validate_empty_base_dir() {
        let mut config = Config::default();
        config.photos.base_dir = String::new();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(PiccullError::Validation(msg)) = result {
            assert!(msg.contains("base_dir"));
        }
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(Config::default().validate().is_ok());
    }
}
