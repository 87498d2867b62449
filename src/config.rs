//! Configuration loading and management.
//!
//! Values are resolved from defaults, then an optional YAML file, then the
//! environment. Command-line flags are applied on top by the binary.
//!
//! ## Environment Variables
//! - `TODO_BACKEND_CONFIG` - config file path (when `--config` is not given)
//! - `HOST` - listen address
//! - `PORT` - listen port (default: 4000)
//! - `DATABASE_URL` - SQLite database path, `:memory:`, or a `sqlite:`/`file:` URL

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 4000;

/// Environment variable naming a config file.
pub const CONFIG_PATH_ENV: &str = "TODO_BACKEND_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "todo-backend.yaml";

const IN_MEMORY: &str = ":memory:";

/// Server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Record store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path, or `:memory:`.
    #[serde(default = "default_db_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

fn default_db_url() -> String {
    "todos.db".to_string()
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url == IN_MEMORY
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve configuration from the process environment.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// Resolve configuration using `env` to look up variables.
    ///
    /// An explicit path, or one named by `TODO_BACKEND_CONFIG`, must exist.
    /// The working-directory default file is optional.
    pub fn resolve_with<F>(explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match named {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_env(env)?;
        Ok(config)
    }

    /// Override values from environment variables.
    ///
    /// Fails when `DATABASE_URL` names a store other than SQLite.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = env("HOST") {
            self.server.host = host;
        }

        if let Some(port) = env("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring unparsable PORT"),
            }
        }

        if let Some(url) = env("DATABASE_URL") {
            self.database.url = sqlite_path(&url)?;
        }

        Ok(())
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if self.database.is_in_memory() {
            return Ok(());
        }
        if let Some(parent) = Path::new(&self.database.url).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

/// Reduce a `DATABASE_URL` value to the SQLite path it names.
///
/// Bare paths and `:memory:` pass through; `sqlite:` and `file:` prefixes
/// are stripped. Any other URL scheme is rejected.
fn sqlite_path(url: &str) -> Result<String> {
    let Some((scheme, rest)) = url.split_once(':') else {
        return Ok(url.to_string());
    };

    // Single letters are Windows drive prefixes, and `:memory:` has no scheme
    if scheme.len() < 2 || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        return Ok(url.to_string());
    }

    match scheme.to_ascii_lowercase().as_str() {
        "sqlite" | "file" => {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            if path.is_empty() {
                bail!("DATABASE_URL {url:?} does not name a database path");
            }
            Ok(path.to_string())
        }
        other => bail!(
            "DATABASE_URL uses unsupported scheme {other:?}; expected a SQLite path, \
             :memory:, or a sqlite:/file: URL"
        ),
    }
}
