use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::StoreResult;

/// Service configuration.
///
/// # Configuration Locations
///
/// Sources are layered, later ones overriding earlier ones:
/// 1. Global `$HOME/.config/stringscope/config.yaml`
/// 2. Local `.stringscope.yaml` in the current directory
/// 3. Custom config file specified via `--config` (must exist)
/// 4. `STRINGSCOPE_*` environment variables (e.g. `STRINGSCOPE_PORT=9000`)
///
/// Command-line flags are applied last through [`ServiceConfig::merge_with_cli`].
///
/// # Configuration Format
///
/// ```yaml
/// # Address to bind
/// host: "127.0.0.1"
///
/// # Port to listen on
/// port: 8000
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "debug"
///
/// # Runtime worker threads (default: CPU cores)
/// worker_threads: 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of runtime worker threads
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_worker_threads")]
    pub worker_threads: NonZeroUsize,
}

/// Values supplied on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub worker_threads: Option<NonZeroUsize>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_worker_threads() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            worker_threads: default_worker_threads(),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from the default locations, additionally reading
    /// `config_path` when given
    pub fn load_from(config_path: Option<&Path>) -> StoreResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let optional_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("stringscope/config.yaml")),
            // Local config
            Some(PathBuf::from(".stringscope.yaml")),
        ];

        for path in optional_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file has to exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("STRINGSCOPE"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Applies command-line values on top of the loaded configuration
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        if let Some(worker_threads) = cli.worker_threads {
            self.worker_threads = worker_threads;
        }
        self
    }

    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
