use anyhow::{bail, Context, Result};
use launchpad_client::{validate_base_url, ClientConfig};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `backend.base_url`
pub const BACKEND_URL_ENV: &str = "BACKEND_API_URL";
/// Environment variable overriding `server.bind_address`
pub const BIND_ADDRESS_ENV: &str = "LAUNCHPAD_BIND_ADDRESS";
/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "LAUNCHPAD_PORT";

/// Launchpad proxy configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Cross-origin configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

/// HTTP binding configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Backend service of record
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL the `/applications` endpoints hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total time allowed for one backend call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a backend connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Cross-origin configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the proxy; `"*"` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from default locations in order:
    /// 1. ./launchpad.toml (current directory)
    /// 2. /etc/launchpad/config.toml (system-wide)
    /// 3. Built-in defaults
    pub fn load_default() -> Result<Self> {
        let paths = vec![
            PathBuf::from("./launchpad.toml"),
            PathBuf::from("/etc/launchpad/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            tracing::info!("Backend URL overridden by {}", BACKEND_URL_ENV);
            self.backend.base_url = url;
        }
        if let Some(address) = lookup(BIND_ADDRESS_ENV) {
            self.server.bind_address = address;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {PORT_ENV}: {port}"))?;
        }
        Ok(self)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.backend.base_url).context("Invalid backend.base_url")?;

        if self.backend.timeout_secs == 0 {
            bail!("backend.timeout_secs must be greater than zero");
        }
        if self.backend.connect_timeout_secs == 0 {
            bail!("backend.connect_timeout_secs must be greater than zero");
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.bind_address, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid bind address: {}:{}",
                    self.server.bind_address, self.server.port
                )
            })
    }

    /// Backend client settings
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.backend.timeout_secs),
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_secs),
        }
    }
}
