use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RsaLabError, RsaLabResult};

/// Top-level service configuration (loaded from rsalab.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RsaLabConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub crypto: CryptoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP API listen address (default: 0.0.0.0:3001)
    pub listen: String,
    /// Prometheus metrics endpoint (default: 127.0.0.1:9100)
    pub metrics_addr: Option<String>,
    /// Log level (default: info)
    pub log_level: String,
    /// Log format: "json" or "text"
    pub log_format: String,
    /// Upper bound for uploaded files on /api/extract-text
    pub max_upload_bytes: usize,
    /// Allow any origin (the browser frontend is served from another host in dev)
    pub cors_permissive: bool,
}

/// Platform authentication headers injected by the hosting front door
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub user_id_header: String,
    pub user_email_header: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend: "json" or "memory"
    pub backend: String,
    /// JSON store file
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Key size used when a generate request does not name one
    pub default_key_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3001".into(),
            metrics_addr: Some("127.0.0.1:9100".into()),
            log_level: "info".into(),
            log_format: "json".into(),
            max_upload_bytes: 10 * 1024 * 1024,
            cors_permissive: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_id_header: "X-MS-CLIENT-PRINCIPAL-ID".into(),
            user_email_header: "X-MS-CLIENT-PRINCIPAL-NAME".into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "json".into(),
            path: PathBuf::from("~/.local/share/rsalab/ciphertexts.json"),
        }
    }
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            default_key_size: 2048,
        }
    }
}

impl RsaLabConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> RsaLabResult<Self> {
        if !path.exists() {
            tracing::warn!(
                "config file not found: {}  (using defaults)",
                path.display()
            );
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| RsaLabError::Config(format!("parsing {}: {e}", path.display())))
    }
}

impl StoreConfig {
    /// Store path with a leading `~/` expanded against $HOME.
    pub fn resolved_path(&self) -> PathBuf {
        expand_home(&self.path)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
