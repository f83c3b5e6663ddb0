//! Boot-time configuration (SPEC_FULL §Configuration): `options.txt` and
//! the `SERVER_ADDR` environment variable. Both are read once at startup;
//! nothing here changes once the server starts accepting connections.

use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    MissingOptionsFile { path: PathBuf, source: std::io::Error },
    MalformedOptionsFile { path: PathBuf, content: String },
    InvalidServerAddr { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingOptionsFile { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::MalformedOptionsFile { path, content } => write!(
                f,
                "{} does not contain a decimal seconds epoch, found {content:?}",
                path.display()
            ),
            ConfigError::InvalidServerAddr { value } => {
                write!(f, "SERVER_ADDR {value:?} is not a valid host:port")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct AppConfig {
    pub data_dir: PathBuf,
    /// The fixed reference timestamp from `options.txt` (§4.3: "`now` is
    /// fixed at startup and never changes").
    pub now: i64,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    pub fn load(data_dir: PathBuf) -> ConfigResult<Self> {
        let now = read_options(&data_dir.join("options.txt"))?;
        let listen_addr = resolve_listen_addr(&server_addr_env())?;
        Ok(AppConfig { data_dir, now, listen_addr })
    }

    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join("data.zip")
    }
}

fn server_addr_env() -> String {
    std::env::var("SERVER_ADDR").unwrap_or_else(|_| ":80".to_string())
}

fn read_options(path: &Path) -> ConfigResult<i64> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::MissingOptionsFile {
        path: path.to_path_buf(),
        source,
    })?;
    content
        .trim()
        .parse()
        .map_err(|_| ConfigError::MalformedOptionsFile { path: path.to_path_buf(), content })
}

/// `:80` (no host, Go-style "all interfaces") is normalized to `0.0.0.0:80`
/// before `SocketAddr` parsing, which requires an explicit host.
fn resolve_listen_addr(raw: &str) -> ConfigResult<SocketAddr> {
    let normalized = if let Some(port) = raw.strip_prefix(':') {
        format!("0.0.0.0:{port}")
    } else {
        raw.to_string()
    };
    normalized
        .parse()
        .map_err(|_| ConfigError::InvalidServerAddr { value: raw.to_string() })
}
