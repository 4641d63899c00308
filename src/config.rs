//! Server configuration
//!
//! Loaded from environment variables (with `.env` support via dotenvy in
//! main). Every setting has a default, so the server starts with no
//! configuration at all.

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port (`DOCDIFF_PORT`, default 8000)
    pub port: u16,
}

/// Comparison pipeline settings
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Rendering resolution for visual signatures
    /// (`DOCDIFF_RENDER_DPI`, default 144)
    pub render_dpi: u32,
    /// Multipart upload limit in bytes (`DOCDIFF_MAX_UPLOAD_MB`, default 50 MB)
    pub max_upload_bytes: usize,
    /// Number of finished comparisons kept in memory
    /// (`DOCDIFF_STORE_CAPACITY`, default 32)
    pub store_capacity: usize,
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub compare: CompareConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig { port: 8000 },
            compare: CompareConfig {
                render_dpi: 144,
                max_upload_bytes: 50 * 1024 * 1024,
                store_capacity: 32,
            },
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults for
    /// unset variables. Set-but-unparsable variables are an error rather
    /// than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let max_upload_mb: usize = parse_var(
            "DOCDIFF_MAX_UPLOAD_MB",
            defaults.compare.max_upload_bytes / (1024 * 1024),
        )?;
        let max_upload_bytes =
            max_upload_mb
                .checked_mul(1024 * 1024)
                .ok_or(ConfigError::InvalidValue {
                    var: "DOCDIFF_MAX_UPLOAD_MB",
                    value: max_upload_mb.to_string(),
                })?;

        Ok(Self {
            server: ServerConfig {
                port: parse_var("DOCDIFF_PORT", defaults.server.port)?,
            },
            compare: CompareConfig {
                render_dpi: parse_var("DOCDIFF_RENDER_DPI", defaults.compare.render_dpi)?,
                max_upload_bytes,
                store_capacity: parse_var(
                    "DOCDIFF_STORE_CAPACITY",
                    defaults.compare.store_capacity,
                )?,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(default),
    }
}
