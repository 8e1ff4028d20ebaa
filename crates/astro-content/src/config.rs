//! Content engine configuration.
//!
//! Defaults suit a local checkout: content under `./content`, assets served
//! from a local S3-compatible bucket. Override via environment variables or
//! explicit construction.

use std::path::PathBuf;

use url::Url;

/// Content root used when `CONTENT_DIR` is unset.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Asset base URL used when `PUBLIC_ASSET_BASE_URL` is unset or empty.
pub const DEFAULT_ASSET_BASE_URL: &str = "http://localhost:9000/astro-images";

/// Where image derivatives are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Absolute base URL with trailing slashes removed.
    base_url: String,
}

impl AssetConfig {
    /// Build from a base URL, which must be absolute.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// The base URL, never ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ASSET_BASE_URL.to_string(),
        }
    }
}

/// Configuration for loading content and deriving asset URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Directory holding `images/`, `objects/`, `equipment/`, `locations/`.
    pub content_dir: PathBuf,
    pub assets: AssetConfig,
}

impl ContentConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CONTENT_DIR` (default: `content`)
    /// - `PUBLIC_ASSET_BASE_URL` (default: `http://localhost:9000/astro-images`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let content_dir = std::env::var_os("CONTENT_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));

        let assets = match std::env::var("PUBLIC_ASSET_BASE_URL") {
            Ok(raw) if !raw.trim().is_empty() => AssetConfig::new(&raw)?,
            _ => AssetConfig::default(),
        };

        Ok(Self {
            content_dir,
            assets,
        })
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            assets: AssetConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid asset base URL {0:?}: {1}")]
    InvalidUrl(String, String),
}
