//! # astro-cli: Content Build Gate
//!
//! Provides the `astro` command used by CI and the site build.
//!
//! ## Subcommands
//!
//! - `astro validate`: load the whole content tree; exit non-zero on the
//!   first invalid document or broken cross-reference.
//! - `astro assets`: print the derivative storage keys (or URLs) for every
//!   image, or for one image.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | content is invalid, or a requested image does not exist |
//! | 2 | operational error (unreadable tree, bad configuration) |
//!
//! ## Crate Policy
//!
//! - Argument parsing and output formatting only; loading, checking and
//!   key derivation live in `astro-content`.

pub mod assets;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use astro_content::{AssetConfig, ContentConfig, ContentStore, Dataset};

/// Exit code for content that fails validation.
pub const EXIT_INVALID: u8 = 1;

/// Build the effective configuration: environment first, then flags.
pub fn resolve_config(
    content_dir: Option<PathBuf>,
    asset_base_url: Option<&str>,
) -> Result<ContentConfig> {
    let mut config = ContentConfig::from_env().context("invalid environment configuration")?;
    if let Some(dir) = content_dir {
        config.content_dir = dir;
    }
    if let Some(url) = asset_base_url {
        config.assets = AssetConfig::new(url).context("invalid --asset-base-url")?;
    }
    Ok(config)
}

/// Load the dataset for `config`.
///
/// Invalid content is reported on stderr and yields `Ok(None)`; any other
/// failure is returned as an error.
pub async fn load_or_report(config: &ContentConfig) -> Result<Option<Arc<Dataset>>> {
    let store = ContentStore::from_config(config);
    match store.dataset().await {
        Ok(dataset) => Ok(Some(dataset)),
        Err(e) if e.is_invalid_content() => {
            eprintln!("Validation failed: {e}");
            Ok(None)
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "failed to load content from {}",
            store.root().display()
        ))),
    }
}
