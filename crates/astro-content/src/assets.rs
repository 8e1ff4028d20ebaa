//! # Asset Keys
//!
//! Storage keys and public URLs for an image's binary derivatives. The key
//! scheme is shared with the derivative generator, which must honour it
//! exactly:
//!
//! ```text
//! originals/{id}/v{assets.version}.jpg
//! web/{id}/v{assets.version}.webp
//! thumbs/{id}/v{assets.version}.webp
//! charts/{id}/v{skychart.version}.webp
//! ```
//!
//! Bumping a version yields new keys, which is how the generator learns to
//! regenerate a derivative. Nothing here touches storage.

use astro_core::Image;
use serde::Serialize;

use crate::config::AssetConfig;

/// The per-version derivatives every image has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Original,
    Web,
    Thumb,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Original, AssetKind::Web, AssetKind::Thumb];

    /// Top-level key prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Original => "originals",
            Self::Web => "web",
            Self::Thumb => "thumbs",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Original => "jpg",
            Self::Web | Self::Thumb => "webp",
        }
    }
}

const SKYCHART_PREFIX: &str = "charts";

/// Storage key of one derivative, from the image's own id and version.
pub fn asset_key(image: &Image, kind: AssetKind) -> String {
    format!(
        "{}/{}/v{}.{}",
        kind.prefix(),
        image.id,
        image.assets.version,
        kind.extension()
    )
}

/// Storage key of the sky chart, or `None` when the image has none.
pub fn skychart_key(image: &Image) -> Option<String> {
    image
        .skychart
        .as_ref()
        .map(|chart| format!("{SKYCHART_PREFIX}/{}/v{}.webp", image.id, chart.version))
}

/// Public URL for a storage key.
pub fn key_url(config: &AssetConfig, key: &str) -> String {
    format!("{}/{}", config.base_url(), key)
}

pub fn asset_url(config: &AssetConfig, image: &Image, kind: AssetKind) -> String {
    key_url(config, &asset_key(image, kind))
}

/// Public sky chart URL; `None` for the (common) image without a chart.
pub fn skychart_url(config: &AssetConfig, image: &Image) -> Option<String> {
    skychart_key(image).map(|key| key_url(config, &key))
}

/// Every storage key the derivative generator is responsible for, for one
/// image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivativeManifest {
    pub image_id: String,
    pub version: u32,
    pub original: String,
    pub web: String,
    pub thumb: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skychart: Option<String>,
}

impl DerivativeManifest {
    /// Keys in a fixed order: original, web, thumb, then the sky chart.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = vec![self.original.as_str(), self.web.as_str(), self.thumb.as_str()];
        if let Some(chart) = &self.skychart {
            keys.push(chart.as_str());
        }
        keys
    }
}

pub fn derivative_keys(image: &Image) -> DerivativeManifest {
    DerivativeManifest {
        image_id: image.id.to_string(),
        version: image.assets.version,
        original: asset_key(image, AssetKind::Original),
        web: asset_key(image, AssetKind::Web),
        thumb: asset_key(image, AssetKind::Thumb),
        skychart: skychart_key(image),
    }
}
