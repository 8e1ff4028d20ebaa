//! # Assets Subcommand
//!
//! Prints the derivative manifest the image pipeline works from: the
//! storage key of every original, web rendition, thumbnail and sky chart,
//! in canonical image order.

use anyhow::{Context, Result};
use clap::Args;

use astro_content::{derivative_keys, key_url, AssetConfig, ContentConfig, DerivativeManifest};
use astro_core::Image;

use crate::{load_or_report, EXIT_INVALID};

/// Arguments for the `astro assets` subcommand.
#[derive(Args, Debug, Default)]
pub struct AssetsArgs {
    /// Only this image id.
    #[arg(long, value_name = "ID")]
    pub image: Option<String>,

    /// Print public URLs instead of storage keys.
    #[arg(long)]
    pub urls: bool,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the assets subcommand.
///
/// Returns exit code: 0 on success, 1 on invalid content or an unknown
/// `--image`.
pub async fn run_assets(args: &AssetsArgs, config: &ContentConfig) -> Result<u8> {
    let Some(dataset) = load_or_report(config).await? else {
        return Ok(EXIT_INVALID);
    };

    let images: Vec<&Image> = match &args.image {
        Some(id) => match dataset.image(id) {
            Some(image) => vec![image],
            None => {
                eprintln!("Unknown image id {id:?}");
                return Ok(EXIT_INVALID);
            }
        },
        None => dataset.images().iter().collect(),
    };

    let assets = args.urls.then_some(&config.assets);
    let manifests = manifests(&images, assets);
    println!("{}", render(&manifests, args.json)?);
    Ok(0)
}

/// Manifests for `images`; keys are turned into URLs when `assets` is set.
pub fn manifests(images: &[&Image], assets: Option<&AssetConfig>) -> Vec<DerivativeManifest> {
    images
        .iter()
        .map(|image| {
            let manifest = derivative_keys(image);
            match assets {
                Some(config) => with_urls(manifest, config),
                None => manifest,
            }
        })
        .collect()
}

fn with_urls(manifest: DerivativeManifest, config: &AssetConfig) -> DerivativeManifest {
    DerivativeManifest {
        original: key_url(config, &manifest.original),
        web: key_url(config, &manifest.web),
        thumb: key_url(config, &manifest.thumb),
        skychart: manifest.skychart.as_deref().map(|k| key_url(config, k)),
        ..manifest
    }
}

/// Render as a JSON array, or as one indented block per image.
pub fn render(manifests: &[DerivativeManifest], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(manifests).context("failed to serialize manifest");
    }

    let mut lines = Vec::new();
    for m in manifests {
        lines.push(format!("{} v{}", m.image_id, m.version));
        lines.push(format!("  original  {}", m.original));
        lines.push(format!("  web       {}", m.web));
        lines.push(format!("  thumb     {}", m.thumb));
        if let Some(chart) = &m.skychart {
            lines.push(format!("  skychart  {chart}"));
        }
    }
    Ok(lines.join("\n"))
}
