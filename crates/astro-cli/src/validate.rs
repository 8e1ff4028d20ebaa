//! # Validate Subcommand
//!
//! Loads the whole content tree through the same pipeline the site build
//! uses: schema validation of every document, then uniqueness and
//! cross-reference checks. Fails on the first problem found.

use anyhow::Result;
use clap::Args;

use astro_content::ContentConfig;

use crate::{load_or_report, EXIT_INVALID};

/// Arguments for the `astro validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Print per-collection record counts after the summary line.
    #[arg(long)]
    pub counts: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on invalid content. Operational
/// failures are returned as errors.
pub async fn run_validate(args: &ValidateArgs, config: &ContentConfig) -> Result<u8> {
    tracing::info!(content_dir = %config.content_dir.display(), "validating content");

    let Some(dataset) = load_or_report(config).await? else {
        return Ok(EXIT_INVALID);
    };

    println!("{}", summary_line(dataset.document_count()));
    if args.counts {
        println!("  images:    {}", dataset.images().len());
        println!("  objects:   {}", dataset.objects().len());
        println!("  equipment: {}", dataset.equipment().len());
        println!("  locations: {}", dataset.locations().len());
    }
    Ok(0)
}

pub fn summary_line(document_count: usize) -> String {
    format!("Validation passed. Checked {document_count} file(s).")
}
