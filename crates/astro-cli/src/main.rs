//! # astro CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers on a Tokio runtime.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use astro_cli::assets::{run_assets, AssetsArgs};
use astro_cli::resolve_config;
use astro_cli::validate::{run_validate, ValidateArgs};

/// Exit code for operational failures.
const EXIT_OPERATIONAL: u8 = 2;

/// Astrophotography content toolchain.
///
/// Validates the content tree that the site is built from and lists the
/// image derivatives the asset pipeline must produce.
#[derive(Parser, Debug)]
#[command(name = "astro", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Content root holding images/, objects/, equipment/ and locations/.
    /// Overrides CONTENT_DIR.
    #[arg(long, global = true, value_name = "DIR")]
    content_dir: Option<PathBuf>,

    /// Public base URL of the asset bucket. Overrides PUBLIC_ASSET_BASE_URL.
    #[arg(long, global = true, value_name = "URL")]
    asset_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every content document and all cross-references.
    Validate(ValidateArgs),

    /// Print derivative storage keys or URLs for images.
    Assets(AssetsArgs),
}

fn main() -> ExitCode {
    let Cli {
        verbose,
        content_dir,
        asset_base_url,
        command,
    } = Cli::parse();

    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match resolve_config(content_dir, asset_base_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_OPERATIONAL);
        }
    };
    tracing::debug!(content_dir = %config.content_dir.display(), "resolved configuration");

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start runtime: {e}");
            return ExitCode::from(EXIT_OPERATIONAL);
        }
    };

    let result = runtime.block_on(async {
        match command {
            Commands::Validate(args) => run_validate(&args, &config).await,
            Commands::Assets(args) => run_assets(&args, &config).await,
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}
