//! Cache-busting for the static site build.
//!
//! Renames selected assets in the dist directory to `<stem>.<hash><ext>` and
//! rewrites references in every HTML file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tamm_api::adapters::assets::AssetHasher;

#[derive(Parser, Debug)]
#[command(name = "hash-assets")]
#[command(about = "Content-hash static assets and update HTML references", long_about = None)]
struct Args {
    /// Build output directory.
    #[arg(default_value = "dist")]
    dist: PathBuf,

    /// Report what would change without touching any file.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("Hashing static assets...\n");
    let report = AssetHasher::new(&args.dist)
        .dry_run(args.dry_run)
        .run()
        .with_context(|| format!("failed to hash assets in {}", args.dist.display()))?;

    if report.is_empty() {
        println!("No files to hash.");
        return Ok(());
    }

    for rename in &report.renames {
        println!("  {} → {}", rename.from, rename.to);
    }

    println!("\nUpdating HTML references...");
    for html in &report.updated_html {
        println!("  Updated: {html}");
    }

    if args.dry_run {
        println!("\nDry run: would hash {} files.", report.renames.len());
    } else {
        println!("\nDone! Hashed {} files.", report.renames.len());
    }
    Ok(())
}
