//! Build command - generates the site

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use drippy_core::BuildConfig;
use drippy_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Loads the configuration of the project at `root` and builds every page.
/// `minify` forces minified output regardless of the configuration.
pub fn run(root: &Path, minify: bool) -> Result<BuildStats> {
    tracing::info!(?root, minify, "Starting build");

    let mut config = BuildConfig::load(root).wrap_err("Failed to load configuration")?;
    if minify {
        config.minify = true;
    }

    tracing::debug!(?config, "Loaded configuration");

    let output = config.build_path.clone();
    let stats = Builder::new(config).build().wrap_err("Build failed")?;

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:       {}", stats.pages);
    println!("  Collections: {}", stats.collections);
    println!("  Indexes:     {}", stats.indexes);
    if stats.collisions > 0 {
        println!("  Overwrites:  {}", stats.collisions);
    }
    println!();
    println!("  Duration:    {}ms", stats.duration_ms);
    println!("  Output:      {}", output.display());
    println!();

    Ok(stats)
}
