//! Review page asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

const BASE: &str = include_str!("../assets/base.css");
const REVIEW: &str = include_str!("../assets/review.css");
const SCRIPT: &str = include_str!("../assets/review.js");

/// Writes the bundled stylesheet and script to the assets directory
pub fn write_assets(assets_dir: &Path) -> Result<()> {
    fs::create_dir_all(assets_dir).with_context(|| {
        format!(
            "Failed to create assets directory: {}",
            assets_dir.display()
        )
    })?;
    write_bundled(assets_dir, "review.css", &[BASE, REVIEW])?;
    write_bundled(assets_dir, "review.js", &[SCRIPT])?;
    Ok(())
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let content = parts.join("\n");
    fs::write(dir.join(name), content)
        .with_context(|| format!("Failed to write asset: {}", name))?;
    Ok(())
}
