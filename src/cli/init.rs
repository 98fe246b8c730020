//! Init command implementation.
//!
//! Generates a `spriteset.yaml` manifest from discovered image roots.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, discover_conventional, MANIFEST_FILENAME};
use crate::error::{Result, SpriteError};
use crate::output::{display_path, plural, Printer};

/// Initialize a spriteset project by generating a spriteset.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing spriteset.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(SpriteError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));

    // A manifest being replaced may be unreadable; fall back to convention.
    let discovery = match discover(&args.path) {
        Ok(discovery) => discovery,
        Err(_) if args.force => discover_conventional(&args.path),
        Err(e) => return Err(e),
    };

    let sources: Vec<String> = discovery
        .sources
        .iter()
        .map(|source| source_entry(&discovery.root, source))
        .collect();

    // Sprite names are relative to their root, so every root is listed
    // explicitly rather than inferred from image parents.
    let mut yaml = String::from("sources:\n");
    for source in &sources {
        yaml.push_str(&format!("  - \"{}\"\n", source));
    }
    yaml.push_str("output: dist\n");
    yaml.push_str("deferred: false\n");
    yaml.push_str("previews: false\n");

    fs::write(&manifest_path, &yaml).map_err(|e| SpriteError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    let sprites = discovery.into_catalog().len();
    printer.info("Sources", &sources.join(", "));
    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(sprites, "sprite", "sprites")
        ),
    );

    Ok(())
}

fn source_entry(root: &Path, source: &Path) -> String {
    match source.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => format!("{}/", relative.display()),
        Err(_) => source.display().to_string(),
    }
}
