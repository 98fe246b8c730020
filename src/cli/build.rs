//! Build command implementation.
//!
//! Loads every sprite in parallel, uploads the results into in-memory
//! sprites on this thread, and writes a `sprites.json` summary plus
//! optional distance-field previews.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::discovery::Catalog;
use crate::error::{Result, SpriteError};
use crate::grammar;
use crate::output::{display_path, plural, Printer};
use crate::sprite::Sprite;
use crate::validation::{print_diagnostics, ValidationResult};

/// Name of the summary file written to the output directory.
pub const SUMMARY_FILENAME: &str = "sprites.json";

/// Subdirectory of the output directory holding preview images.
pub const PREVIEW_DIR: &str = "previews";

/// Load sprites, build masks and distance fields, write a summary
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Files or directories to scan (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Output directory (default: manifest output, or dist)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also load sprites that are normally loaded on demand
    #[arg(long)]
    pub deferred: bool,

    /// Write distance field previews
    #[arg(long)]
    pub previews: bool,
}

/// One entry of `sprites.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteSummary {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub frames: usize,
    pub high_dpi: bool,
    pub masked: bool,
    pub deferred: bool,
    /// Outline vertex count per frame; empty when the sprite has no masks.
    pub outline_points: Vec<usize>,
}

impl SpriteSummary {
    pub fn of(sprite: &Sprite) -> Self {
        Self {
            name: sprite.name().to_string(),
            width: sprite.width(),
            height: sprite.height(),
            frames: sprite.frames(),
            high_dpi: sprite.has_high_dpi(),
            masked: grammar::is_masked(sprite.name()),
            deferred: grammar::is_deferred(sprite.name()),
            outline_points: sprite.masks().iter().map(|m| m.outline().len()).collect(),
        }
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let discovery = super::discover_inputs(&args.paths)?;
    let manifest = &discovery.manifest;

    let output = match &args.output {
        Some(dir) => dir.clone(),
        None if discovery.has_manifest => discovery.root.join(&manifest.output),
        None => manifest.output.clone(),
    };
    let include_deferred = args.deferred || manifest.deferred;
    let previews = args.previews || manifest.previews;

    let catalog = discovery.into_catalog();
    let mut report = catalog.check_all();

    let (sprites, load_report) = load_sprites(&catalog, include_deferred, printer);
    report.merge(load_report);

    fs::create_dir_all(&output).map_err(|e| SpriteError::Io {
        path: output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let summary_path = write_summary(&sprites, &output)?;
    printer.status("Writing", &display_path(&summary_path));

    if previews {
        let written = write_previews(&sprites, &output.join(PREVIEW_DIR))?;
        printer.status("Writing", &plural(written, "preview", "previews"));
    }

    if !report.is_ok() {
        print_diagnostics(&report, printer);
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}",
            plural(sprites.len(), "sprite", "sprites"),
            display_path(&output)
        ),
    );

    Ok(())
}

/// Load the catalog and upload each set into a [`Sprite`] on this thread.
///
/// Returns the sprites in name order together with every load diagnostic.
pub fn load_sprites(
    catalog: &Catalog,
    include_deferred: bool,
    printer: &Printer,
) -> (Vec<Sprite>, ValidationResult) {
    let mut sprites = Vec::new();
    let mut report = ValidationResult::new();

    catalog.load_each(include_deferred, |loaded| {
        printer.status("Loaded", loaded.name());
        report.merge(loaded.report().clone());

        let mut sprite = Sprite::new(loaded.name());
        loaded.upload(&mut sprite);
        sprites.push(sprite);
    });

    sprites.sort_by(|a, b| a.name().cmp(b.name()));
    (sprites, report)
}

/// Write `sprites.json` into `dir` and return its path.
pub fn write_summary(sprites: &[Sprite], dir: &Path) -> Result<PathBuf> {
    let summary: Vec<SpriteSummary> = sprites.iter().map(SpriteSummary::of).collect();
    let json = serde_json::to_string_pretty(&summary).map_err(|e| SpriteError::Build {
        message: format!("Failed to serialize summary: {}", e),
        help: None,
    })?;

    let path = dir.join(SUMMARY_FILENAME);
    fs::write(&path, json).map_err(|e| SpriteError::Io {
        path: path.clone(),
        message: format!("Failed to write summary: {}", e),
    })?;
    Ok(path)
}

/// Write a preview PNG for every sprite with a distance field.
///
/// Sprite names keep their directories: `ship/fighter` is written to
/// `<dir>/ship/fighter.png`.
pub fn write_previews(sprites: &[Sprite], dir: &Path) -> Result<usize> {
    let mut written = 0;
    for sprite in sprites {
        let field = sprite.distance_field();
        if field.is_empty() {
            continue;
        }

        let path = dir.join(format!("{}.png", sprite.name()));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SpriteError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create preview directory: {}", e),
            })?;
        }
        field.write_preview(&path)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_frame(root: &Path, relative: &str, size: u32) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut img = RgbaImage::new(size, size);
        for y in size / 4..size * 3 / 4 {
            for x in size / 4..size * 3 / 4 {
                img.put_pixel(x, y, Rgba([200, 100, 50, 255]));
            }
        }
        img.save(path).unwrap();
    }

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "images/ship/fighter.png", 16);
        write_frame(dir.path(), "images/ship/fighter-1.png", 16);
        write_frame(dir.path(), "images/ship/fighter@2x.png", 32);
        write_frame(dir.path(), "images/land/beach.png", 8);
        write_frame(dir.path(), "images/effect/spark.png", 8);
        dir
    }

    #[test]
    fn test_load_sprites_skips_deferred() {
        let dir = project();
        let mut catalog = Catalog::new();
        for relative in ["ship/fighter.png", "land/beach.png", "effect/spark.png"] {
            catalog.add(relative, dir.path().join("images").join(relative));
        }

        let (sprites, report) = load_sprites(&catalog, false, &Printer::plain());
        let names: Vec<&str> = sprites.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["effect/spark", "ship/fighter"]);
        assert!(report.is_ok());

        let (sprites, _) = load_sprites(&catalog, true, &Printer::plain());
        assert_eq!(sprites.len(), 3);
    }

    #[test]
    fn test_summary_of_masked_sprite() {
        let dir = project();
        let mut catalog = Catalog::new();
        for relative in ["ship/fighter.png", "ship/fighter-1.png", "ship/fighter@2x.png"] {
            catalog.add(relative, dir.path().join("images").join(relative));
        }

        let (sprites, _) = load_sprites(&catalog, false, &Printer::plain());
        assert_eq!(
            SpriteSummary::of(&sprites[0]),
            SpriteSummary {
                name: "ship/fighter".to_string(),
                width: 16,
                height: 16,
                frames: 2,
                high_dpi: true,
                masked: true,
                deferred: false,
                outline_points: vec![4, 4],
            }
        );
    }

    #[test]
    fn test_run_writes_summary_and_previews() {
        let dir = project();
        let out = dir.path().join("out");

        let args = BuildArgs {
            paths: vec![dir.path().join("images")],
            output: Some(out.clone()),
            deferred: true,
            previews: true,
        };
        run(args, &Printer::plain()).unwrap();

        let json = fs::read_to_string(out.join(SUMMARY_FILENAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["effect/spark", "land/beach", "ship/fighter"]);
        assert_eq!(value[2]["frames"], 2);
        assert_eq!(value[1]["deferred"], true);

        assert!(out.join(PREVIEW_DIR).join("ship/fighter.png").exists());
        assert!(!out.join(PREVIEW_DIR).join("effect/spark.png").exists());
    }

    #[test]
    fn test_manifest_enables_deferred() {
        let dir = project();
        fs::write(dir.path().join("spriteset.yaml"), "output: build\ndeferred: true\n").unwrap();

        let discovery = crate::discovery::discover(dir.path()).unwrap();
        assert_eq!(
            discovery.root.join(&discovery.manifest.output),
            dir.path().join("build")
        );
        let include_deferred = discovery.manifest.deferred;

        let catalog = discovery.into_catalog();
        let (sprites, _) = load_sprites(&catalog, include_deferred, &Printer::plain());
        assert_eq!(sprites.len(), 3);

        let path = write_summary(&sprites, dir.path()).unwrap();
        assert_eq!(path, dir.path().join(SUMMARY_FILENAME));
    }

    #[test]
    fn test_rebuild_ignores_written_previews() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "ship/a.png", 16);

        let names = |root: &Path| -> Vec<String> {
            let catalog = crate::discovery::discover(root).unwrap().into_catalog();
            catalog.iter().map(|s| s.name().to_string()).collect()
        };
        assert_eq!(names(dir.path()), vec!["ship/a"]);

        let catalog = crate::discovery::discover(dir.path()).unwrap().into_catalog();
        let (sprites, _) = load_sprites(&catalog, false, &Printer::plain());
        let previews = dir.path().join("dist").join(PREVIEW_DIR);
        assert_eq!(write_previews(&sprites, &previews).unwrap(), 1);
        assert!(previews.join("ship/a.png").exists());

        assert_eq!(names(dir.path()), vec!["ship/a"]);
    }
}
