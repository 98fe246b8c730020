//! Image discovery for spriteset projects.
//!
//! Finds every sprite image under a project's image roots, either the ones
//! named in a `spriteset.yaml` manifest or the conventional `images/`
//! directory, and groups them into a [`Catalog`] of frame sets.
//!
//! # Example
//!
//! ```ignore
//! use spriteset::discovery::discover;
//!
//! let result = discover("./my-game")?;
//! println!("Found {} images", result.scan.total());
//!
//! let catalog = result.into_catalog();
//! ```

mod catalog;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use catalog::Catalog;
pub use manifest::{Manifest, DEFAULT_SOURCE};
pub use scanner::{relative_name, scan_directory, ImageFile, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "spriteset.yaml";

/// Result of discovering images in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (may be default if no spriteset.yaml found).
    pub manifest: Manifest,

    /// Whether a spriteset.yaml manifest was found.
    pub has_manifest: bool,

    /// Image roots that were scanned.
    pub sources: Vec<PathBuf>,

    /// Scan results with discovered files.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Group the discovered images into frame sets.
    pub fn into_catalog(self) -> Catalog {
        Catalog::from_scan(&self.scan)
    }
}

/// Discover images in a project directory.
///
/// Reads `spriteset.yaml` from the root if present and scans its sources.
/// Without a manifest, falls back to [`discover_conventional`].
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref();

    let manifest_path = root.join(MANIFEST_FILENAME);
    if !manifest_path.exists() {
        return Ok(discover_conventional(root));
    }

    let manifest = Manifest::load(&manifest_path)?;
    let sources: Vec<PathBuf> = manifest
        .effective_sources()
        .iter()
        .map(|s| resolve(root, s))
        .collect();

    Ok(scan_sources(root, manifest, true, sources))
}

/// Discover images without reading a manifest.
///
/// Scans `images/` below the root, or the root itself when there is no
/// such directory.
pub fn discover_conventional(root: impl AsRef<Path>) -> DiscoveryResult {
    let root = root.as_ref();
    let conventional = root.join(DEFAULT_SOURCE);
    let source = if conventional.is_dir() {
        conventional
    } else {
        root.to_path_buf()
    };

    scan_sources(root, Manifest::default(), false, vec![source])
}

fn scan_sources(
    root: &Path,
    manifest: Manifest,
    has_manifest: bool,
    sources: Vec<PathBuf>,
) -> DiscoveryResult {
    let output = root.join(&manifest.output);
    let mut scan = ScanResult::new();
    for source in &sources {
        scan.merge(scan_directory(source, &manifest, Some(&output)));
    }

    DiscoveryResult {
        root: root.to_path_buf(),
        manifest,
        has_manifest,
        sources,
        scan,
    }
}

/// Discover images from specific paths (no manifest lookup).
///
/// Directories are treated as image roots. A single file is named relative
/// to its own directory.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();
    let mut sources = Vec::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &manifest, Some(&manifest.output)));
            sources.push(path.clone());
        } else if path.is_file() {
            let file_name = path.file_name().map(Path::new);
            match file_name.and_then(relative_name) {
                Some(relative) if crate::grammar::is_image(&relative) => {
                    scan.images.push(ImageFile {
                        relative,
                        path: path.clone(),
                    });
                }
                Some(_) => {}
                None => scan.unreadable.push(path.clone()),
            }
        }
    }

    let root = paths
        .first()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        sources,
        scan,
    })
}

fn resolve(root: &Path, source: &str) -> PathBuf {
    if Path::new(source).is_absolute() {
        PathBuf::from(source)
    } else {
        root.join(source)
    }
}
