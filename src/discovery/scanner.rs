//! File system scanner for sprite images.
//!
//! Walks image roots and keeps every file whose name passes the image
//! grammar. Each file is recorded with its path relative to the root, since
//! that relative path is what names the sprite.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::grammar;

use super::manifest::Manifest;

/// An image file found under an image root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Path relative to the image root, `/`-separated.
    pub relative: String,
    /// Path on disk.
    pub path: PathBuf,
}

/// Result of scanning for images.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered image files.
    pub images: Vec<ImageFile>,
    /// Files skipped because their path is not valid UTF-8.
    pub unreadable: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered images.
    pub fn total(&self) -> usize {
        self.images.len()
    }

    /// Check if no images were discovered.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.images.extend(other.images);
        self.unreadable.extend(other.unreadable);
    }
}

/// Scan an image root recursively.
///
/// `output` is the build output directory. It is never descended into, so
/// preview images written by a build are not read back as sprites.
pub fn scan_directory(root: &Path, manifest: &Manifest, output: Option<&Path>) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !output.is_some_and(|out| same_path(e.path(), out))
        })
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if entry.file_type().is_dir() {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        if manifest.is_excluded(relative) {
            continue;
        }

        match relative_name(relative) {
            Some(name) if grammar::is_image(&name) => result.images.push(ImageFile {
                relative: name,
                path: path.to_path_buf(),
            }),
            Some(_) => {}
            None => result.unreadable.push(path.to_path_buf()),
        }
    }

    result
}

/// Compare paths ignoring `.` components, so `./dist` matches `dist`.
fn same_path(a: &Path, b: &Path) -> bool {
    fn significant(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<Vec<_>>()
    }
    significant(a) == significant(b)
}

/// Join the normal components of a relative path with `/`.
///
/// Returns `None` if any component is not valid UTF-8.
pub fn relative_name(relative: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect();
    parts.map(|p| p.join("/"))
}
