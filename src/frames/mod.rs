//! Per-sprite frame assembly.
//!
//! A [`FrameSet`] collects the image paths that make up one sprite, one slot
//! per animation frame and resolution tier. It is cheap and always valid,
//! and can be loaded any number of times. Loading produces a
//! [`LoadedFrameSet`] holding the decoded pixels, masks and distance field;
//! uploading moves that data into a [`SpriteTarget`](crate::sprite::SpriteTarget)
//! and consumes it.
//!
//! ```ignore
//! let mut set = FrameSet::new("ship/fighter");
//! set.add("images/ship/fighter.png");
//! set.add("images/ship/fighter-1.png");
//! print_diagnostics(&set.check());
//!
//! let loaded = set.load();
//! loaded.upload(&mut sprite);
//! ```

mod check;
mod load;
mod slots;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::grammar::{self, ImagePath};

pub use load::LoadedFrameSet;
pub use slots::FrameSlots;

/// Resolution tier of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Standard,
    HighDpi,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Standard, Tier::HighDpi];

    /// The tier a path belongs to, from its `@2x` marker.
    pub fn of(path: &str) -> Self {
        if grammar::is_high_dpi(path) {
            Tier::HighDpi
        } else {
            Tier::Standard
        }
    }

    fn index(self) -> usize {
        match self {
            Tier::Standard => 0,
            Tier::HighDpi => 1,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Standard => write!(f, "1x"),
            Tier::HighDpi => write!(f, "@2x"),
        }
    }
}

/// The image paths that make up one sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    name: String,
    paths: [FrameSlots<PathBuf>; 2],
}

impl FrameSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paths: [FrameSlots::new(), FrameSlots::new()],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Put a path into the slot its file name describes.
    ///
    /// The caller is responsible for only adding paths whose sprite name
    /// matches this set. A later path for the same slot replaces an
    /// earlier one.
    pub fn add(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let parsed_from = path.to_string_lossy().into_owned();
        let parsed = ImagePath::parse(&parsed_from);
        let tier = if parsed.is_high_dpi() {
            Tier::HighDpi
        } else {
            Tier::Standard
        };
        self.paths[tier.index()].set(parsed.frame(), path);
    }

    pub fn paths(&self, tier: Tier) -> &FrameSlots<PathBuf> {
        &self.paths[tier.index()]
    }

    pub fn path(&self, tier: Tier, frame: usize) -> Option<&Path> {
        self.paths(tier).get(frame).map(PathBuf::as_path)
    }

    /// Number of animation frames. The standard tier is authoritative.
    pub fn frame_count(&self) -> usize {
        self.paths(Tier::Standard).len()
    }

    /// Number of high-DPI slots, including any beyond the frame count.
    pub fn high_dpi_count(&self) -> usize {
        self.paths(Tier::HighDpi).len()
    }

    pub fn is_masked(&self) -> bool {
        grammar::is_masked(&self.name)
    }

    pub fn is_deferred(&self) -> bool {
        grammar::is_deferred(&self.name)
    }
}
