//! spriteset - Sprite frame assembly, collision masks and distance fields
//!
//! Groups animation frames by file name, validates the frame sequences,
//! decodes them in parallel, traces collision outlines and builds signed
//! distance fields, then hands everything to a [`SpriteTarget`].

pub mod cli;
pub mod discovery;
pub mod distance;
pub mod error;
pub mod frames;
pub mod grammar;
pub mod mask;
pub mod output;
pub mod pixels;
pub mod sprite;
pub mod validation;

pub use discovery::{
    discover, discover_conventional, discover_paths, Catalog, DiscoveryResult, Manifest,
    ScanResult,
};
pub use distance::DistanceField;
pub use error::{Result, SpriteError};
pub use frames::{FrameSet, FrameSlots, LoadedFrameSet, Tier};
pub use grammar::{BlendMode, ImagePath};
pub use mask::Mask;
pub use pixels::ImageBuffer;
pub use sprite::{Sprite, SpriteTarget};
pub use validation::{Diagnostic, Severity, ValidationResult};
