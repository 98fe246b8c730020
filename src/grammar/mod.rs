//! File-name grammar for sprite images.
//!
//! Sprite identity, animation frame and resolution tier are all inferred
//! from the path of an image relative to its source root:
//!
//! ```text
//! <name>[<blend><digits>][@2x].<ext>
//! ```
//!
//! - `ext` is `png` or `jpg`, all lower or all upper case.
//! - `blend` is one of `-`, `~`, `+`, `=` and marks the digits after it as
//!   a frame number. Digits without a blend character in front are part of
//!   the name (`planet/earth2.png` is the sprite `planet/earth2`).
//! - `@2x` marks the high-DPI variant of a frame.
//!
//! The leading directory decides the sprite category: `ship/` and
//! `asteroid/` sprites get collision masks, `land/` sprites are loaded on
//! demand. These strings are part of the on-disk asset contract.

mod blend;
mod tokens;

pub use blend::BlendMode;
pub use tokens::{is_high_dpi, is_image, FrameSuffix, ImagePath};

/// Directory prefix of sprites that are loaded lazily.
pub const DEFERRED_PREFIX: &str = "land/";

/// Directory prefixes of sprites that need collision masks.
pub const MASKED_PREFIXES: [&str; 2] = ["ship/", "asteroid/"];

/// Byte offset where the sprite name ends and the suffix begins.
pub fn name_end(path: &str) -> usize {
    ImagePath::parse(path).name_end()
}

/// The sprite name encoded in a path.
pub fn name(path: &str) -> &str {
    ImagePath::parse(path).name()
}

/// The animation frame encoded in a path, 0 when there is none.
pub fn frame_index(path: &str) -> usize {
    ImagePath::parse(path).frame()
}

/// The blend mode encoded in a path.
pub fn blend_mode(path: &str) -> BlendMode {
    ImagePath::parse(path).blend()
}

/// Whether the path or sprite name belongs to a lazily loaded category.
pub fn is_deferred(path: &str) -> bool {
    path.starts_with(DEFERRED_PREFIX)
}

/// Whether the path or sprite name belongs to a collidable category.
pub fn is_masked(path: &str) -> bool {
    MASKED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}
