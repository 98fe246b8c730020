//! Sprites and the interface loaded frames are handed to.

use glam::Vec2;

use crate::distance::DistanceField;
use crate::mask::Mask;
use crate::pixels::ImageBuffer;

/// Receives the finished data for one sprite.
///
/// Every method takes ownership; the caller keeps nothing.
pub trait SpriteTarget {
    /// Add the frames of one tier. `high_dpi` marks the `@2x` tier.
    fn add_frames(&mut self, buffer: ImageBuffer, high_dpi: bool);

    /// Add one collision mask per frame.
    fn add_masks(&mut self, masks: Vec<Mask>);

    /// Add the signed distance field for the masks.
    fn add_mask_distances(&mut self, distances: DistanceField);
}

/// A sprite held in memory.
#[derive(Debug, Default)]
pub struct Sprite {
    name: String,
    width: u32,
    height: u32,
    frames: usize,
    standard: Option<ImageBuffer>,
    high_dpi: Option<ImageBuffer>,
    masks: Vec<Mask>,
    distances: DistanceField,
}

impl Sprite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of a 1x frame in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Offset from the top left corner to the centre.
    pub fn center(&self) -> Vec2 {
        0.5 * Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn frames_for(&self, high_dpi: bool) -> Option<&ImageBuffer> {
        if high_dpi {
            self.high_dpi.as_ref()
        } else {
            self.standard.as_ref()
        }
    }

    pub fn has_high_dpi(&self) -> bool {
        self.high_dpi.is_some()
    }

    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    /// The collision mask for a frame, if this sprite has masks.
    pub fn mask(&self, frame: usize) -> Option<&Mask> {
        self.masks.get(frame)
    }

    pub fn distance_field(&self) -> &DistanceField {
        &self.distances
    }

    /// Free the pixel data. Masks stay, since collision still needs them.
    pub fn unload(&mut self) {
        self.standard = None;
        self.high_dpi = None;
        self.distances = DistanceField::default();
        self.width = 0;
        self.height = 0;
        self.frames = 0;
    }
}

impl SpriteTarget for Sprite {
    fn add_frames(&mut self, buffer: ImageBuffer, high_dpi: bool) {
        if buffer.is_empty() {
            return;
        }

        if high_dpi {
            // Only take the size from @2x frames when no 1x frames exist.
            if self.width == 0 {
                self.width = buffer.width() / 2;
                self.height = buffer.height() / 2;
                self.frames = buffer.frames();
            }
            self.high_dpi = Some(buffer);
        } else {
            self.width = buffer.width();
            self.height = buffer.height();
            self.frames = buffer.frames();
            self.standard = Some(buffer);
        }
    }

    fn add_masks(&mut self, masks: Vec<Mask>) {
        self.masks = masks;
    }

    fn add_mask_distances(&mut self, distances: DistanceField) {
        self.distances = distances;
    }
}
