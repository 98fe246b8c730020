//! Loading frames into memory and handing them to a sprite.

use crate::distance::DistanceField;
use crate::mask::Mask;
use crate::pixels::ImageBuffer;
use crate::sprite::SpriteTarget;
use crate::validation::{Diagnostic, Severity, ValidationResult};

use super::{FrameSet, Tier};

pub const DECODE_FAILED: &str = "spriteset::load::decode";

/// Decoded pixels, masks and distance field for one sprite.
///
/// This is the transferable half of a sprite's lifecycle: it is built on a
/// worker thread by [`FrameSet::load`] and consumed by [`upload`](Self::upload)
/// on the thread that owns the render target.
#[derive(Debug)]
pub struct LoadedFrameSet {
    name: String,
    standard: ImageBuffer,
    high_dpi: ImageBuffer,
    masks: Vec<Mask>,
    distances: DistanceField,
    report: ValidationResult,
}

impl FrameSet {
    /// Decode every frame and build masks and distances when the sprite's
    /// category needs them.
    ///
    /// Unfilled slots and files that fail to decode leave their frame empty;
    /// failures are recorded on the report rather than returned.
    pub fn load(&self) -> LoadedFrameSet {
        let frames = self.frame_count();
        let mut standard = ImageBuffer::new(frames);
        let mut high_dpi = ImageBuffer::new(frames);
        let mut report = ValidationResult::new();

        let make_masks = self.is_masked();
        let mut masks = if make_masks {
            vec![Mask::default(); frames]
        } else {
            Vec::new()
        };

        // All 1x files first, then all @2x files: the tiers usually live in
        // different directories.
        for i in 0..frames {
            let Some(path) = self.path(Tier::Standard, i) else {
                continue;
            };
            match standard.read(path, i) {
                Ok(()) if make_masks => masks[i] = Mask::create(&standard, i),
                Ok(()) => {}
                Err(e) => report.push(decode_failure(self.name(), i, e)),
            }
        }

        // The 1x frame count is authoritative; surplus @2x frames are skipped.
        let high_dpi_frames = frames.min(self.high_dpi_count());
        for i in 0..high_dpi_frames {
            let Some(path) = self.path(Tier::HighDpi, i) else {
                continue;
            };
            if let Err(e) = high_dpi.read(path, i) {
                report.push(decode_failure(self.name(), i, e));
            }
        }

        let distances = DistanceField::generate(&standard, &masks);

        LoadedFrameSet {
            name: self.name().to_string(),
            standard,
            high_dpi,
            masks,
            distances,
            report,
        }
    }
}

fn decode_failure(name: &str, frame: usize, error: crate::error::SpriteError) -> Diagnostic {
    Diagnostic::frame(Severity::Warning, DECODE_FAILED, name, frame, error)
        .with_help("The frame is left empty")
}

impl LoadedFrameSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buffer(&self, tier: Tier) -> &ImageBuffer {
        match tier {
            Tier::Standard => &self.standard,
            Tier::HighDpi => &self.high_dpi,
        }
    }

    /// One mask per frame for collidable sprites, empty otherwise.
    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    pub fn distances(&self) -> &DistanceField {
        &self.distances
    }

    /// Decode failures encountered while loading.
    pub fn report(&self) -> &ValidationResult {
        &self.report
    }

    /// Move everything into the target. Must run on the thread that owns
    /// the target's resources.
    pub fn upload<T: SpriteTarget + ?Sized>(self, target: &mut T) {
        let LoadedFrameSet {
            standard,
            high_dpi,
            masks,
            distances,
            ..
        } = self;

        target.add_frames(standard, false);
        target.add_frames(high_dpi, true);
        target.add_masks(masks);
        target.add_mask_distances(distances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::Sprite;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::tempdir;

    /// A frame with a solid square in the middle third.
    fn write_frame(path: &Path, size: u32) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img = RgbaImage::from_fn(size, size, |x, y| {
            let third = size / 3;
            let solid = (third..2 * third).contains(&x) && (third..2 * third).contains(&y);
            Rgba([10, 20, 30, if solid { 255 } else { 0 }])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_load_masked_sprite() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_frame(&root.join("ship/fighter.png"), 24);
        write_frame(&root.join("ship/fighter-1.png"), 24);
        write_frame(&root.join("ship/fighter@2x.png"), 48);

        let mut set = FrameSet::new("ship/fighter");
        set.add(root.join("ship/fighter.png"));
        set.add(root.join("ship/fighter-1.png"));
        set.add(root.join("ship/fighter@2x.png"));

        let loaded = set.load();
        assert!(loaded.report().is_ok());
        assert_eq!(loaded.buffer(Tier::Standard).loaded_count(), 2);
        assert_eq!(loaded.buffer(Tier::HighDpi).loaded_count(), 1);
        assert_eq!(loaded.masks().len(), 2);
        assert!(loaded.masks().iter().all(|m| !m.is_empty()));

        let field = loaded.distances();
        assert_eq!((field.width(), field.height(), field.frames()), (12, 12, 2));
        // The centre of the field is inside the solid square.
        assert!(field.value(0, 6, 6).unwrap() < 0.0);
        assert!(field.value(1, 0, 0).unwrap() > 0.0);
    }

    #[test]
    fn test_load_unmasked_sprite_has_no_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("effect/glow.png");
        write_frame(&path, 9);

        let mut set = FrameSet::new("effect/glow");
        set.add(&path);

        let loaded = set.load();
        assert!(loaded.masks().is_empty());
        assert!(loaded.distances().is_empty());
        assert_eq!(loaded.buffer(Tier::Standard).width(), 9);
    }

    #[test]
    fn test_load_tolerates_gaps_and_failures() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_frame(&root.join("asteroid/rock-2.png"), 12);
        std::fs::write(root.join("asteroid/rock-1.png"), b"not a png").unwrap();

        let mut set = FrameSet::new("asteroid/rock");
        set.add(root.join("asteroid/rock-1.png"));
        set.add(root.join("asteroid/rock-2.png"));

        let loaded = set.load();
        assert_eq!(loaded.report().with_code(DECODE_FAILED).count(), 1);
        assert_eq!(loaded.masks().len(), 3);
        assert!(loaded.masks()[0].is_empty());
        assert!(loaded.masks()[1].is_empty());
        assert!(!loaded.masks()[2].is_empty());

        let field = loaded.distances();
        assert!(field.frame(0).unwrap().iter().all(|&v| v == f32::INFINITY));
        assert!(field.frame(2).unwrap().iter().any(|&v| v < 0.0));
    }

    #[test]
    fn test_load_skips_surplus_high_dpi() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_frame(&root.join("effect/spark.png"), 6);
        write_frame(&root.join("effect/spark@2x.png"), 12);
        write_frame(&root.join("effect/spark-1@2x.png"), 12);

        let mut set = FrameSet::new("effect/spark");
        set.add(root.join("effect/spark.png"));
        set.add(root.join("effect/spark@2x.png"));
        set.add(root.join("effect/spark-1@2x.png"));

        let loaded = set.load();
        assert_eq!(loaded.buffer(Tier::HighDpi).frames(), 1);
        assert_eq!(loaded.buffer(Tier::HighDpi).loaded_count(), 1);
    }

    #[test]
    fn test_upload_moves_data_and_keeps_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ship/scout.png");
        write_frame(&path, 12);

        let mut set = FrameSet::new("ship/scout");
        set.add(&path);

        let mut sprite = Sprite::new(set.name());
        set.load().upload(&mut sprite);

        assert_eq!(sprite.frames(), 1);
        assert_eq!((sprite.width(), sprite.height()), (12, 12));
        assert!(sprite.mask(0).is_some_and(|m| !m.is_empty()));
        assert_eq!(sprite.distance_field().width(), 6);

        // The descriptor can be loaded again.
        assert_eq!(set.frame_count(), 1);
        assert_eq!(set.load().buffer(Tier::Standard).loaded_count(), 1);
    }
}
