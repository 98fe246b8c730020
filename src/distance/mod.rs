//! Signed distance fields for collision masks.
//!
//! The field is sampled at half the resolution of the standard-tier frames.
//! Each value is the exact distance from the sample point to the nearest
//! point on the mask outline, negative inside the mask, and scaled so that
//! 1.0 is half the length of the frame's diagonal.

use std::path::Path;

use glam::Vec2;
use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::error::{Result, SpriteError};
use crate::mask::Mask;
use crate::pixels::ImageBuffer;

/// Flattened `width * height * frames` raster of signed distances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceField {
    width: usize,
    height: usize,
    frames: usize,
    values: Vec<f32>,
}

impl DistanceField {
    /// Generate the field for every frame that has a mask.
    ///
    /// An empty mask list gives an empty field. Frames whose mask has no
    /// outline are filled with `+inf`.
    pub fn generate(image: &ImageBuffer, masks: &[Mask]) -> Self {
        if masks.is_empty() {
            return Self::default();
        }

        let width = image.width() as usize / 2;
        let height = image.height() as usize / 2;
        let normalize = 2.0 / Vec2::new(image.width() as f32, image.height() as f32).length();
        let center = Vec2::new(0.5 * width as f32, 0.5 * height as f32);

        let mut values = vec![f32::INFINITY; width * height * masks.len()];
        if width > 0 && height > 0 {
            values
                .par_chunks_mut(width * height)
                .zip(masks.par_iter())
                .filter(|(_, mask)| !mask.is_empty())
                .for_each(|(frame, mask)| {
                    frame
                        .par_chunks_mut(width)
                        .enumerate()
                        .for_each(|(y, row)| {
                            for (x, value) in row.iter_mut().enumerate() {
                                let p = Vec2::new(x as f32, y as f32) - center;
                                *value = signed_distance(mask, p) * normalize;
                            }
                        });
                });
        }

        Self {
            width,
            height,
            frames: masks.len(),
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    /// All samples of one frame, row-major.
    pub fn frame(&self, frame: usize) -> Option<&[f32]> {
        let len = self.width * self.height;
        self.values.get(frame * len..(frame + 1) * len)
    }

    pub fn value(&self, frame: usize, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.frame(frame).map(|f| f[y * self.width + x])
    }

    /// Write a grayscale preview with the frames laid out left to right.
    ///
    /// The outline maps to 128, the inside is brighter and the outside
    /// darker; one unit of normalized distance spans the full range.
    pub fn write_preview(&self, path: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(SpriteError::Build {
                message: format!("no distance field to preview for {}", path.display()),
                help: None,
            });
        }

        let mut img = GrayImage::new((self.width * self.frames) as u32, self.height as u32);
        for frame in 0..self.frames {
            for y in 0..self.height {
                for x in 0..self.width {
                    let d = self.value(frame, x, y).unwrap_or(f32::INFINITY);
                    let level = (128.0 - d * 128.0).clamp(0.0, 255.0) as u8;
                    img.put_pixel((frame * self.width + x) as u32, y as u32, Luma([level]));
                }
            }
        }

        img.save(path).map_err(|e| SpriteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write preview: {}", e),
        })
    }
}

/// Unscaled signed distance from `p` to the mask outline.
pub fn signed_distance(mask: &Mask, p: Vec2) -> f32 {
    let sign = if mask.contains(p, 0.0) { -1.0 } else { 1.0 };
    sign * nearest_squared(mask.outline(), p).sqrt()
}

/// Squared distance from `p` to the closest point on a closed outline.
pub fn nearest_squared(outline: &[Vec2], p: Vec2) -> f32 {
    let Some(&last) = outline.last() else {
        return f32::INFINITY;
    };

    let mut closest = f32::INFINITY;
    let mut prev = last;
    for &cur in outline {
        let segment = cur - prev;
        let mut dist = p - prev;
        let length_squared = segment.length_squared();
        let t = if length_squared > 0.0 {
            dist.dot(segment) / length_squared
        } else {
            0.0
        };
        // Points past `cur` are measured when `cur` starts the next edge.
        if t < 1.0 {
            if t > 0.0 {
                dist -= t * segment;
            }
            closest = closest.min(dist.length_squared());
        }
        prev = cur;
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::BlendMode;

    fn square(half: f32) -> Mask {
        Mask::from_outline(vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ])
    }

    fn blank_buffer(width: u32, height: u32, frames: usize) -> ImageBuffer {
        let mut buffer = ImageBuffer::new(frames);
        let pixels = vec![0; (width * height * 4) as usize];
        buffer
            .insert_rgba(0, width, height, pixels, BlendMode::Normal)
            .unwrap();
        buffer
    }

    #[test]
    fn test_nearest_edge_midpoint_is_zero() {
        let outline = square(4.0).outline().to_vec();
        assert!(nearest_squared(&outline, Vec2::new(4.0, 0.0)) < 1e-6);
        assert!(nearest_squared(&outline, Vec2::new(0.0, -4.0)) < 1e-6);
    }

    #[test]
    fn test_nearest_corner_region() {
        let outline = square(1.0).outline().to_vec();
        let d = nearest_squared(&outline, Vec2::new(4.0, 5.0)).sqrt();
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_outline() {
        let outline = vec![Vec2::new(1.0, 1.0)];
        assert!((nearest_squared(&outline, Vec2::new(4.0, 5.0)) - 25.0).abs() < 1e-4);
        assert_eq!(nearest_squared(&[], Vec2::ZERO), f32::INFINITY);
    }

    #[test]
    fn test_signed_distance_sign() {
        let mask = square(2.0);
        assert!((signed_distance(&mask, Vec2::ZERO) + 2.0).abs() < 1e-5);
        assert!((signed_distance(&mask, Vec2::new(5.0, 0.0)) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_generate_dimensions_and_normalization() {
        let buffer = blank_buffer(30, 40, 1);
        let field = DistanceField::generate(&buffer, &[square(3.0)]);

        assert_eq!((field.width(), field.height(), field.frames()), (15, 20, 1));
        assert_eq!(field.values().len(), 15 * 20);

        // Sample (7.5, 10) is the field centre, but samples sit on integers:
        // (7, 10) maps to p = (-0.5, 0).
        let normalize = 2.0 / 50.0;
        let inside = field.value(0, 7, 10).unwrap();
        assert!(inside < 0.0);
        assert!((inside + 2.5 * normalize).abs() < 1e-5);

        // (0, 10) maps to p = (-7.5, 0), 4.5 left of the square.
        let outside = field.value(0, 0, 10).unwrap();
        assert!((outside - 4.5 * normalize).abs() < 1e-5);
    }

    #[test]
    fn test_generate_empty_mask_is_infinite() {
        let buffer = blank_buffer(8, 8, 2);
        let field = DistanceField::generate(&buffer, &[square(1.0), Mask::default()]);

        assert!(field.frame(0).unwrap().iter().all(|v| v.is_finite()));
        assert!(field
            .frame(1)
            .unwrap()
            .iter()
            .all(|&v| v == f32::INFINITY));
    }

    #[test]
    fn test_generate_without_masks() {
        let buffer = blank_buffer(8, 8, 1);
        assert!(DistanceField::generate(&buffer, &[]).is_empty());
    }

    #[test]
    fn test_write_preview() {
        let buffer = blank_buffer(8, 4, 2);
        let field = DistanceField::generate(&buffer, &[square(1.0), Mask::default()]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        field.write_preview(&path).unwrap();

        let img = image::open(&path).unwrap().to_luma8();
        assert_eq!((img.width(), img.height()), (8, 2));
        // Infinite distances clamp to black.
        assert_eq!(img.get_pixel(7, 1).0, [0]);
    }
}
