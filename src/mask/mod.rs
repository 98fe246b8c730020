//! Collision masks.
//!
//! A mask is a closed polygon approximating the solid part of one frame.
//! Coordinates are centred on the frame and expressed at half the source
//! resolution, the same space the distance field samples in.

mod trace;

use glam::{Mat2, Vec2};

use crate::pixels::ImageBuffer;

pub use trace::{ALPHA_THRESHOLD, SIMPLIFY_TOLERANCE};

/// Closed outline of a frame's solid region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mask {
    outline: Vec<Vec2>,
    radius: f32,
}

impl Mask {
    /// Trace a mask from one frame of a pixel buffer.
    ///
    /// Frames that were never loaded, or have no solid pixel, give an empty
    /// mask.
    pub fn create(buffer: &ImageBuffer, frame: usize) -> Self {
        let raw: Vec<Vec2> = trace::trace(buffer, frame)
            .into_iter()
            .map(|(x, y)| Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
            .collect();
        if raw.is_empty() {
            return Self::default();
        }

        let size = Vec2::new(buffer.width() as f32, buffer.height() as f32);
        let outline = trace::simplify(&raw, SIMPLIFY_TOLERANCE)
            .into_iter()
            .map(|p| (p - 0.5 * size) * 0.5)
            .collect();
        Self::from_outline(outline)
    }

    /// Build a mask from an outline already in mask coordinates.
    pub fn from_outline(outline: Vec<Vec2>) -> Self {
        let radius = outline
            .iter()
            .map(|p| p.length())
            .fold(0.0f32, f32::max);
        Self { outline, radius }
    }

    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Distance from the origin to the farthest outline vertex.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Check whether a point lies inside the mask rotated by `angle`
    /// radians.
    pub fn contains(&self, point: Vec2, angle: f32) -> bool {
        if self.outline.len() < 3 {
            return false;
        }

        let p = Mat2::from_angle(-angle) * point;
        if p.length_squared() > self.radius * self.radius {
            return false;
        }

        // Even-odd crossing test against a ray toward +x.
        let mut inside = false;
        let mut prev = self.outline[self.outline.len() - 1];
        for &cur in &self.outline {
            if (cur.y > p.y) != (prev.y > p.y) {
                let x = prev.x + (p.y - prev.y) / (cur.y - prev.y) * (cur.x - prev.x);
                if p.x < x {
                    inside = !inside;
                }
            }
            prev = cur;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::BlendMode;
    use std::f32::consts::FRAC_PI_4;

    fn square(half: f32) -> Mask {
        Mask::from_outline(vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ])
    }

    fn solid_block(size: u32, inset: u32) -> ImageBuffer {
        let mut pixels = Vec::new();
        for y in 0..size {
            for x in 0..size {
                let inside = x >= inset && y >= inset && x < size - inset && y < size - inset;
                pixels.extend_from_slice(&[0, 0, 0, if inside { 255 } else { 0 }]);
            }
        }
        let mut buffer = ImageBuffer::new(1);
        buffer
            .insert_rgba(0, size, size, pixels, BlendMode::Normal)
            .unwrap();
        buffer
    }

    #[test]
    fn test_contains_square() {
        let mask = square(2.0);
        assert!(mask.contains(Vec2::ZERO, 0.0));
        assert!(mask.contains(Vec2::new(1.9, -1.9), 0.0));
        assert!(!mask.contains(Vec2::new(2.1, 0.0), 0.0));
        assert!(!mask.contains(Vec2::new(10.0, 10.0), 0.0));
    }

    #[test]
    fn test_contains_rotated() {
        let mask = square(2.0);
        // The corner direction of an unrotated square is inside; rotating by
        // 45 degrees turns a far corner point into one outside.
        let corner = Vec2::new(2.5, 0.0);
        assert!(!mask.contains(corner, 0.0));
        assert!(mask.contains(corner, FRAC_PI_4));
    }

    #[test]
    fn test_empty_mask_contains_nothing() {
        let mask = Mask::default();
        assert!(mask.is_empty());
        assert!(!mask.contains(Vec2::ZERO, 0.0));
    }

    #[test]
    fn test_create_from_block() {
        let buffer = solid_block(16, 4);
        let mask = Mask::create(&buffer, 0);

        assert!(!mask.is_empty());
        // Corners of the traced 8x8 block sit at pixel centres 4.5 and 11.5,
        // which become -1.75 and 1.75 in half-resolution centred space.
        for p in mask.outline() {
            assert!(p.x.abs() <= 1.75 + 1e-4, "{p}");
            assert!(p.y.abs() <= 1.75 + 1e-4, "{p}");
        }
        assert!(mask.contains(Vec2::ZERO, 0.0));
        assert!(!mask.contains(Vec2::new(3.0, 0.0), 0.0));
        assert!((mask.radius() - 1.75 * std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_create_from_transparent_frame() {
        let buffer = solid_block(8, 4);
        assert!(Mask::create(&buffer, 0).is_empty());
    }

    #[test]
    fn test_create_from_unloaded_frame() {
        let buffer = ImageBuffer::new(2);
        assert!(Mask::create(&buffer, 1).is_empty());
    }
}
