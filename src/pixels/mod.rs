//! Decoded pixel storage for every frame of one sprite tier.
//!
//! All frames of a sprite share one size, which is only known once the
//! first frame has been decoded. Storage is therefore a single flat RGBA
//! allocation made on the first successful read.

use std::path::Path;

use crate::error::{Result, SpriteError};
use crate::grammar::{self, BlendMode};

const CHANNELS: usize = 4;

/// Premultiplied RGBA frames of identical size.
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    frames: usize,
    loaded: Vec<bool>,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a buffer with room for `frames` frames.
    pub fn new(frames: usize) -> Self {
        let mut buffer = Self::default();
        buffer.clear(frames);
        buffer
    }

    /// Drop all pixel data and prepare to hold `frames` frames.
    pub fn clear(&mut self, frames: usize) {
        self.width = 0;
        self.height = 0;
        self.frames = frames;
        self.loaded = vec![false; frames];
        self.data = Vec::new();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// True when no frame has been decoded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_loaded(&self, frame: usize) -> bool {
        self.loaded.get(frame).copied().unwrap_or(false)
    }

    /// Number of frames holding decoded pixels.
    pub fn loaded_count(&self) -> usize {
        self.loaded.iter().filter(|&&l| l).count()
    }

    /// RGBA bytes of one frame, row-major.
    pub fn frame(&self, frame: usize) -> Option<&[u8]> {
        if !self.is_loaded(frame) {
            return None;
        }
        let len = self.frame_len();
        self.data.get(frame * len..(frame + 1) * len)
    }

    /// Alpha at a pixel, 0 outside the frame or for frames never loaded.
    pub fn alpha(&self, frame: usize, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0;
        }
        self.frame(frame)
            .map(|pixels| {
                let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
                pixels[i + 3]
            })
            .unwrap_or(0)
    }

    /// Decode the image at `path` into the given frame slot.
    ///
    /// The blend mode is taken from the file name and decides how colour is
    /// premultiplied.
    pub fn read(&mut self, path: &Path, frame: usize) -> Result<()> {
        if frame >= self.frames {
            return Err(SpriteError::Decode {
                path: path.to_path_buf(),
                message: format!("frame {} is outside a {}-frame buffer", frame, self.frames),
            });
        }

        let image = image::open(path)
            .map_err(|e| SpriteError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .into_rgba8();

        let blend = grammar::blend_mode(&path.to_string_lossy());
        self.store(path, frame, image.width(), image.height(), image.into_raw(), blend)
    }

    /// Store already-decoded straight-alpha RGBA pixels into a frame slot.
    pub fn insert_rgba(
        &mut self,
        frame: usize,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        blend: BlendMode,
    ) -> Result<()> {
        self.store(Path::new("<memory>"), frame, width, height, pixels, blend)
    }

    fn store(
        &mut self,
        path: &Path,
        frame: usize,
        width: u32,
        height: u32,
        mut pixels: Vec<u8>,
        blend: BlendMode,
    ) -> Result<()> {
        if frame >= self.frames {
            return Err(SpriteError::Decode {
                path: path.to_path_buf(),
                message: format!("frame {} is outside a {}-frame buffer", frame, self.frames),
            });
        }
        if pixels.len() != width as usize * height as usize * CHANNELS {
            return Err(SpriteError::Decode {
                path: path.to_path_buf(),
                message: format!("expected {}x{} RGBA pixels, got {} bytes", width, height, pixels.len()),
            });
        }

        if self.data.is_empty() {
            self.width = width;
            self.height = height;
            self.data = vec![0; self.frames * self.frame_len()];
        } else if width != self.width || height != self.height {
            return Err(SpriteError::Decode {
                path: path.to_path_buf(),
                message: format!(
                    "frame is {}x{} but earlier frames are {}x{}",
                    width, height, self.width, self.height
                ),
            });
        }

        premultiply(&mut pixels, blend);

        let len = self.frame_len();
        self.data[frame * len..(frame + 1) * len].copy_from_slice(&pixels);
        self.loaded[frame] = true;
        Ok(())
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * CHANNELS
    }
}

fn premultiply(pixels: &mut [u8], blend: BlendMode) {
    if blend == BlendMode::Premultiplied {
        return;
    }

    for px in pixels.chunks_exact_mut(CHANNELS) {
        let alpha = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * alpha + 127) / 255) as u8;
        }
        px[3] = match blend {
            BlendMode::HalfAdditive => px[3] / 4,
            BlendMode::Additive => 0,
            _ => px[3],
        };
    }
}
