//! Backward tokenizer for sprite image paths.
//!
//! A path has the shape `<name>[<blend><digits>][@2x].<ext>`. Tokens are
//! recognised from the end of the string: the extension, the optional
//! resolution marker, the digit run and the blend character in front of it.
//! Whatever is left at the front is the sprite name.

use super::blend::BlendMode;

/// Length of `.png` / `.jpg`.
const EXTENSION_LEN: usize = 4;

/// Length of the extension plus an `@2x` marker.
const HIGH_DPI_SUFFIX_LEN: usize = EXTENSION_LEN + 3;

const IMAGE_EXTENSIONS: [&[u8]; 4] = [b".png", b".jpg", b".PNG", b".JPG"];

/// Blend character and frame number following a sprite name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSuffix {
    pub blend: BlendMode,
    pub frame: usize,
}

/// A path split into its grammar tokens.
///
/// Parsing is total: any string produces an `ImagePath`, although only
/// strings for which [`is_image`] holds are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePath<'a> {
    path: &'a str,
    name_end: usize,
    suffix: Option<FrameSuffix>,
    high_dpi: bool,
}

impl<'a> ImagePath<'a> {
    pub fn parse(path: &'a str) -> Self {
        let high_dpi = is_high_dpi(path);
        let name_end = name_end(path.as_bytes(), high_dpi);
        let suffix = frame_suffix(path.as_bytes(), name_end);

        Self {
            path,
            name_end,
            suffix,
            high_dpi,
        }
    }

    /// The full path this was parsed from.
    pub fn as_str(&self) -> &'a str {
        self.path
    }

    /// Byte offset where the sprite name ends.
    pub fn name_end(&self) -> usize {
        self.name_end
    }

    pub fn name(&self) -> &'a str {
        let mut end = self.name_end;
        while !self.path.is_char_boundary(end) {
            end -= 1;
        }
        &self.path[..end]
    }

    pub fn suffix(&self) -> Option<FrameSuffix> {
        self.suffix
    }

    /// Frame number, or 0 when the name has no blend suffix.
    pub fn frame(&self) -> usize {
        self.suffix.map_or(0, |s| s.frame)
    }

    pub fn blend(&self) -> BlendMode {
        self.suffix.map(|s| s.blend).unwrap_or_default()
    }

    pub fn is_high_dpi(&self) -> bool {
        self.high_dpi
    }

    pub fn is_image(&self) -> bool {
        is_image(self.path)
    }

    /// The extension without its dot, if the path is long enough to have one.
    pub fn extension(&self) -> Option<&'a str> {
        let start = self.path.len().checked_sub(EXTENSION_LEN - 1)?;
        self.path.get(start..)
    }
}

/// True when the path ends in `.png`, `.jpg`, `.PNG` or `.JPG`.
pub fn is_image(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= EXTENSION_LEN
        && IMAGE_EXTENSIONS.contains(&&bytes[bytes.len() - EXTENSION_LEN..])
}

/// True when the three bytes in front of the extension are exactly `@2x`.
pub fn is_high_dpi(path: &str) -> bool {
    let bytes = path.as_bytes();
    if bytes.len() < HIGH_DPI_SUFFIX_LEN {
        return false;
    }
    let pos = bytes.len() - HIGH_DPI_SUFFIX_LEN;
    &bytes[pos..pos + 3] == b"@2x"
}

fn name_end(bytes: &[u8], high_dpi: bool) -> usize {
    let suffix_len = if high_dpi {
        HIGH_DPI_SUFFIX_LEN
    } else {
        EXTENSION_LEN
    };
    let end = bytes.len().saturating_sub(suffix_len);
    if end == 0 {
        return 0;
    }

    // Walk back over the trailing digits; index 0 is never examined as a digit.
    let mut pos = end;
    loop {
        pos -= 1;
        if pos == 0 || !bytes[pos].is_ascii_digit() {
            break;
        }
    }

    // Digits only count as a frame number behind a blend character.
    if BlendMode::from_byte(bytes[pos]).is_some() {
        pos
    } else {
        end
    }
}

fn frame_suffix(bytes: &[u8], name_end: usize) -> Option<FrameSuffix> {
    let blend = bytes.get(name_end).copied().and_then(BlendMode::from_byte)?;
    let frame = bytes[name_end + 1..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0usize, |frame, b| {
            frame.saturating_mul(10).saturating_add(usize::from(b - b'0'))
        });
    Some(FrameSuffix { blend, frame })
}
