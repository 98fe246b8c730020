//! Blend modes encoded by the character that separates a sprite name from
//! its frame number.

use std::fmt;

/// How a frame's colour is combined with what is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// `-`: straight alpha, premultiplied when loaded.
    #[default]
    Normal,
    /// `~`: premultiplied, with a quarter of the alpha kept.
    HalfAdditive,
    /// `+`: premultiplied, alpha dropped entirely.
    Additive,
    /// `=`: the file is already premultiplied.
    Premultiplied,
}

impl BlendMode {
    /// Map a blend character to its mode. Any other byte is not a blend
    /// character.
    pub fn from_byte(c: u8) -> Option<Self> {
        match c {
            b'-' => Some(BlendMode::Normal),
            b'~' => Some(BlendMode::HalfAdditive),
            b'+' => Some(BlendMode::Additive),
            b'=' => Some(BlendMode::Premultiplied),
            _ => None,
        }
    }

    /// The character used in file names for this mode.
    pub fn as_char(self) -> char {
        match self {
            BlendMode::Normal => '-',
            BlendMode::HalfAdditive => '~',
            BlendMode::Additive => '+',
            BlendMode::Premultiplied => '=',
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlendMode::Normal => write!(f, "normal"),
            BlendMode::HalfAdditive => write!(f, "half-additive"),
            BlendMode::Additive => write!(f, "additive"),
            BlendMode::Premultiplied => write!(f, "premultiplied"),
        }
    }
}
