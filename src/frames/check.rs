//! Completeness checks for a frame set.

use crate::validation::{Diagnostic, Severity, ValidationResult};

use super::{FrameSet, Tier};

pub const EXTRA_HIGH_DPI: &str = "spriteset::frames::extra-2x";
pub const MISSING_FRAME: &str = "spriteset::frames::missing";
pub const MISSING_HIGH_DPI: &str = "spriteset::frames::missing-2x";

impl FrameSet {
    /// Report gaps and surplus frames. Nothing here stops a load: missing
    /// frames are simply left empty.
    pub fn check(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        let standard = self.paths(Tier::Standard);
        let high_dpi = self.paths(Tier::HighDpi);

        if high_dpi.len() > standard.len() {
            // Anchored at the first surplus frame.
            result.push(
                Diagnostic::frame(
                    Severity::Warning,
                    EXTRA_HIGH_DPI,
                    self.name(),
                    standard.len(),
                    format_args!(
                        "{} extra frames for the @2x sprite will be ignored.",
                        high_dpi.len() - standard.len()
                    ),
                )
                .with_help("The number of 1x frames decides the length of the animation"),
            );
        }

        for i in 0..standard.len() {
            if !standard.is_filled(i) {
                result.push(Diagnostic::frame(
                    Severity::Error,
                    MISSING_FRAME,
                    self.name(),
                    i,
                    format_args!("missing frame {}.", i),
                ));
            }

            // A sprite with no @2x files at all is fine; a partial set is not.
            if !high_dpi.is_empty() && !high_dpi.is_filled(i) {
                result.push(Diagnostic::frame(
                    Severity::Warning,
                    MISSING_HIGH_DPI,
                    self.name(),
                    i,
                    format_args!("missing @2x frame {}.", i),
                ));
            }
        }

        result
    }
}
