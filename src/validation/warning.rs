//! Diagnostics raised while assembling sprites.
//!
//! Most diagnostics concern one frame of one sprite, so both are carried as
//! structured fields next to the rendered message. Tooling can then group
//! by sprite or collect the affected frame numbers without parsing text.

use std::fmt;

/// How serious a diagnostic is. Neither level stops a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable code, e.g. `spriteset::frames::missing`.
    pub code: &'static str,
    pub message: String,
    /// Sprite the problem belongs to, when there is one.
    pub sprite: Option<String>,
    /// Frame index the problem belongs to, when there is one.
    pub frame: Option<usize>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            sprite: None,
            frame: None,
            help: None,
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// A problem with one frame of a sprite. The message is rendered as
    /// `Sprite "<name>": <detail>`.
    pub fn frame(
        severity: Severity,
        code: &'static str,
        sprite: &str,
        frame: usize,
        detail: impl fmt::Display,
    ) -> Self {
        Self::new(severity, code, format!("Sprite \"{}\": {}", sprite, detail))
            .for_sprite(sprite)
            .at_frame(frame)
    }

    pub fn for_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    pub fn at_frame(mut self, frame: usize) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Diagnostics gathered from checks and loads, in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::error(code, message));
    }

    pub fn warning(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.iter().filter(move |d| d.code == code)
    }

    /// Diagnostics attached to one sprite.
    pub fn for_sprite<'a>(&'a self, sprite: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.iter().filter(move |d| d.sprite.as_deref() == Some(sprite))
    }

    /// Frame numbers reported under `code`, in report order.
    pub fn frames_with_code(&self, code: &str) -> Vec<usize> {
        self.with_code(code).filter_map(|d| d.frame).collect()
    }

    fn count_of(&self, severity: Severity) -> usize {
        self.iter().filter(|d| d.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count_of(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_of(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Highest severity present, if any.
    pub fn worst(&self) -> Option<Severity> {
        self.iter().map(|d| d.severity).max()
    }

    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    /// True when nothing at all was reported.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Extend<Diagnostic> for ValidationResult {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.diagnostics.extend(iter);
    }
}
