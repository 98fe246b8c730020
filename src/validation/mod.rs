//! Diagnostics for sprite sets.
//!
//! Completeness checks and load failures never abort a run. They are
//! gathered here as errors and warnings and reported by `spriteset check`
//! and `spriteset build`.

mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::{plural, Printer};

/// Print every diagnostic followed by a one-line summary.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        printer.diagnostic(d);
    }
    printer.status("Checked", &summary(result));
}

/// One-line summary of a result, e.g. "2 errors, 1 warning".
pub fn summary(result: &ValidationResult) -> String {
    let errors = result.error_count();
    let warnings = result.warning_count();

    match (errors, warnings) {
        (0, 0) => "no problems found".to_string(),
        (0, w) => plural(w, "warning", "warnings"),
        (e, 0) => plural(e, "error", "errors"),
        (e, w) => format!(
            "{}, {}",
            plural(e, "error", "errors"),
            plural(w, "warning", "warnings")
        ),
    }
}
