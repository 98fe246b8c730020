//! Check command implementation.
//!
//! Discovers sprites and reports gaps in their frame sequences.

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, SpriteError};
use crate::output::{plural, Printer};
use crate::validation::{print_diagnostics, ValidationResult};

/// Report missing and surplus frames
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to scan (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Fail when any frame is missing
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let discovery = super::discover_inputs(&args.paths)?;
    for path in &discovery.scan.unreadable {
        printer.warning("Skipping", &format!("{} (path is not UTF-8)", path.display()));
    }

    let catalog = discovery.into_catalog();
    printer.status("Checking", &plural(catalog.len(), "sprite", "sprites"));

    let result = catalog.check_all();
    print_diagnostics(&result, printer);
    outcome(&result, args.strict)
}

/// Errors only fail the run in strict mode.
fn outcome(result: &ValidationResult, strict: bool) -> Result<()> {
    if strict && result.has_errors() {
        return Err(SpriteError::Build {
            message: format!("{} found", plural(result.error_count(), "error", "errors")),
            help: Some("Add the missing frames or drop --strict".to_string()),
        });
    }
    Ok(())
}
