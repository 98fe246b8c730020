//! List command implementation.
//!
//! Discovers sprites and prints one line per sprite.

use std::path::PathBuf;

use clap::Args;

use crate::frames::FrameSet;
use crate::error::Result;
use crate::output::{plural, Printer};

/// List discovered sprites
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Files or directories to scan (default: current directory)
    pub paths: Vec<PathBuf>,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let catalog = super::discover_inputs(&args.paths)?.into_catalog();

    for set in catalog.iter() {
        printer.info(category(set), &describe(set, printer));
    }

    printer.success("Found", &plural(catalog.len(), "sprite", "sprites"));
    Ok(())
}

fn category(set: &FrameSet) -> &'static str {
    if set.is_masked() {
        "masked"
    } else if set.is_deferred() {
        "deferred"
    } else {
        "sprite"
    }
}

fn describe(set: &FrameSet, printer: &Printer) -> String {
    let mut line = format!(
        "{} {}",
        set.name(),
        printer.dim(&format!("({})", plural(set.frame_count(), "frame", "frames")))
    );
    if set.high_dpi_count() > 0 {
        line.push_str(&format!(" {}", printer.cyan(&format!("@2x: {}", set.high_dpi_count()))));
    }
    line
}
