pub mod build;
pub mod check;
pub mod completions;
pub mod init;
pub mod list;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::discovery::{discover, discover_paths, DiscoveryResult};
use crate::error::Result;

/// spriteset - Sprite frame discovery, collision masks and distance fields
#[derive(Parser, Debug)]
#[command(name = "spriteset")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report missing and surplus frames
    Check(check::CheckArgs),

    /// List discovered sprites
    List(list::ListArgs),

    /// Load sprites, build masks and distance fields, write a summary
    Build(build::BuildArgs),

    /// Initialize a spriteset project (generates spriteset.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Discover from the current directory, or from explicit paths when given.
pub(crate) fn discover_inputs(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    if paths.is_empty() {
        discover(".")
    } else {
        discover_paths(paths)
    }
}
