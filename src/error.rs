use miette::Diagnostic;
use thiserror::Error;

/// Main error type for spriteset operations
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(spriteset::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not decode {path}: {message}")]
    #[diagnostic(code(spriteset::decode))]
    Decode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(spriteset::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(spriteset::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, SpriteError>;
