use std::path::PathBuf;
use thiserror::Error;

use crate::types::Format;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("{0}")]
    Validation(String),

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("file already exists: {}", .0.display())]
    FileExists(PathBuf),

    #[error(
        "pandoc is not installed or not found at '{0}'. Install it from \
         https://pandoc.org/installing.html or set converter.path in .mdresume/config.yaml"
    )]
    MissingDependency(String),

    #[error("build script not found: {}", .0.display())]
    BuildScriptMissing(PathBuf),

    #[error("{format} conversion failed: {message}")]
    ConversionFailed { format: Format, message: String },

    #[error("not a markdown file: {}", .0.display())]
    NotMarkdown(PathBuf),

    #[error("source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("build folder doesn't exist yet: build/{0}/")]
    BuildFolderMissing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ResumeError>;
