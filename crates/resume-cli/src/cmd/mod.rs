pub mod build;
pub mod config;
pub mod init;
pub mod new;
pub mod open;

use anyhow::Context;
use resume_core::config::{Config, ConverterConfig};
use std::path::Path;

use crate::ConverterArgs;

/// Load the workspace config and apply command-line / env overrides. The
/// result is what every component receives; nothing reads config later.
pub fn load_config(root: &Path, overrides: &ConverterArgs) -> anyhow::Result<Config> {
    let mut config = Config::load(root).context("failed to load .mdresume/config.yaml")?;
    if let Some(path) = &overrides.pandoc {
        config.converter = ConverterConfig::Pandoc { path: path.clone() };
    }
    if let Some(path) = &overrides.script {
        config.converter = ConverterConfig::Script { path: path.clone() };
    }
    if let Some(secs) = overrides.timeout {
        config.timeout_seconds = secs;
    }
    Ok(config)
}
