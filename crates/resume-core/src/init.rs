use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::converter::ConverterInvoker;
use crate::error::Result;
use crate::{io, paths};

#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
    pub config_created: bool,
    /// Version banner when the converter responded, otherwise the reason it
    /// could not be used.
    pub converter: ConverterStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConverterStatus {
    Available { name: String, version: String },
    Missing { name: String, reason: String },
}

/// Create the workspace skeleton and a default config. Idempotent: existing
/// directories and config are reported, never touched. A missing converter is
/// reported in the result rather than failing initialization.
pub fn init(root: &Path, config: &Config, converter: &ConverterInvoker) -> Result<InitReport> {
    let mut created = Vec::new();
    let mut existing = Vec::new();

    for dir in paths::SCAFFOLD_DIRS {
        if io::ensure_dir(&root.join(dir))? {
            created.push(dir.to_string());
        } else {
            existing.push(dir.to_string());
        }
    }

    let config_data = config.to_yaml()?;
    let config_created = io::write_if_missing(&paths::config_path(root), config_data.as_bytes())?;

    let name = converter.converter().describe();
    let converter = match converter.version() {
        Ok(version) => ConverterStatus::Available { name, version },
        Err(e) => ConverterStatus::Missing {
            name,
            reason: e.to_string(),
        },
    };

    Ok(InitReport {
        created,
        existing,
        config_created,
        converter,
    })
}
