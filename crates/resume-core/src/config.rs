use crate::error::Result;
use crate::paths;
use crate::types::DocumentKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ConverterConfig
// ---------------------------------------------------------------------------

/// Which external program turns markdown into DOCX/PDF. The two strategies are
/// mutually exclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConverterConfig {
    /// A pandoc binary: a bare command name resolved via PATH, or a path.
    Pandoc {
        #[serde(default = "default_pandoc_path")]
        path: String,
    },
    /// A user build script invoked as `{script} -f {format} {source}`.
    /// Relative paths resolve against the workspace root.
    Script {
        #[serde(default = "default_script_path")]
        path: String,
    },
}

fn default_pandoc_path() -> String {
    "pandoc".to_string()
}

fn default_script_path() -> String {
    paths::DEFAULT_BUILD_SCRIPT.to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig::Pandoc {
            path: default_pandoc_path(),
        }
    }
}

/// Resolve a configured script path against the workspace root.
pub fn script_path(root: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default = "default_resume_output_name")]
    pub resume_output_name: String,
    #[serde(default = "default_cover_letter_output_name")]
    pub cover_letter_output_name: String,
    /// Converter timeout in seconds; 0 waits indefinitely.
    #[serde(default)]
    pub timeout_seconds: u64,
}

fn default_resume_output_name() -> String {
    "Your_Name_Resume".to_string()
}

fn default_cover_letter_output_name() -> String {
    "Your_Name_Cover_Letter".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            converter: ConverterConfig::default(),
            resume_output_name: default_resume_output_name(),
            cover_letter_output_name: default_cover_letter_output_name(),
            timeout_seconds: 0,
        }
    }
}

impl Config {
    /// Load `.mdresume/config.yaml`, falling back to defaults when the file
    /// does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        crate::io::atomic_write(&path, self.to_yaml()?.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn output_name(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Resume => &self.resume_output_name,
            DocumentKind::CoverLetter => &self.cover_letter_output_name,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (key, name) in [
            ("resume_output_name", &self.resume_output_name),
            ("cover_letter_output_name", &self.cover_letter_output_name),
        ] {
            if name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{key} cannot be empty"),
                });
            } else if name.contains('/') || name.contains('\\') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{key} '{name}' must be a file name, not a path"),
                });
            }
        }

        match &self.converter {
            ConverterConfig::Pandoc { path } => {
                if which::which(path).is_err() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("pandoc not found at '{path}'"),
                    });
                }
            }
            ConverterConfig::Script { path } => {
                let resolved = script_path(root, path);
                if !resolved.is_file() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("build script not found: {}", resolved.display()),
                    });
                }
            }
        }

        warnings
    }
}
