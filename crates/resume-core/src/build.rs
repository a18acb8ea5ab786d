use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::converter::{ConversionOutcome, Convert};
use crate::error::{ResumeError, Result};
use crate::naming;
use crate::paths;
use crate::types::{DocumentKind, Format};

// ---------------------------------------------------------------------------
// BuildTarget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub source_file: PathBuf,
    pub company_key: String,
    pub formats: Vec<Format>,
    pub output_base_name: String,
    pub build_directory: PathBuf,
}

impl BuildTarget {
    pub fn output_path(&self, format: Format) -> PathBuf {
        self.build_directory
            .join(format!("{}.{}", self.output_base_name, format.extension()))
    }
}

/// Cover letters are recognised by living under `cover-letters/` or by the
/// `-cover` file name suffix the scaffolder gives them.
pub fn kind_of(source: &Path) -> DocumentKind {
    let in_cover_dir = source
        .components()
        .any(|c| c.as_os_str().to_string_lossy().contains("cover-letter"));
    let cover_suffix = source
        .file_stem()
        .is_some_and(|s| s.to_string_lossy().ends_with("-cover"));
    if in_cover_dir || cover_suffix {
        DocumentKind::CoverLetter
    } else {
        DocumentKind::Resume
    }
}

// ---------------------------------------------------------------------------
// BuildOutcome
// ---------------------------------------------------------------------------

/// Result of a build whose DOCX conversion succeeded. PDF failures land in
/// `warnings`; they never make the build fail.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    pub company: String,
    pub build_directory: PathBuf,
    pub outcomes: Vec<ConversionOutcome>,
    pub warnings: Vec<String>,
}

impl BuildOutcome {
    pub fn succeeded(&self, format: Format) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.format == format && o.exit_succeeded)
    }
}

pub const PDF_WARNING: &str =
    "PDF generation failed. Install WeasyPrint for better PDF support: pip install weasyprint";

// ---------------------------------------------------------------------------
// BuildOrchestrator
// ---------------------------------------------------------------------------

pub struct BuildOrchestrator<'a, C: Convert> {
    root: &'a Path,
    config: &'a Config,
    converter: &'a C,
}

impl<'a, C: Convert> BuildOrchestrator<'a, C> {
    pub fn new(root: &'a Path, config: &'a Config, converter: &'a C) -> Self {
        Self {
            root,
            config,
            converter,
        }
    }

    /// Work out where a source file's artifacts go.
    ///
    /// `company` carries the scaffolded company through when the caller knows
    /// it; otherwise the key is re-derived from the file name.
    pub fn target(
        &self,
        source: &Path,
        formats: &[Format],
        company: Option<&str>,
    ) -> Result<BuildTarget> {
        if source.extension().and_then(|e| e.to_str()) != Some("md") {
            return Err(ResumeError::NotMarkdown(source.to_path_buf()));
        }
        if !source.is_file() {
            return Err(ResumeError::SourceNotFound(source.to_path_buf()));
        }

        let company_key = match company.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => naming::sanitize(c),
            None => naming::company_key(source),
        };
        if company_key.is_empty() {
            return Err(ResumeError::Validation(format!(
                "cannot derive a company from '{}'",
                source.display()
            )));
        }
        naming::validate_key("company", &company_key)?;

        let mut formats = formats.to_vec();
        if !formats.contains(&Format::Docx) {
            formats.push(Format::Docx);
        }
        formats.sort();
        formats.dedup();

        let relative = source.strip_prefix(self.root).unwrap_or(source);

        Ok(BuildTarget {
            source_file: source.to_path_buf(),
            output_base_name: self.config.output_name(kind_of(relative)).to_string(),
            build_directory: paths::build_dir(self.root, &company_key),
            company_key,
            formats,
        })
    }

    pub fn build(
        &self,
        source: &Path,
        formats: &[Format],
        company: Option<&str>,
    ) -> Result<BuildOutcome> {
        let target = self.target(source, formats, company)?;
        self.converter.ensure_available()?;

        if crate::io::ensure_dir(&target.build_directory)? {
            tracing::info!(dir = %target.build_directory.display(), "created build directory");
        }

        let mut outcomes = Vec::new();
        let mut warnings = Vec::new();

        for format in &target.formats {
            let output = target.output_path(*format);
            let outcome = self.converter.convert(&target.source_file, &output, *format);

            if !outcome.exit_succeeded {
                match format {
                    Format::Docx => {
                        return Err(ResumeError::ConversionFailed {
                            format: Format::Docx,
                            message: outcome.failure_text(),
                        });
                    }
                    Format::Pdf => {
                        tracing::warn!(reason = %outcome.failure_text(), "pdf conversion failed");
                        warnings.push(PDF_WARNING.to_string());
                    }
                }
            } else {
                tracing::info!(output = %output.display(), "built {format}");
            }
            outcomes.push(outcome);
        }

        Ok(BuildOutcome {
            company: target.company_key,
            build_directory: target.build_directory,
            outcomes,
            warnings,
        })
    }
}

/// The build folder for `company`, which must already exist.
pub fn build_folder(root: &Path, company: &str) -> Result<PathBuf> {
    naming::validate_key("company", company)?;
    let dir = paths::build_dir(root, company);
    if !dir.is_dir() {
        return Err(ResumeError::BuildFolderMissing(company.to_string()));
    }
    Ok(dir)
}
