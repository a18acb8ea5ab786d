use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ResumeError, Result};
use crate::naming;

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Docx,
    Pdf,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Docx => "docx",
            Format::Pdf => "pdf",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for Format {
    type Err = ResumeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docx" => Ok(Format::Docx),
            "pdf" => Ok(Format::Pdf),
            _ => Err(ResumeError::Validation(format!(
                "unknown format '{s}': expected docx or pdf"
            ))),
        }
    }
}

/// Formats to produce for a build. DOCX is always built; PDF is opt-in.
pub fn formats(include_pdf: bool) -> Vec<Format> {
    if include_pdf {
        vec![Format::Docx, Format::Pdf]
    } else {
        vec![Format::Docx]
    }
}

// ---------------------------------------------------------------------------
// ContentSource
// ---------------------------------------------------------------------------

/// How a freshly scaffolded document gets its initial content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// Paste the clipboard contents verbatim.
    Clipboard,
    /// Create an empty file and open it for editing.
    Editor,
    /// Create an empty file only.
    Empty,
}

impl ContentSource {
    pub fn all() -> &'static [ContentSource] {
        &[
            ContentSource::Clipboard,
            ContentSource::Editor,
            ContentSource::Empty,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentSource::Clipboard => "clipboard",
            ContentSource::Editor => "editor",
            ContentSource::Empty => "empty",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ContentSource::Clipboard => "Paste content from your clipboard",
            ContentSource::Editor => "Create empty file and open it",
            ContentSource::Empty => "Just create the file without opening",
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentSource {
    type Err = ResumeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "clipboard" => Ok(ContentSource::Clipboard),
            "editor" => Ok(ContentSource::Editor),
            "empty" => Ok(ContentSource::Empty),
            _ => Err(ResumeError::Validation(format!(
                "unknown content source '{s}': expected clipboard, editor or empty"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentRequest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    pub company: String,
    pub position: Option<String>,
}

impl DocumentRequest {
    /// Trims both inputs. An empty company is rejected; an empty position is
    /// dropped. Cover letters never carry a position.
    pub fn new(kind: DocumentKind, company: &str, position: Option<&str>) -> Result<Self> {
        let company = company.trim();
        if company.is_empty() {
            return Err(ResumeError::Validation(
                "company name cannot be empty".to_string(),
            ));
        }
        let position = match kind {
            DocumentKind::Resume => position
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            DocumentKind::CoverLetter => None,
        };
        naming::validate_key("company", &naming::sanitize(company))?;
        if let Some(p) = &position {
            naming::validate_key("position", &naming::sanitize(p))?;
        }
        Ok(Self {
            kind,
            company: company.to_string(),
            position,
        })
    }
}
