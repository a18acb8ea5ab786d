//! Creation of new tailored documents.
//!
//! Scaffolding is a fixed sequence of named steps. Every interactive step goes
//! through [`Prompter`] and may be cancelled; cancellation is a normal outcome,
//! never an error, and leaves the filesystem untouched.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::{ResumeError, Result};
use crate::io;
use crate::paths::{self, ResolvedPath};
use crate::types::{ContentSource, DocumentKind, DocumentRequest};

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Source of user answers. `Ok(None)` means the user dismissed the prompt.
pub trait Prompter {
    fn company(&mut self) -> Result<Option<String>>;

    /// Optional position qualifier (resumes only). An empty answer means
    /// "no position"; `None` cancels.
    fn position(&mut self) -> Result<Option<String>>;

    /// Asked only when the target file exists. `false` declines the overwrite.
    fn confirm_overwrite(&mut self, path: &ResolvedPath) -> Result<bool>;

    fn content_source(&mut self) -> Result<Option<ContentSource>>;
}

pub trait Clipboard {
    fn read_text(&mut self) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Steps and outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldStep {
    Company,
    Position,
    ConfirmOverwrite,
    ContentSource,
}

impl ScaffoldStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ScaffoldStep::Company => "company",
            ScaffoldStep::Position => "position",
            ScaffoldStep::ConfirmOverwrite => "confirm_overwrite",
            ScaffoldStep::ContentSource => "content_source",
        }
    }
}

impl fmt::Display for ScaffoldStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created {
        request: DocumentRequest,
        path: ResolvedPath,
        source: ContentSource,
        /// Lines written from the clipboard; `None` for empty files.
        line_count: Option<usize>,
    },
    Cancelled {
        at: ScaffoldStep,
    },
}

/// Line count reported for pasted content. A trailing newline terminates the
/// last line rather than starting a new one: `"a\nb\n"` has 2 lines.
pub fn line_count(content: &str) -> usize {
    content.lines().count()
}

// ---------------------------------------------------------------------------
// DocumentScaffolder
// ---------------------------------------------------------------------------

pub struct DocumentScaffolder<'a> {
    root: &'a Path,
}

impl<'a> DocumentScaffolder<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn scaffold(
        &self,
        kind: DocumentKind,
        prompter: &mut dyn Prompter,
        clipboard: &mut dyn Clipboard,
    ) -> Result<ScaffoldOutcome> {
        let Some(company) = prompter.company()? else {
            return Ok(ScaffoldOutcome::Cancelled {
                at: ScaffoldStep::Company,
            });
        };
        if company.trim().is_empty() {
            return Err(ResumeError::Validation(
                "company name cannot be empty".to_string(),
            ));
        }

        let position = match kind {
            DocumentKind::Resume => match prompter.position()? {
                Some(p) => Some(p),
                None => {
                    return Ok(ScaffoldOutcome::Cancelled {
                        at: ScaffoldStep::Position,
                    })
                }
            },
            DocumentKind::CoverLetter => None,
        };

        let request = DocumentRequest::new(kind, &company, position.as_deref())?;
        let resolved = paths::resolve(&request, self.root);

        if resolved.full_path.exists() && !prompter.confirm_overwrite(&resolved)? {
            return Ok(ScaffoldOutcome::Cancelled {
                at: ScaffoldStep::ConfirmOverwrite,
            });
        }

        let Some(source) = prompter.content_source()? else {
            return Ok(ScaffoldOutcome::Cancelled {
                at: ScaffoldStep::ContentSource,
            });
        };

        let content = match source {
            ContentSource::Clipboard => {
                let content = clipboard.read_text()?;
                if content.trim().is_empty() {
                    return Err(ResumeError::EmptyClipboard);
                }
                Some(content)
            }
            ContentSource::Editor | ContentSource::Empty => None,
        };

        io::ensure_dir(&resolved.directory)?;
        let data = content.as_deref().unwrap_or_default();
        io::atomic_write(&resolved.full_path, data.as_bytes())?;
        let line_count = content.as_deref().map(line_count);

        tracing::info!(path = %resolved.full_path.display(), %source, "created document");

        Ok(ScaffoldOutcome::Created {
            request,
            path: resolved,
            source,
            line_count,
        })
    }
}
