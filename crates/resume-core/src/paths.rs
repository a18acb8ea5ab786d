use crate::naming::sanitize;
use crate::types::{DocumentKind, DocumentRequest};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const RESUMES_DIR: &str = "resumes/tailored";
pub const COVER_LETTERS_DIR: &str = "cover-letters/tailored";
pub const TEMPLATES_DIR: &str = "templates";
pub const BUILD_DIR: &str = "build";

pub const CONFIG_DIR: &str = ".mdresume";
pub const CONFIG_FILE: &str = ".mdresume/config.yaml";

pub const DEFAULT_BUILD_SCRIPT: &str = "./scripts/build.sh";

/// Directories created by `init`, in creation order.
pub const SCAFFOLD_DIRS: [&str; 3] = [RESUMES_DIR, COVER_LETTERS_DIR, TEMPLATES_DIR];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn documents_dir(root: &Path, kind: DocumentKind) -> PathBuf {
    match kind {
        DocumentKind::Resume => root.join(RESUMES_DIR),
        DocumentKind::CoverLetter => root.join(COVER_LETTERS_DIR),
    }
}

pub fn build_dir(root: &Path, company: &str) -> PathBuf {
    root.join(BUILD_DIR).join(company)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// ResolvedPath
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub directory: PathBuf,
    pub filename: String,
    pub full_path: PathBuf,
}

/// Derive where a requested document lives. Pure: nothing is created on disk.
pub fn resolve(request: &DocumentRequest, root: &Path) -> ResolvedPath {
    let company = sanitize(&request.company);
    let filename = match request.kind {
        DocumentKind::Resume => match request.position.as_deref().map(sanitize) {
            Some(position) if !position.is_empty() => format!("{company}-{position}.md"),
            _ => format!("{company}.md"),
        },
        DocumentKind::CoverLetter => format!("{company}-cover.md"),
    };
    let directory = documents_dir(root, request.kind);
    let full_path = directory.join(&filename);
    ResolvedPath {
        directory,
        filename,
        full_path,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
