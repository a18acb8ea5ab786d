use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{ResumeError, Result};

static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

fn whitespace_re() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Lowercase `raw` and collapse every whitespace run into a single `-`.
///
/// Leading and trailing whitespace is not trimmed: `" acme"` becomes `"-acme"`.
/// Callers that want trimmed names trim before sanitizing.
pub fn sanitize(raw: &str) -> String {
    whitespace_re()
        .replace_all(&raw.to_lowercase(), "-")
        .into_owned()
}

/// Company key used for the build directory: the first `-`-delimited segment
/// of the file stem. `stripe-senior.md` and `stripe-cover.md` both map to
/// `stripe`; a multi-word company such as `acme-corp.md` maps to `acme`.
pub fn company_key(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.split('-').next().unwrap_or_default().to_string()
}

/// A sanitized name becomes a single path segment under `resumes/`,
/// `cover-letters/` or `build/`, so it must not name another location.
pub fn validate_key(what: &str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ResumeError::Validation(format!("{what} cannot be empty")));
    }
    if key == "." || key == ".." || key.contains(['/', '\\']) || Path::new(key).is_absolute() {
        return Err(ResumeError::Validation(format!(
            "{what} '{key}' must be a plain name, not a path"
        )));
    }
    Ok(())
}
