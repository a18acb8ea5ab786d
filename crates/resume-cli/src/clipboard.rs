//! Clipboard access through the platform's paste utilities.
//!
//! Candidates are tried in order and the first one found on PATH is used:
//! pbpaste (macOS), wl-paste (Wayland), xclip / xsel (X11), then PowerShell's
//! Get-Clipboard (Windows).

use std::io::Read;
use std::process::{Command, Stdio};

use resume_core::scaffold::Clipboard;
use resume_core::{ResumeError, Result};

const PASTE_TOOLS: &[(&str, &[&str])] = &[
    ("pbpaste", &[]),
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
    ("powershell", &["-NoProfile", "-Command", "Get-Clipboard -Raw"]),
];

pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        let (bin, args) = PASTE_TOOLS
            .iter()
            .find_map(|(name, args)| which::which(name).ok().map(|bin| (bin, *args)))
            .ok_or_else(|| {
                ResumeError::Clipboard(
                    "no paste utility found (pbpaste, wl-paste, xclip, xsel); pipe content with --stdin instead"
                        .to_string(),
                )
            })?;

        tracing::debug!(tool = %bin.display(), "reading clipboard");
        let output = Command::new(&bin)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ResumeError::Clipboard(format!("{}: {e}", bin.display())))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResumeError::Clipboard(stderr.trim().to_string()));
        }
        String::from_utf8(output.stdout)
            .map_err(|_| ResumeError::Clipboard("clipboard does not hold UTF-8 text".to_string()))
    }
}

/// Stands in for the clipboard when content is piped: `pbpaste | mdresume new ... --stdin`.
pub struct StdinClipboard;

impl Clipboard for StdinClipboard {
    fn read_text(&mut self) -> Result<String> {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    }
}
