//! External converter invocation.
//!
//! Two mutually exclusive strategies turn a markdown source into DOCX/PDF:
//! a pandoc binary (`pandoc <source> -o <output>`) or a user build script
//! (`<script> -f <format> <source>`). Both run with the workspace root as the
//! working directory, with stdout/stderr captured and an optional timeout.
//!
//! # Exit classification
//! A conversion fails when the process exits non-zero, or when stderr carries
//! an error line that is not a warning. Warnings alone never fail a build; they
//! are surfaced as informational output.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::config::{self, Config, ConverterConfig};
use crate::error::{ResumeError, Result};
use crate::types::Format;

/// Substrings marking a stderr line as a tolerated warning.
const BENIGN_MARKERS: [&str; 2] = ["[warning]", "warning:"];

static ERROR_WORD_RE: OnceLock<Regex> = OnceLock::new();

fn error_word_re() -> &'static Regex {
    ERROR_WORD_RE.get_or_init(|| Regex::new(r"(?i)\berror\b").unwrap())
}

/// Cap on the error text carried into a failure message (keeps the tail).
const MAX_MESSAGE: usize = 10 * 1024;

// ---------------------------------------------------------------------------
// ConversionOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub format: Format,
    pub output: PathBuf,
    pub exit_succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ConversionOutcome {
    /// Human-readable reason for a failed conversion.
    pub fn failure_text(&self) -> String {
        if let Some(msg) = &self.error_message {
            return msg.clone();
        }
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            "converter exited with a non-zero status".to_string()
        } else {
            tail(stderr, MAX_MESSAGE).to_string()
        }
    }
}

fn tail(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

/// Whether a finished process counts as a successful conversion.
pub fn classify(exit_ok: bool, stderr: &str) -> bool {
    exit_ok && !stderr.lines().any(is_error_line)
}

fn is_error_line(line: &str) -> bool {
    if !error_word_re().is_match(line) {
        return false;
    }
    let lower = line.to_lowercase();
    !BENIGN_MARKERS.iter().any(|m| lower.contains(m))
}

// ---------------------------------------------------------------------------
// Convert trait
// ---------------------------------------------------------------------------

/// The seam between build orchestration and the external process.
pub trait Convert {
    /// Verify the converter can run at all. Called once per build, before any
    /// conversion is attempted.
    fn ensure_available(&self) -> Result<()>;

    /// Convert `source` into `output` for a single format.
    fn convert(&self, source: &Path, output: &Path, format: Format) -> ConversionOutcome;
}

// ---------------------------------------------------------------------------
// Converter / ConverterInvoker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converter {
    Pandoc { binary: String },
    Script { path: PathBuf },
}

impl Converter {
    pub fn describe(&self) -> String {
        match self {
            Converter::Pandoc { binary } => format!("pandoc ({binary})"),
            Converter::Script { path } => format!("build script ({})", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConverterInvoker {
    converter: Converter,
    root: PathBuf,
    timeout: Option<Duration>,
}

impl ConverterInvoker {
    pub fn new(converter: Converter, root: &Path, timeout: Option<Duration>) -> Self {
        Self {
            converter,
            root: root.to_path_buf(),
            timeout,
        }
    }

    pub fn from_config(config: &Config, root: &Path) -> Self {
        let converter = match &config.converter {
            ConverterConfig::Pandoc { path } => Converter::Pandoc {
                binary: path.clone(),
            },
            ConverterConfig::Script { path } => Converter::Script {
                path: config::script_path(root, path),
            },
        };
        Self::new(converter, root, config.timeout())
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Probe the converter and return its version banner (first line).
    pub fn version(&self) -> Result<String> {
        match &self.converter {
            Converter::Pandoc { binary } => {
                let output = Command::new(binary)
                    .arg("--version")
                    .current_dir(&self.root)
                    .stdin(Stdio::null())
                    .output()
                    .map_err(|e| {
                        tracing::debug!(binary = %binary, error = %e, "version probe failed to spawn");
                        ResumeError::MissingDependency(binary.clone())
                    })?;
                if !output.status.success() {
                    return Err(ResumeError::MissingDependency(binary.clone()));
                }
                let stdout = String::from_utf8_lossy(&output.stdout);
                let banner = stdout.lines().next().unwrap_or_default().trim().to_string();
                tracing::debug!(binary = %binary, version = %banner, "converter available");
                Ok(banner)
            }
            Converter::Script { path } => {
                if !path.is_file() {
                    return Err(ResumeError::BuildScriptMissing(path.clone()));
                }
                Ok(format!("build script {}", path.display()))
            }
        }
    }

    /// Argument vector for one conversion. Passed straight to the OS (no
    /// shell), so spaces in paths need no quoting.
    pub fn argv(&self, source: &Path, output: &Path, format: Format) -> Vec<OsString> {
        match &self.converter {
            Converter::Pandoc { binary } => vec![
                OsString::from(binary),
                source.as_os_str().to_os_string(),
                OsString::from("-o"),
                output.as_os_str().to_os_string(),
            ],
            Converter::Script { path } => vec![
                path.as_os_str().to_os_string(),
                OsString::from("-f"),
                OsString::from(format.extension()),
                source.as_os_str().to_os_string(),
            ],
        }
    }
}

impl Convert for ConverterInvoker {
    fn ensure_available(&self) -> Result<()> {
        self.version().map(|_| ())
    }

    fn convert(&self, source: &Path, output: &Path, format: Format) -> ConversionOutcome {
        let argv = self.argv(source, output, format);
        tracing::debug!(?argv, cwd = %self.root.display(), "running converter");

        let mut envs: Vec<(&str, OsString)> = Vec::new();
        if let Converter::Script { .. } = self.converter {
            envs.push(("MDRESUME_ROOT", self.root.as_os_str().to_os_string()));
            envs.push(("MDRESUME_OUTPUT", output.as_os_str().to_os_string()));
        }

        let run = run_process(&argv, &self.root, &envs, self.timeout);
        let exit_succeeded = run.error.is_none() && classify(run.exit_ok, &run.stderr);

        if exit_succeeded && !run.stderr.trim().is_empty() {
            tracing::warn!(%format, stderr = %run.stderr.trim(), "converter reported warnings");
        }

        ConversionOutcome {
            format,
            output: output.to_path_buf(),
            exit_succeeded,
            stdout: run.stdout,
            stderr: run.stderr,
            error_message: run.error,
        }
    }
}

// ---------------------------------------------------------------------------
// Process execution
// ---------------------------------------------------------------------------

struct ProcessRun {
    exit_ok: bool,
    stdout: String,
    stderr: String,
    /// Spawn/wait failure or timeout; the process result is meaningless.
    error: Option<String>,
}

impl ProcessRun {
    fn failed(error: String) -> Self {
        Self {
            exit_ok: false,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(error),
        }
    }
}

/// Run `argv` in `cwd` with an optional timeout.
///
/// stdout/stderr are drained on dedicated threads to avoid pipe-buffer
/// deadlocks. A waiter thread reports the exit status over a channel so the
/// timeout needs no busy-wait. On unix the child leads its own process group,
/// so expiry kills everything it started, not just the direct child.
fn run_process(
    argv: &[OsString],
    cwd: &Path,
    envs: &[(&str, OsString)],
    timeout: Option<Duration>,
) -> ProcessRun {
    let Some((program, args)) = argv.split_first() else {
        return ProcessRun::failed("empty command line".to_string());
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (k, v) in envs {
        cmd.env(k, v);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            return ProcessRun::failed(format!(
                "failed to spawn '{}': {e}",
                Path::new(program).display()
            ))
        }
    };

    let child_pid = child.id();

    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> String {
        let mut buf = Vec::new();
        if let Some(mut r) = stdout_handle {
            let _ = r.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    });
    let stderr_thread = std::thread::spawn(move || -> String {
        let mut buf = Vec::new();
        if let Some(mut r) = stderr_handle {
            let _ = r.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    });

    let wait_result = match timeout {
        None => child.wait(),
        Some(timeout_dur) => {
            let (tx, rx) = std::sync::mpsc::channel();
            std::thread::spawn(move || {
                let _ = tx.send(child.wait());
            });

            match rx.recv_timeout(timeout_dur) {
                Ok(result) => result,
                Err(_) => {
                    kill_process(child_pid);
                    let secs = timeout_dur.as_secs();
                    tracing::warn!(pid = child_pid, secs, "converter timed out, killed");
                    return ProcessRun::failed(format!("timed out after {secs}s"));
                }
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    match wait_result {
        Ok(status) => ProcessRun {
            exit_ok: status.success(),
            stdout,
            stderr,
            error: None,
        },
        Err(e) => ProcessRun {
            exit_ok: false,
            stdout,
            stderr,
            error: Some(format!("wait failed: {e}")),
        },
    }
}

/// Terminate a process and its descendants. Best-effort; errors are ignored.
fn kill_process(pid: u32) {
    #[cfg(unix)]
    let mut cmd = {
        let mut c = Command::new("kill");
        c.args(["-9", "--"]).arg(format!("-{pid}"));
        c
    };
    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("taskkill");
        c.args(["/F", "/T", "/PID"]).arg(pid.to_string());
        c
    };
    let _ = cmd.stdout(Stdio::null()).stderr(Stdio::null()).status();
}
