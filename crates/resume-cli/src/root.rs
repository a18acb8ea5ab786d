use std::path::{Path, PathBuf};

/// Resolve the workspace root.
///
/// Priority:
/// 1. `--root` flag / `MDRESUME_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.mdresume/`
/// 3. Walk upward from `cwd` looking for `resumes/`
/// 4. Walk upward from `cwd` looking for `.git/`
/// 5. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_root_from(&cwd)
}

fn find_root_from(start: &Path) -> PathBuf {
    for marker in [resume_core::paths::CONFIG_DIR, "resumes", ".git"] {
        if let Some(found) = start.ancestors().find(|dir| dir.join(marker).is_dir()) {
            return found.to_path_buf();
        }
    }
    start.to_path_buf()
}
