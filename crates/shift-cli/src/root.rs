use shift_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the directory that holds (or will hold) `.shifts/`.
///
/// Priority:
/// 1. `--root` flag / `SHIFTS_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.shifts/`
/// 3. The user's home directory
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join(paths::SHIFTS_DIR).is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    match paths::home_root() {
        Ok(home) => home,
        Err(e) => {
            tracing::debug!(error = %e, "no home directory; using cwd");
            cwd
        }
    }
}
