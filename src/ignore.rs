//! `.format-erb-ignore` support
//!
//! One glob per line, resolved against the directory holding the file.
//! A matching input is passed through untouched.

use std::path::{Component, Path, PathBuf};

use glob::Pattern;

/// File name of the ignore list
pub const IGNORE_FILE_NAME: &str = ".format-erb-ignore";

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    base_dir: PathBuf,
    patterns: Vec<Pattern>,
}

impl IgnoreList {
    /// Load `.format-erb-ignore` from `base_dir`. A missing file gives an
    /// empty list.
    #[must_use]
    pub fn load(base_dir: &Path) -> Self {
        let path = base_dir.join(IGNORE_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_contents(&contents, base_dir),
            Err(e) => {
                if path.exists() {
                    tracing::warn!("failed to read {}: {e}", path.display());
                }
                Self {
                    base_dir: absolute(base_dir),
                    patterns: Vec::new(),
                }
            }
        }
    }

    /// Build a list from the text of an ignore file
    #[must_use]
    pub fn from_contents(contents: &str, base_dir: &Path) -> Self {
        let base_dir = absolute(base_dir);
        let patterns = contents
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let resolved = normalize(&base_dir.join(line));
                match Pattern::new(&resolved.to_string_lossy()) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        tracing::warn!("invalid ignore pattern {line:?}: {e}");
                        None
                    }
                }
            })
            .collect();
        Self { base_dir, patterns }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `path` (relative paths resolve against the base directory)
    /// matches any pattern
    #[must_use]
    pub fn should_ignore(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let path = normalize(&self.base_dir.join(path));
        let path = path.to_string_lossy();
        self.patterns.iter().any(|pattern| pattern.matches(&path))
    }
}

fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize(&joined)
}

/// Lexically remove `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
