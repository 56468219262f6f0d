//! Working-directory formatting for the statusline.

use std::path::{Component, Path};

use crate::config::PathMode;

/// Format an absolute path for display, substituting a leading home prefix
/// with `~`.
///
/// `Truncated` keeps only the last two segments behind an ellipsis whenever
/// more than two segments remain after substitution. The two-segment
/// threshold fires even for moderately short paths; that behavior is kept
/// as-is.
pub fn format_path(path: &Path, home: Option<&Path>, mode: PathMode) -> String {
    let substituted = substitute_home(path, home);
    match mode {
        PathMode::Full => substituted,
        PathMode::Basename => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(substituted),
        PathMode::Truncated => {
            let segments: Vec<&str> = substituted
                .split('/')
                .filter(|segment| !segment.is_empty())
                .collect();
            if segments.len() > 2 {
                format!("…/{}/{}", segments[segments.len() - 2], segments[segments.len() - 1])
            } else {
                substituted
            }
        }
    }
}

/// Format a path relative to a repository root (hook profile): the root
/// itself shows as `~`, shallow paths in full, deep paths keep only the
/// first and last segment.
pub fn format_path_from_root(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<&str> = rel
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect();

    match segments.len() {
        0 => "~".to_string(),
        1 | 2 => format!("~/{}", segments.join("/")),
        _ => format!("~/{}/…/{}", segments[0], segments[segments.len() - 1]),
    }
}

fn substitute_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home {
        if let Ok(rest) = path.strip_prefix(home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
