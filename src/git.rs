//! Read-only git probe for the statusline.
//!
//! Every helper degrades to a default rather than erroring: a missing git
//! binary, a directory outside any repository, or unparsable tool output
//! all yield the "not a repository" sentinel. The statusline must never
//! fail because of the version-control tool.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Summed line/file counts for one diff scope (staged or unstaged).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffTotals {
    pub files_changed: u32,
    pub added: u32,
    pub deleted: u32,
}

/// Snapshot of the repository state at `probe` time.
///
/// When `is_repo` is false all counts are zero and `branch` is empty.
#[derive(Debug, Clone, Default)]
pub struct GitStatus {
    pub branch: String,
    pub is_repo: bool,
    pub dirty: bool,
    pub staged: DiffTotals,
    pub unstaged: DiffTotals,
    pub root: Option<PathBuf>,
}

impl GitStatus {
    pub fn not_a_repo() -> Self {
        Self::default()
    }
}

/// Probe the repository containing `dir`. Never errors.
pub fn probe(dir: &Path) -> GitStatus {
    if which::which("git").is_err() {
        debug!("git not found on PATH");
        return GitStatus::not_a_repo();
    }

    match run_git(dir, &["rev-parse", "--is-inside-work-tree"]) {
        Some(out) if out.trim() == "true" => {}
        _ => return GitStatus::not_a_repo(),
    }

    let root = run_git(dir, &["rev-parse", "--show-toplevel"])
        .map(|out| PathBuf::from(out.trim()));

    let branch = match run_git(dir, &["branch", "--show-current"]) {
        Some(out) if !out.trim().is_empty() => out.trim().to_string(),
        // empty output means detached HEAD
        _ => "HEAD".to_string(),
    };

    let unstaged_dirty = has_changes(dir, false);
    let staged_dirty = has_changes(dir, true);
    let dirty = unstaged_dirty || staged_dirty;

    // Line counts are only worth two extra subprocesses when something
    // actually changed.
    let (staged, unstaged) = if dirty {
        (diff_totals(dir, true), diff_totals(dir, false))
    } else {
        (DiffTotals::default(), DiffTotals::default())
    };

    GitStatus {
        branch,
        is_repo: true,
        dirty,
        staged,
        unstaged,
        root,
    }
}

/// Run a git command in `dir`, returning stdout on success.
fn run_git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        debug!(?args, code = ?output.status.code(), "git command failed");
        return None;
    }

    String::from_utf8(output.stdout).ok()
}

/// `git diff --quiet` exits 1 when the scope has differences.
fn has_changes(dir: &Path, staged: bool) -> bool {
    let args: &[&str] = if staged {
        &["diff", "--cached", "--quiet"]
    } else {
        &["diff", "--quiet"]
    };

    match Command::new("git").args(args).current_dir(dir).output() {
        Ok(out) => out.status.code() == Some(1),
        Err(_) => false,
    }
}

fn diff_totals(dir: &Path, staged: bool) -> DiffTotals {
    let args: &[&str] = if staged {
        &["diff", "--cached", "--numstat"]
    } else {
        &["diff", "--numstat"]
    };

    match run_git(dir, args) {
        Some(out) => parse_numstat(&out),
        None => DiffTotals::default(),
    }
}

/// Parse `git diff --numstat` output: one `added\tdeleted\tpath` line per
/// file. Binary files report `-` for both counts and parse as 0.
fn parse_numstat(out: &str) -> DiffTotals {
    let mut totals = DiffTotals::default();
    for line in out.lines() {
        let mut fields = line.split('\t');
        let added = fields.next().and_then(|f| f.parse::<u32>().ok()).unwrap_or(0);
        let deleted = fields.next().and_then(|f| f.parse::<u32>().ok()).unwrap_or(0);
        if fields.next().is_none() {
            continue;
        }
        totals.files_changed += 1;
        totals.added += added;
        totals.deleted += deleted;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numstat_sums_lines_and_files() {
        let out = "10\t2\tsrc/main.rs\n3\t0\tsrc/lib.rs\n";
        let totals = parse_numstat(out);
        assert_eq!(totals.files_changed, 2);
        assert_eq!(totals.added, 13);
        assert_eq!(totals.deleted, 2);
    }

    #[test]
    fn numstat_binary_files_count_as_zero_lines() {
        let out = "-\t-\tassets/logo.png\n5\t1\tsrc/main.rs\n";
        let totals = parse_numstat(out);
        assert_eq!(totals.files_changed, 2);
        assert_eq!(totals.added, 5);
        assert_eq!(totals.deleted, 1);
    }

    #[test]
    fn numstat_ignores_malformed_lines() {
        let out = "garbage\n\n7\t7\ta.txt\n";
        let totals = parse_numstat(out);
        assert_eq!(totals.files_changed, 1);
        assert_eq!(totals.added, 7);
        assert_eq!(totals.deleted, 7);
    }

    #[test]
    fn probe_outside_repo_returns_sentinel() {
        if which::which("git").is_err() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        let status = probe(dir.path());
        assert!(!status.is_repo);
        assert!(status.branch.is_empty());
        assert!(!status.dirty);
        assert_eq!(status.staged, DiffTotals::default());
    }

    #[test]
    fn probe_fresh_repo_is_clean() {
        if which::which("git").is_err() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        let init = Command::new("git")
            .args(["init", "-b", "main"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        if !init.status.success() {
            eprintln!("Skipping: git init -b unsupported");
            return;
        }
        let status = probe(dir.path());
        assert!(status.is_repo);
        assert_eq!(status.branch, "main");
        assert!(!status.dirty);
        assert!(status.root.is_some());
    }

    #[test]
    fn probe_staged_file_is_dirty_with_counts() {
        if which::which("git").is_err() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        let init = Command::new("git")
            .args(["init", "-b", "main"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        if !init.status.success() {
            eprintln!("Skipping: git init -b unsupported");
            return;
        }
        std::fs::write(dir.path().join("a.txt"), "one\ntwo\nthree\n").unwrap();
        Command::new("git")
            .args(["add", "a.txt"])
            .current_dir(dir.path())
            .output()
            .unwrap();

        let status = probe(dir.path());
        assert!(status.dirty);
        assert_eq!(status.staged.files_changed, 1);
        assert_eq!(status.staged.added, 3);
        assert_eq!(status.unstaged.files_changed, 0);
    }
}
