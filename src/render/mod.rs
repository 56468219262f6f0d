//! Statusline composition: turns the probed git state, token usage, and
//! session metadata into the final display string plus its machine-readable
//! companions.

pub mod bar;
pub mod path;

use std::path::PathBuf;

use colored::{ColoredString, Colorize};

use crate::config::{BarBackground, Config, PathMode};
use crate::git::GitStatus;
use crate::tokens::TokenUsage;

/// Usage percentage at which the milder context warning fires.
pub const CAUTION_THRESHOLD: u8 = 75;
/// Usage percentage at which the "nearly full" warning fires.
pub const CRITICAL_THRESHOLD: u8 = 90;

/// The two presentation profiles served by the composer. They share every
/// component and differ only in fallback policy: the hook profile shows a
/// `no-git` sentinel where the native profile shows nothing, and formats
/// the path relative to the repository root instead of the home directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Native,
    Hook,
}

/// Session metadata from the input payload, with fallbacks already applied
/// by the entry point.
#[derive(Debug, Default)]
pub struct SessionMeta {
    pub model_label: Option<String>,
    pub cost_usd: Option<f64>,
    pub duration_ms: Option<u64>,
    pub cwd: PathBuf,
}

/// A composed statusline: one render, three output shapes, plus a warning
/// channel that is surfaced separately and never concatenated into the
/// display.
#[derive(Debug)]
pub struct Statusline {
    display: String,
    compact: String,
    note: String,
    warning: Option<String>,
}

impl Statusline {
    /// ANSI-styled display text: one line, or two lines with a blank line
    /// between them when one-line mode is off.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Plain single-line form for logs.
    pub fn compact(&self) -> &str {
        &self.compact
    }

    /// Plain key=value line for context injection.
    pub fn context_note(&self) -> &str {
        &self.note
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

pub fn compose(
    git: &GitStatus,
    usage: &TokenUsage,
    meta: &SessionMeta,
    config: &Config,
    profile: Profile,
) -> Statusline {
    Statusline {
        display: render_display(git, usage, meta, config, profile),
        compact: render_compact(git, usage, meta, config, profile),
        note: render_note(git, usage, meta, config, profile),
        warning: context_warning(usage.percentage),
    }
}

/// Separate "system message" channel: critical above 90%, caution above
/// 75%, nothing below.
pub fn context_warning(percentage: u8) -> Option<String> {
    if percentage >= CRITICAL_THRESHOLD {
        Some(format!(
            "Context nearly full: {}% of the window is used",
            percentage
        ))
    } else if percentage >= CAUTION_THRESHOLD {
        Some(format!(
            "Context usage is high: {}% of the window is used",
            percentage
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

fn render_display(
    git: &GitStatus,
    usage: &TokenUsage,
    meta: &SessionMeta,
    config: &Config,
    profile: Profile,
) -> String {
    let segments = build_segments(git, usage, meta, config, profile, true);
    let separator = tint(&config.separator, true, |s| s.dimmed());

    if config.one_line {
        join_segments(
            &[
                &segments.branch,
                &segments.file_stats,
                &segments.path,
                &segments.model,
                &segments.cost,
                &segments.duration,
                &segments.bar,
                &segments.tokens,
            ],
            &separator,
        )
    } else {
        let line1 = join_segments(
            &[
                &segments.branch,
                &segments.file_stats,
                &segments.path,
                &segments.model,
            ],
            &separator,
        );
        let line2 = join_segments(
            &[
                &segments.cost,
                &segments.duration,
                &segments.bar,
                &segments.tokens,
            ],
            &separator,
        );
        // The blank line between the two lines is part of the output
        // contract; see the two-line tests.
        format!("{}\n\n{}", line1, line2)
    }
}

fn render_compact(
    git: &GitStatus,
    usage: &TokenUsage,
    meta: &SessionMeta,
    config: &Config,
    profile: Profile,
) -> String {
    let segments = build_segments(git, usage, meta, config, profile, false);
    join_segments(
        &[
            &segments.branch,
            &segments.file_stats,
            &segments.path,
            &segments.model,
            &segments.cost,
            &segments.duration,
            &segments.tokens,
        ],
        &config.separator,
    )
}

fn render_note(
    git: &GitStatus,
    usage: &TokenUsage,
    meta: &SessionMeta,
    config: &Config,
    profile: Profile,
) -> String {
    let branch = if git.is_repo {
        git.branch.as_str()
    } else if profile == Profile::Hook {
        "no-git"
    } else {
        "-"
    };
    format!(
        "branch={} dirty={} path={} tokens={}/{} ({}%)",
        branch,
        git.dirty,
        path_text(git, meta, config, profile),
        usage.current,
        usage.max,
        usage.percentage
    )
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Segments {
    branch: String,
    file_stats: String,
    path: String,
    model: String,
    bar: String,
    tokens: String,
    cost: String,
    duration: String,
}

fn build_segments(
    git: &GitStatus,
    usage: &TokenUsage,
    meta: &SessionMeta,
    config: &Config,
    profile: Profile,
    colored: bool,
) -> Segments {
    Segments {
        branch: branch_segment(git, config, profile, colored),
        file_stats: file_stats_segment(git, config, colored),
        path: tint(&path_text(git, meta, config, profile), colored, |s| s.blue()),
        model: model_segment(meta, colored),
        // the bar only belongs in the styled display
        bar: if colored {
            bar::render_bar(
                usage.percentage,
                config.bar.length,
                config.bar.style,
                config.bar.color,
                config.bar.background,
            )
        } else {
            String::new()
        },
        tokens: token_segment(usage, config, colored),
        cost: cost_segment(meta, config, colored),
        duration: duration_segment(meta, config, colored),
    }
}

fn branch_segment(git: &GitStatus, config: &Config, profile: Profile, colored: bool) -> String {
    if !config.git.enabled {
        return String::new();
    }
    if !git.is_repo {
        return match profile {
            Profile::Native => String::new(),
            Profile::Hook => tint("no-git", colored, |s| s.dimmed()),
        };
    }

    let icon = if config.icons { "⎇ " } else { "" };
    let mut segment = format!("{}{}", icon, tint(&git.branch, colored, |s| s.cyan()));

    if git.dirty {
        segment.push_str(&tint("*", colored, |s| s.yellow()));
        if config.git.line_counts {
            let added = git.staged.added + git.unstaged.added;
            let deleted = git.staged.deleted + git.unstaged.deleted;
            segment.push(' ');
            segment.push_str(&tint(&format!("+{}", added), colored, |s| s.green()));
            segment.push(' ');
            segment.push_str(&tint(&format!("-{}", deleted), colored, |s| s.red()));
        }
    }
    segment
}

fn file_stats_segment(git: &GitStatus, config: &Config, colored: bool) -> String {
    if !config.git.enabled || !config.git.file_counts || !git.is_repo || !git.dirty {
        return String::new();
    }
    format!(
        "{} {}",
        tint(&format!("●{}", git.staged.files_changed), colored, |s| s.green()),
        tint(&format!("○{}", git.unstaged.files_changed), colored, |s| s.yellow()),
    )
}

fn path_text(git: &GitStatus, meta: &SessionMeta, config: &Config, profile: Profile) -> String {
    match profile {
        Profile::Native => path::format_path(&meta.cwd, dirs::home_dir().as_deref(), config.path_mode),
        Profile::Hook => match &git.root {
            Some(root) => path::format_path_from_root(&meta.cwd, root),
            None => path::format_path(&meta.cwd, dirs::home_dir().as_deref(), PathMode::Full),
        },
    }
}

fn model_segment(meta: &SessionMeta, colored: bool) -> String {
    match &meta.model_label {
        Some(label) => tint(label, colored, |s| s.dimmed()),
        None => String::new(),
    }
}

fn token_segment(usage: &TokenUsage, config: &Config, colored: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    if config.session.percentage {
        let text = format!("{}%", usage.percentage);
        parts.push(if colored {
            bar::paint(&text, bar::tier_color(usage.percentage), BarBackground::None)
        } else {
            text
        });
    }
    if config.session.tokens {
        let text = format!(
            "({}/{})",
            format_count(usage.current, config.session.decimals),
            format_count(usage.max, config.session.decimals)
        );
        parts.push(tint(&text, colored, |s| s.dimmed()));
    }
    parts.join(" ")
}

fn cost_segment(meta: &SessionMeta, config: &Config, colored: bool) -> String {
    if !config.session.cost {
        return String::new();
    }
    match meta.cost_usd {
        Some(cost) => tint(
            &format_cost(cost, config.session.cost_precision),
            colored,
            |s| s.green(),
        ),
        None => String::new(),
    }
}

fn duration_segment(meta: &SessionMeta, config: &Config, colored: bool) -> String {
    if !config.session.duration {
        return String::new();
    }
    match meta.duration_ms {
        Some(ms) => tint(&format_duration(ms), colored, |s| s.dimmed()),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Join non-empty segments; empty ones contribute nothing, so separators
/// never dangle.
fn join_segments(parts: &[&String], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

fn tint(text: &str, colored: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if colored {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Downscale a token count at the 1 000 / 1 000 000 boundaries. One decimal
/// place above 1K only when `decimals` is set, otherwise whole units.
pub fn format_count(n: u64, decimals: bool) -> String {
    if n >= 1_000_000 {
        if decimals {
            format!("{:.1}M", n as f64 / 1_000_000.0)
        } else {
            format!("{}M", (n as f64 / 1_000_000.0).round() as u64)
        }
    } else if n >= 1_000 {
        if decimals {
            format!("{:.1}K", n as f64 / 1_000.0)
        } else {
            format!("{}K", (n as f64 / 1_000.0).round() as u64)
        }
    } else {
        n.to_string()
    }
}

pub fn format_cost(cost: f64, precision: u8) -> String {
    format!("${:.*}", precision.min(2) as usize, cost)
}

/// Milliseconds to `XhYm` above an hour, else `Ym`; zero still shows `0m`.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    if minutes >= 60 {
        format!("{}h{}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}
