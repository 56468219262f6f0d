use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::debug;

use crate::config;
use crate::git;
use crate::render::{self, Profile, SessionMeta};
use crate::session::{self, NativeInput};
use crate::tokens::{self, TokenUsage};

/// Arguments for the `glint render` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,

    /// Force single-line output regardless of configuration
    #[arg(long)]
    pub one_line: bool,

    /// Propagate internal errors instead of degrading (manual testing)
    #[arg(long, hide = true)]
    pub strict: bool,
}

/// Entry point. Wraps `run_inner` in `catch_unwind` so that panics are
/// swallowed and the process always exits 0 -- the host session must never
/// be blocked by its statusline. `--strict` opts out for manual testing.
pub fn run(args: Args) -> Result<()> {
    let strict = args.strict;
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_inner(args)));

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) if strict => Err(err),
        Ok(Err(_)) | Err(_) => {
            println!();
            Ok(())
        }
    }
}

fn run_inner(args: Args) -> Result<()> {
    // The host pipes stdout, so colored would normally disable itself.
    // Force colors on unless the user opted out.
    if args.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else {
        colored::control::set_override(true);
    }

    let input = session::read_stdin(session::NATIVE_STDIN_LIMIT)
        .map(|raw| serde_json::from_str::<NativeInput>(&raw).unwrap_or_default())
        .unwrap_or_default();

    let model = input
        .model
        .as_ref()
        .and_then(|m| m.display_name.clone().or_else(|| m.id.clone()));

    let mut config = config::resolve(model.as_deref());
    if args.one_line {
        config.one_line = true;
    }

    let cwd = input
        .workspace
        .as_ref()
        .and_then(|w| w.current_dir.clone())
        .or_else(|| input.cwd.clone())
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let git = git::probe(&cwd);

    let current = current_tokens(&input);
    let max = input
        .context_window
        .as_ref()
        .and_then(|c| c.context_window_size)
        .filter(|&size| size > 0)
        .unwrap_or(config.max_tokens);
    let usage = TokenUsage::compute(current, max);

    let meta = SessionMeta {
        model_label: Some(model.unwrap_or_else(|| "unknown".to_string())),
        cost_usd: Some(
            input
                .cost
                .as_ref()
                .and_then(|c| c.total_cost_usd)
                .unwrap_or(0.0),
        ),
        duration_ms: Some(
            input
                .cost
                .as_ref()
                .and_then(|c| c.total_duration_ms)
                .unwrap_or(0),
        ),
        cwd,
    };

    let line = render::compose(&git, &usage, &meta, &config, Profile::Native);
    debug!(statusline = %line.compact(), "rendered");

    println!("{}", line.display());
    Ok(())
}

/// Authoritative counters win; a readable transcript is the heuristic
/// fallback; otherwise zero.
fn current_tokens(input: &NativeInput) -> u64 {
    if let Some(usage) = input
        .context_window
        .as_ref()
        .and_then(|c| c.current_usage.as_ref())
    {
        return usage.total();
    }
    if let Some(path) = input.transcript_path.as_deref() {
        if let Ok(contents) = std::fs::read_to_string(path) {
            return tokens::estimate_tokens(&contents);
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_tokens_prefers_reported_usage() {
        let input: NativeInput = serde_json::from_str(
            r#"{
                "transcript_path": "/nonexistent",
                "context_window": {"current_usage": {"input_tokens": 1234}}
            }"#,
        )
        .unwrap();
        assert_eq!(current_tokens(&input), 1234);
    }

    #[test]
    fn current_tokens_estimates_from_transcript() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("t.jsonl");
        std::fs::write(&path, "abcdefgh").unwrap();
        let input: NativeInput = serde_json::from_str(&format!(
            r#"{{"transcript_path": "{}"}}"#,
            path.display()
        ))
        .unwrap();
        assert_eq!(current_tokens(&input), 2);
    }

    #[test]
    fn current_tokens_defaults_to_zero() {
        let input = NativeInput::default();
        assert_eq!(current_tokens(&input), 0);
    }
}
