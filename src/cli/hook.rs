//! Lifecycle hook entry points.
//!
//! Both hooks read the (optional) payload from stdin with a short timeout,
//! render through the composer under the hook profile, and print exactly
//! one JSON envelope line. Output must be valid JSON even on internal
//! failure, so the fallback is the minimal envelope with only the event
//! name.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Subcommand};
use tracing::debug;

use crate::config;
use crate::git;
use crate::render::{self, Profile, SessionMeta};
use crate::session::{self, HookInput};
use crate::tokens::TokenUsage;

/// Arguments for the `glint hook` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    #[command(subcommand)]
    pub event: HookEvent,
}

#[derive(Subcommand)]
pub enum HookEvent {
    /// Runs when a session starts
    SessionStart,
    /// Runs when the user submits a prompt
    UserPromptSubmit,
}

impl HookEvent {
    fn name(&self) -> &'static str {
        match self {
            HookEvent::SessionStart => "SessionStart",
            HookEvent::UserPromptSubmit => "UserPromptSubmit",
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let event = args.event.name();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| build_envelope(event)));

    let envelope = match result {
        Ok(Ok(envelope)) => envelope,
        _ => serde_json::json!({ "hookSpecificOutput": { "hookEventName": event } }),
    };

    println!("{}", envelope);
    Ok(())
}

fn build_envelope(event: &str) -> Result<serde_json::Value> {
    let input = session::read_stdin_timeout(session::HOOK_STDIN_LIMIT, session::HOOK_STDIN_TIMEOUT)
        .map(|raw| serde_json::from_str::<HookInput>(&raw).unwrap_or_default())
        .unwrap_or_default();

    // the payload's own event name wins over the subcommand when present
    let event = input.event_name.clone().unwrap_or_else(|| event.to_string());

    let config = config::resolve(input.model.as_deref());

    let cwd = input
        .working_directory
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let git = git::probe(&cwd);
    let usage = TokenUsage::from_text(
        input.conversation_summary.as_deref().unwrap_or(""),
        config.max_tokens,
    );

    let meta = SessionMeta {
        model_label: input.model.clone(),
        cost_usd: None,
        duration_ms: None,
        cwd,
    };

    let line = render::compose(&git, &usage, &meta, &config, Profile::Hook);
    debug!(statusline = %line.compact(), "rendered hook envelope");

    let mut output = serde_json::json!({
        "hookEventName": event,
        "additionalContext": line.context_note(),
    });
    if let Some(warning) = line.warning() {
        output["systemMessage"] = serde_json::Value::String(warning.to_string());
    }

    Ok(serde_json::json!({ "hookSpecificOutput": output }))
}
