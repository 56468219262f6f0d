//! Session payloads piped by the host on stdin.
//!
//! Every field is optional -- the host may omit any of them, and the whole
//! blob may be absent. Unknown fields are silently dropped by serde_json,
//! so payload growth never breaks deserialization.

use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;

/// Native-mode payloads carry a transcript path and usage counters; allow
/// room for them.
pub const NATIVE_STDIN_LIMIT: u64 = 1 << 20;

/// Hook payloads are small; cap the read well below the native limit.
pub const HOOK_STDIN_LIMIT: u64 = 1 << 16;

/// How long a hook entry point waits for stdin before synthesizing a
/// default payload.
pub const HOOK_STDIN_TIMEOUT: Duration = Duration::from_millis(100);

/// The rich payload piped to `glint render` on each refresh.
#[derive(Debug, Default, Deserialize)]
pub struct NativeInput {
    pub cwd: Option<String>,
    pub model: Option<ModelInfo>,
    pub workspace: Option<WorkspaceInfo>,
    pub cost: Option<CostInfo>,
    pub transcript_path: Option<String>,
    pub context_window: Option<ContextWindow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelInfo {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkspaceInfo {
    pub current_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CostInfo {
    pub total_cost_usd: Option<f64>,
    pub total_duration_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContextWindow {
    pub context_window_size: Option<u64>,
    pub current_usage: Option<ContextUsage>,
}

/// Authoritative token counters reported by the host. Preferred over the
/// character heuristic whenever present.
#[derive(Debug, Default, Deserialize)]
pub struct ContextUsage {
    pub input_tokens: Option<u64>,
    pub cache_creation_input_tokens: Option<u64>,
    pub cache_read_input_tokens: Option<u64>,
}

impl ContextUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens.unwrap_or(0)
            + self.cache_creation_input_tokens.unwrap_or(0)
            + self.cache_read_input_tokens.unwrap_or(0)
    }
}

/// The slimmer payload piped to hook entry points.
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    pub conversation_summary: Option<String>,
    pub working_directory: Option<String>,
    pub model: Option<String>,
}

/// Bounded blocking read of stdin. Returns `None` on read failure or when
/// nothing but whitespace arrived.
pub fn read_stdin(limit: u64) -> Option<String> {
    let mut buf = String::new();
    std::io::stdin().lock().take(limit).read_to_string(&mut buf).ok()?;
    if buf.trim().is_empty() {
        None
    } else {
        Some(buf)
    }
}

/// Bounded read of stdin that gives up after `timeout`.
///
/// The reader thread is abandoned on timeout rather than killed; it exits
/// with the process. Cooperative, best-effort cancellation.
pub fn read_stdin_timeout(limit: u64, timeout: Duration) -> Option<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(read_stdin(limit));
    });
    rx.recv_timeout(timeout).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_input_parses_full_payload() {
        let json = r#"{
            "cwd": "/home/u/project",
            "model": {"id": "claude-opus-4-6", "display_name": "Opus"},
            "workspace": {"current_dir": "/home/u/project/src"},
            "cost": {"total_cost_usd": 1.25, "total_duration_ms": 60000},
            "transcript_path": "/tmp/t.jsonl",
            "context_window": {
                "context_window_size": 200000,
                "current_usage": {
                    "input_tokens": 1000,
                    "cache_creation_input_tokens": 200,
                    "cache_read_input_tokens": 300
                }
            }
        }"#;
        let input: NativeInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.cwd.as_deref(), Some("/home/u/project"));
        let usage = input.context_window.unwrap().current_usage.unwrap();
        assert_eq!(usage.total(), 1500);
    }

    #[test]
    fn native_input_empty_object_is_all_defaults() {
        let input: NativeInput = serde_json::from_str("{}").unwrap();
        assert!(input.cwd.is_none());
        assert!(input.context_window.is_none());
    }

    #[test]
    fn native_input_ignores_unknown_fields() {
        let input: NativeInput =
            serde_json::from_str(r#"{"session_id": "abc", "cwd": "/x"}"#).unwrap();
        assert_eq!(input.cwd.as_deref(), Some("/x"));
    }

    #[test]
    fn hook_input_parses_camel_case_event() {
        let json = r#"{"eventName": "SessionStart", "conversation_summary": "hi", "model": "m"}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.event_name.as_deref(), Some("SessionStart"));
        assert_eq!(input.conversation_summary.as_deref(), Some("hi"));
    }

    #[test]
    fn context_usage_total_tolerates_missing_fields() {
        let usage: ContextUsage = serde_json::from_str(r#"{"input_tokens": 7}"#).unwrap();
        assert_eq!(usage.total(), 7);
        assert_eq!(ContextUsage::default().total(), 0);
    }
}
