//! Layered configuration: defaults, environment, JSON config file, then a
//! model-derived context-window override.

pub mod models;
pub mod schema;

use std::path::PathBuf;

use tracing::debug;

pub use schema::{BarBackground, BarColor, BarStyle, Config, PathMode};

use schema::FileOverrides;

/// Resolve the effective configuration for this invocation.
///
/// Layers apply in fixed order, later overriding earlier: built-in defaults,
/// environment variables, the optional JSON config file, and finally the
/// model-derived max-token override (only when a model is known).
pub fn resolve(model: Option<&str>) -> Config {
    let mut config = Config::default();

    apply_env(&mut config);

    if let Some(overrides) = load_file() {
        apply_file(&mut config, &overrides);
    }

    if let Some(model) = model {
        config.max_tokens = models::max_tokens_for_model(model);
    }

    config
}

// ---------------------------------------------------------------------------
// Environment layer
// ---------------------------------------------------------------------------

fn apply_env(config: &mut Config) {
    if let Ok(raw) = std::env::var("GLINT_MAX_TOKENS") {
        set_max_tokens(config, &raw);
    }
    if let Ok(raw) = std::env::var("GLINT_BAR_WIDTH") {
        set_bar_length(config, &raw);
    }
    if let Ok(raw) = std::env::var("GLINT_ICONS") {
        set_icons(config, &raw);
    }
}

/// Invalid overrides are discarded, keeping the prior value.
fn set_max_tokens(config: &mut Config, raw: &str) {
    match raw.trim().parse::<i64>() {
        Ok(v) if v > 0 => config.max_tokens = v as u64,
        _ => debug!(raw, "ignoring invalid max-tokens override"),
    }
}

fn set_bar_length(config: &mut Config, raw: &str) {
    match raw.trim().parse::<i64>() {
        Ok(v) if v > 0 => config.bar.length = v as usize,
        _ => debug!(raw, "ignoring invalid bar-width override"),
    }
}

fn set_icons(config: &mut Config, raw: &str) {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => config.icons = true,
        "0" | "false" | "no" | "off" => config.icons = false,
        _ => debug!(raw, "ignoring invalid icons override"),
    }
}

// ---------------------------------------------------------------------------
// File layer
// ---------------------------------------------------------------------------

/// Locate the JSON config file. `GLINT_CONFIG` wins (useful for testing),
/// then the platform config directory.
fn config_path() -> Option<PathBuf> {
    std::env::var("GLINT_CONFIG")
        .ok()
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("glint").join("config.json")))
}

/// Read and parse the config file. Missing or unparsable files skip the
/// layer entirely.
fn load_file() -> Option<FileOverrides> {
    let path = config_path()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(overrides) => Some(overrides),
        Err(err) => {
            debug!(path = %path.display(), %err, "ignoring unparsable config file");
            None
        }
    }
}

fn apply_file(config: &mut Config, overrides: &FileOverrides) {
    if let Some(max) = overrides.max_tokens {
        if max > 0 {
            config.max_tokens = max as u64;
        }
    }
    if let Some(icons) = overrides.icons {
        config.icons = icons;
    }
    if let Some(one_line) = overrides.one_line {
        config.one_line = one_line;
    }
    if let Some(separator) = &overrides.separator {
        config.separator = separator.clone();
    }
    if let Some(path) = &overrides.path {
        if let Some(mode) = path.mode {
            config.path_mode = mode;
        }
    }
    if let Some(git) = &overrides.git {
        if let Some(enabled) = git.enabled {
            config.git.enabled = enabled;
        }
        if let Some(line_counts) = git.line_counts {
            config.git.line_counts = line_counts;
        }
        if let Some(file_counts) = git.file_counts {
            config.git.file_counts = file_counts;
        }
    }
    if let Some(session) = &overrides.session {
        if let Some(cost) = session.cost {
            config.session.cost = cost;
        }
        if let Some(duration) = session.duration {
            config.session.duration = duration;
        }
        if let Some(tokens) = session.tokens {
            config.session.tokens = tokens;
        }
        if let Some(percentage) = session.percentage {
            config.session.percentage = percentage;
        }
        if let Some(decimals) = session.decimals {
            config.session.decimals = decimals;
        }
        if let Some(precision) = session.cost_precision {
            if precision <= 2 {
                config.session.cost_precision = precision;
            }
        }
        if let Some(bar) = &session.bar {
            if let Some(style) = bar.style {
                config.bar.style = style;
            }
            if let Some(color) = bar.color {
                config.bar.color = color;
            }
            if let Some(background) = bar.background {
                config.bar.background = background;
            }
            if let Some(length) = bar.length {
                // zero disables the bar; negatives are discarded
                if length >= 0 {
                    config.bar.length = length as usize;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::schema::{BarStyle, PathMode};

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.max_tokens, 200_000);
        assert_eq!(config.bar.length, 10);
        assert_eq!(config.separator, " | ");
        assert!(!config.one_line);
        assert!(config.git.enabled);
        assert!(!config.git.file_counts);
    }

    #[test]
    fn env_values_parse_and_validate() {
        let mut config = Config::default();
        set_max_tokens(&mut config, "500000");
        assert_eq!(config.max_tokens, 500_000);

        set_max_tokens(&mut config, "banana");
        assert_eq!(config.max_tokens, 500_000);

        set_max_tokens(&mut config, "-3");
        assert_eq!(config.max_tokens, 500_000);

        set_max_tokens(&mut config, "0");
        assert_eq!(config.max_tokens, 500_000);

        set_bar_length(&mut config, "20");
        assert_eq!(config.bar.length, 20);
        set_bar_length(&mut config, "0");
        assert_eq!(config.bar.length, 20);

        set_icons(&mut config, "off");
        assert!(!config.icons);
        set_icons(&mut config, "???");
        assert!(!config.icons);
        set_icons(&mut config, "true");
        assert!(config.icons);
    }

    #[test]
    fn file_overrides_layer_onto_defaults() {
        let json = r#"{
            "one_line": true,
            "separator": " · ",
            "path": {"mode": "basename"},
            "git": {"file_counts": true},
            "session": {
                "cost_precision": 1,
                "bar": {"style": "braille", "length": 15}
            }
        }"#;
        let overrides: FileOverrides = serde_json::from_str(json).unwrap();
        let mut config = Config::default();
        apply_file(&mut config, &overrides);

        assert!(config.one_line);
        assert_eq!(config.separator, " · ");
        assert_eq!(config.path_mode, PathMode::Basename);
        assert!(config.git.file_counts);
        assert!(config.git.line_counts); // untouched
        assert_eq!(config.session.cost_precision, 1);
        assert_eq!(config.bar.style, BarStyle::Braille);
        assert_eq!(config.bar.length, 15);
    }

    #[test]
    fn file_rejects_nonpositive_max_and_negative_length() {
        let overrides: FileOverrides =
            serde_json::from_str(r#"{"max_tokens": 0, "session": {"bar": {"length": -1}}}"#)
                .unwrap();
        let mut config = Config::default();
        apply_file(&mut config, &overrides);
        assert_eq!(config.max_tokens, 200_000);
        assert_eq!(config.bar.length, 10);
    }

    #[test]
    fn file_zero_length_disables_bar() {
        let overrides: FileOverrides =
            serde_json::from_str(r#"{"session": {"bar": {"length": 0}}}"#).unwrap();
        let mut config = Config::default();
        apply_file(&mut config, &overrides);
        assert_eq!(config.bar.length, 0);
    }

    #[test]
    fn model_override_applies_last() {
        // resolve() consults the model table after the other layers
        let config = resolve(Some("claude-opus-4-6"));
        assert_eq!(config.max_tokens, 1_000_000);

        let config = resolve(Some("something-else"));
        assert_eq!(config.max_tokens, 200_000);
    }
}
