use serde::Deserialize;

/// Fully resolved statusline configuration. Built once per invocation by
/// [`crate::config::resolve`] and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_tokens: u64,
    pub icons: bool,
    pub one_line: bool,
    pub separator: String,
    pub path_mode: PathMode,
    pub git: GitToggles,
    pub session: SessionToggles,
    pub bar: BarConfig,
}

#[derive(Debug, Clone)]
pub struct GitToggles {
    pub enabled: bool,
    pub line_counts: bool,
    pub file_counts: bool,
}

#[derive(Debug, Clone)]
pub struct SessionToggles {
    pub cost: bool,
    pub duration: bool,
    pub tokens: bool,
    pub percentage: bool,
    pub decimals: bool,
    pub cost_precision: u8,
}

#[derive(Debug, Clone)]
pub struct BarConfig {
    pub style: BarStyle,
    pub color: BarColor,
    pub background: BarBackground,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathMode {
    Full,
    Truncated,
    Basename,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarStyle {
    Filled,
    Rectangle,
    Braille,
}

/// `Progressive` follows the usage thresholds; every other variant paints
/// the whole bar in that one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarColor {
    Progressive,
    Green,
    Yellow,
    Red,
    BrightRed,
    Blue,
    Cyan,
    Magenta,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarBackground {
    None,
    Black,
    BrightBlack,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tokens: crate::config::models::DEFAULT_MAX_TOKENS,
            icons: true,
            one_line: false,
            separator: " | ".to_string(),
            path_mode: PathMode::Truncated,
            git: GitToggles {
                enabled: true,
                line_counts: true,
                file_counts: false,
            },
            session: SessionToggles {
                cost: true,
                duration: true,
                tokens: true,
                percentage: true,
                decimals: false,
                cost_precision: 2,
            },
            bar: BarConfig {
                style: BarStyle::Filled,
                color: BarColor::Progressive,
                background: BarBackground::None,
                length: 10,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// On-disk overrides
// ---------------------------------------------------------------------------

/// Partial overrides read from the optional JSON config file. Missing file
/// or missing fields are not errors -- every field layers onto the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileOverrides {
    pub max_tokens: Option<i64>,
    pub icons: Option<bool>,
    pub one_line: Option<bool>,
    pub separator: Option<String>,
    pub path: Option<PathSection>,
    pub git: Option<GitSection>,
    pub session: Option<SessionSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathSection {
    pub mode: Option<PathMode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitSection {
    pub enabled: Option<bool>,
    pub line_counts: Option<bool>,
    pub file_counts: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub cost: Option<bool>,
    pub duration: Option<bool>,
    pub tokens: Option<bool>,
    pub percentage: Option<bool>,
    pub decimals: Option<bool>,
    pub cost_precision: Option<u8>,
    pub bar: Option<BarSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BarSection {
    pub style: Option<BarStyle>,
    pub color: Option<BarColor>,
    pub background: Option<BarBackground>,
    pub length: Option<i64>,
}
