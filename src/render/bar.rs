//! Progress bar rendering: pure percentage -> styled glyph string.

use colored::{ColoredString, Colorize};

use crate::config::{BarBackground, BarColor, BarStyle};

/// Fill levels for the braille style, emptiest first. Six steps separate
/// adjacent cells, so one character encodes sub-cell fractions.
const BRAILLE_LEVELS: [char; 7] = ['⠀', '⣀', '⣄', '⣤', '⣦', '⣶', '⣿'];

/// Render a progress bar. `length == 0` yields an empty string; the
/// percentage is clamped defensively even though callers pre-clamp.
pub fn render_bar(
    percentage: u8,
    length: usize,
    style: BarStyle,
    color: BarColor,
    background: BarBackground,
) -> String {
    if length == 0 {
        return String::new();
    }
    let pct = percentage.min(100);
    let fg = match color {
        BarColor::Progressive => tier_color(pct),
        fixed => fixed,
    };

    match style {
        BarStyle::Filled => two_run_bar(pct, length, '█', '░', fg, background),
        BarStyle::Rectangle => two_run_bar(pct, length, '▰', '▱', fg, background),
        BarStyle::Braille => braille_bar(pct, length, fg, background),
    }
}

/// Threshold palette for progressive coloring.
pub fn tier_color(pct: u8) -> BarColor {
    if pct >= 90 {
        BarColor::BrightRed
    } else if pct >= 70 {
        BarColor::Red
    } else if pct >= 50 {
        BarColor::Yellow
    } else {
        BarColor::Green
    }
}

/// Apply a resolved foreground color and optional background to one run of
/// glyphs.
pub fn paint(run: &str, fg: BarColor, background: BarBackground) -> String {
    let colored: ColoredString = match fg {
        // Progressive is resolved before painting; green is its floor tier
        BarColor::Progressive | BarColor::Green => run.green(),
        BarColor::Yellow => run.yellow(),
        BarColor::Red => run.red(),
        BarColor::BrightRed => run.bright_red(),
        BarColor::Blue => run.blue(),
        BarColor::Cyan => run.cyan(),
        BarColor::Magenta => run.magenta(),
        BarColor::White => run.white(),
    };
    let colored = match background {
        BarBackground::None => colored,
        BarBackground::Black => colored.on_black(),
        BarBackground::BrightBlack => colored.on_bright_black(),
        BarBackground::Blue => colored.on_blue(),
        BarBackground::Magenta => colored.on_magenta(),
        BarBackground::Cyan => colored.on_cyan(),
        BarBackground::White => colored.on_white(),
    };
    colored.to_string()
}

fn two_run_bar(
    pct: u8,
    length: usize,
    filled_glyph: char,
    empty_glyph: char,
    fg: BarColor,
    background: BarBackground,
) -> String {
    let filled = (((pct as f64) / 100.0) * length as f64).round() as usize;
    let filled = filled.min(length);
    let empty = length - filled;

    let mut out = String::with_capacity(length * 4);
    if filled > 0 {
        out.push_str(&paint(&filled_glyph.to_string().repeat(filled), fg, background));
    }
    if empty > 0 {
        out.push_str(&paint(&empty_glyph.to_string().repeat(empty), fg, background));
    }
    out
}

fn braille_bar(pct: u8, length: usize, fg: BarColor, background: BarBackground) -> String {
    let steps_per_cell = BRAILLE_LEVELS.len() - 1;
    let total_steps = length * steps_per_cell;
    let current_step = (((pct as f64) / 100.0) * total_steps as f64).round() as usize;

    let full = (current_step / steps_per_cell).min(length);
    let partial = if full == length {
        0
    } else {
        current_step % steps_per_cell
    };
    let empty = length - full - usize::from(partial > 0);

    let mut out = String::with_capacity(length * 4);
    if full > 0 {
        out.push_str(&paint(
            &BRAILLE_LEVELS[steps_per_cell].to_string().repeat(full),
            fg,
            background,
        ));
    }
    if partial > 0 {
        out.push_str(&paint(&BRAILLE_LEVELS[partial].to_string(), fg, background));
    }
    if empty > 0 {
        out.push_str(&paint(
            &BRAILLE_LEVELS[0].to_string().repeat(empty),
            fg,
            background,
        ));
    }
    out
}
