use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFile {
    pub themes: Vec<ThemeVariant>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeVariant {
    pub mode: String, // "light" or "dark"
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TuiTheme {
    pub background: Color,
    pub foreground: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub border: Color,
    pub link: Color,
    pub source: Color,
    pub muted: Color,
    pub bookmark: Color,
    pub error_bg: Color,
    pub error_fg: Color,
}

impl TuiTheme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(0xff, 0xfc, 0xf0),
            foreground: Color::Rgb(0x10, 0x0f, 0x0f),
            selection_bg: Color::Rgb(0xe6, 0xe4, 0xd9),
            selection_fg: Color::Rgb(0x10, 0x0f, 0x0f),
            border: Color::Rgb(0xb7, 0xb5, 0xac),
            link: Color::Rgb(0x20, 0x5e, 0xa6),
            source: Color::Rgb(0x66, 0x80, 0x0b),
            muted: Color::Rgb(0x6f, 0x6e, 0x69),
            bookmark: Color::Rgb(0xad, 0x83, 0x01),
            error_bg: Color::Rgb(0xaf, 0x30, 0x29),
            error_fg: Color::White,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x10, 0x0f, 0x0f),
            foreground: Color::Rgb(0xce, 0xcd, 0xc3),
            selection_bg: Color::Rgb(0x28, 0x27, 0x26),
            selection_fg: Color::Rgb(0xff, 0xfc, 0xf0),
            border: Color::Rgb(0x40, 0x3e, 0x3c),
            link: Color::Rgb(0x43, 0x85, 0xbe),
            source: Color::Rgb(0x87, 0x9a, 0x39),
            muted: Color::Rgb(0x87, 0x85, 0x80),
            bookmark: Color::Rgb(0xd0, 0xa2, 0x15),
            error_bg: Color::Rgb(0xd1, 0x4d, 0x41),
            error_fg: Color::Black,
        }
    }

    /// Built-in palette for the requested mode.
    pub fn builtin(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// Palette for `dark`, taken from `theme_file` when it loads, else built in.
    pub fn resolve(theme_file: Option<&str>, dark: bool) -> Self {
        let mode = if dark { "dark" } else { "light" };
        match theme_file {
            Some(path) => match load_theme(Path::new(path), mode) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::error!("Failed to load theme '{}': {:#}", path, e);
                    Self::builtin(dark)
                }
            },
            None => Self::builtin(dark),
        }
    }
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self::light()
    }
}

/// Load the `mode` variant of a theme file, filling gaps from the built-in palette.
#[tracing::instrument(skip(path), fields(path = ?path))]
pub fn load_theme(path: &Path, mode: &str) -> Result<TuiTheme> {
    let content = fs::read_to_string(path).context("Failed to read theme file")?;
    parse_theme(&content, mode)
}

pub fn parse_theme(content: &str, mode: &str) -> Result<TuiTheme> {
    let theme_file: ThemeFile =
        serde_json::from_str(content).context("Failed to parse theme JSON")?;

    let variant = theme_file
        .themes
        .iter()
        .find(|t| t.mode == mode)
        .or_else(|| theme_file.themes.first())
        .context("No matching theme variant found")?;

    let base = TuiTheme::builtin(mode == "dark");
    let pick = |keys: &[&str], fallback: Color| {
        keys.iter()
            .find_map(|k| variant.colors.get(*k))
            .map(|hex| parse_color(hex))
            .unwrap_or(fallback)
    };

    Ok(TuiTheme {
        background: pick(&["background"], base.background),
        foreground: pick(&["foreground"], base.foreground),
        selection_bg: pick(
            &["selection.background", "list.active.background"],
            base.selection_bg,
        ),
        selection_fg: pick(&["accent.foreground", "foreground"], base.selection_fg),
        border: pick(&["border"], base.border),
        link: pick(&["base.blue", "link"], base.link),
        source: pick(&["base.green", "source"], base.source),
        muted: pick(&["muted.foreground"], base.muted),
        bookmark: pick(&["base.yellow", "bookmark"], base.bookmark),
        error_bg: pick(&["base.red", "danger.background"], base.error_bg),
        error_fg: pick(&["danger.foreground"], base.error_fg),
    })
}

fn parse_color(hex: &str) -> Color {
    if let Ok(c) = hex.parse::<Color>() {
        return c;
    }

    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
        return Color::Reset;
    }

    // Alpha, when present, is ignored.
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    Color::Rgb(channel(0), channel(2), channel(4))
}
