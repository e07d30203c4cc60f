//! Syntax highlighting for code blocks.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions and
//! emits HTML with inline styles, so rendered output needs no stylesheet.

use std::sync::{Mutex, OnceLock};

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Which syntect theme family to render with.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

static THEME_OVERRIDE: OnceLock<Mutex<ThemeMode>> = OnceLock::new();

/// Select the theme used by subsequent highlighting calls.
pub fn set_theme_mode(mode: ThemeMode) {
    let lock = THEME_OVERRIDE.get_or_init(|| Mutex::new(ThemeMode::default()));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

pub fn theme_mode() -> ThemeMode {
    THEME_OVERRIDE
        .get_or_init(|| Mutex::new(ThemeMode::default()))
        .lock()
        .map_or_else(|_| ThemeMode::default(), |guard| *guard)
}

/// Resolve a fence language tag to a syntax definition.
///
/// Tries the tag as a file-extension token first (`js`, `rs`, `py`) and then
/// as a syntax name (`JavaScript`, `Rust`).
pub fn find_syntax(language: Option<&str>) -> Option<&'static SyntaxReference> {
    let language = language.map(str::trim).filter(|lang| !lang.is_empty())?;
    let syntax_set = syntax_set();
    syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language))
}

/// Human readable syntax name for a language tag, if it is supported.
pub fn language_name(language: Option<&str>) -> Option<&'static str> {
    find_syntax(language).map(|syntax| syntax.name.as_str())
}

/// Highlight `code` as HTML spans.
///
/// Unknown or missing languages fall back to escaped plain text.
pub fn highlight_html(language: Option<&str>, code: &str) -> String {
    let Some(syntax) = find_syntax(language) else {
        return escape_html(code);
    };

    let syntax_set = syntax_set();
    let mut highlighter = HighlightLines::new(syntax, theme());
    let mut html = String::with_capacity(code.len() * 4);
    for line in LinesWithEndings::from(code) {
        let highlighted = highlighter
            .highlight_line(line, syntax_set)
            .and_then(|ranges| styled_line_to_highlighted_html(&ranges, IncludeBackground::No));
        match highlighted {
            Ok(fragment) => html.push_str(&fragment),
            Err(err) => {
                tracing::debug!(%err, "highlighting failed, emitting plain line");
                html.push_str(&escape_html(line));
            }
        }
    }
    html
}

/// CSS background color of the active theme, for `<pre>` blocks.
pub fn background_css() -> String {
    let color = theme().settings.background.unwrap_or(match theme_mode() {
        ThemeMode::Dark => Color {
            r: 0x2b,
            g: 0x30,
            b: 0x3b,
            a: 0xff,
        },
        ThemeMode::Light => Color::WHITE,
    });
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// CSS foreground color of the active theme.
pub fn foreground_css() -> String {
    let color = theme().settings.foreground.unwrap_or(match theme_mode() {
        ThemeMode::Dark => Color::WHITE,
        ThemeMode::Light => Color::BLACK,
    });
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn theme() -> &'static Theme {
    let theme_set = theme_set();
    let preferred = match theme_mode() {
        ThemeMode::Dark => [
            "base16-ocean.dark",
            "base16-eighties.dark",
            "base16-mocha.dark",
            "Solarized (dark)",
        ]
        .as_slice(),
        ThemeMode::Light => [
            "InspiredGitHub",
            "Solarized (light)",
            "base16-ocean.light",
        ]
        .as_slice(),
    };

    preferred
        .iter()
        .find_map(|name| theme_set.themes.get(*name))
        .or_else(|| theme_set.themes.values().next())
        .unwrap_or_else(|| {
            static FALLBACK: OnceLock<Theme> = OnceLock::new();
            FALLBACK.get_or_init(Theme::default)
        })
}
