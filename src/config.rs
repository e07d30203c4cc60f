use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::highlight::ThemeMode;
use crate::share::{DEFAULT_SHARE_MESSAGE, DEFAULT_SHORTENER_ENDPOINT};

/// Origin used for share links when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub origin: Option<String>,
    pub theme: Option<ThemeMode>,
    pub out_dir: Option<PathBuf>,
    pub shortener: Option<String>,
    pub share_message: Option<String>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            origin: other.origin.clone().or_else(|| self.origin.clone()),
            theme: other.theme.or(self.theme),
            out_dir: other.out_dir.clone().or_else(|| self.out_dir.clone()),
            shortener: other.shortener.clone().or_else(|| self.shortener.clone()),
            share_message: other
                .share_message
                .clone()
                .or_else(|| self.share_message.clone()),
        }
    }

    pub fn origin_or_default(&self) -> &str {
        self.origin.as_deref().unwrap_or(DEFAULT_ORIGIN)
    }

    pub fn theme_or_default(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }

    pub fn out_dir_or_default(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn shortener_or_default(&self) -> &str {
        self.shortener
            .as_deref()
            .unwrap_or(DEFAULT_SHORTENER_ENDPOINT)
    }

    pub fn share_message_or_default(&self) -> &str {
        self.share_message
            .as_deref()
            .unwrap_or(DEFAULT_SHARE_MESSAGE)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mdshare").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mdshare")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mdshare").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("mdshare").join("config");
        }
    }

    PathBuf::from(".mdsharerc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mdsharerc")
}

/// Load flags from a config file, one flag (and its value) per line.
///
/// Values may contain spaces (`--share-message Read this!`).
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((flag, value)) if !flag.contains('=') => {
                vec![flag.to_string(), value.trim().to_string()]
            }
            _ => vec![line.to_string()],
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# mdshare defaults (saved with --save)".to_string());
    if let Some(origin) = &flags.origin {
        lines.push(format!("--origin {origin}"));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if let Some(dir) = &flags.out_dir {
        lines.push(format!("--out-dir {}", dir.display()));
    }
    if let Some(endpoint) = &flags.shortener {
        lines.push(format!("--shortener {endpoint}"));
    }
    if let Some(message) = &flags.share_message {
        lines.push(format!("--share-message {message}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token, None),
        };
        let is_known = matches!(
            name,
            "--origin" | "--theme" | "--out-dir" | "--shortener" | "--share-message"
        );
        if is_known {
            let value = match inline_value {
                Some(value) => Some(value),
                None => {
                    let next = tokens.get(i + 1).cloned();
                    if next.is_some() {
                        i += 1;
                    }
                    next
                }
            };
            if let Some(value) = value {
                apply_flag(&mut flags, name, value);
            }
        }
        i += 1;
    }
    flags
}

fn apply_flag(flags: &mut ConfigFlags, name: &str, value: String) {
    match name {
        "--origin" => flags.origin = Some(value),
        "--theme" => flags.theme = parse_theme(&value),
        "--out-dir" => flags.out_dir = Some(PathBuf::from(value)),
        "--shortener" => flags.shortener = Some(value),
        "--share-message" => flags.share_message = Some(value),
        _ => {}
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}
