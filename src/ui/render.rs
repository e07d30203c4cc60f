use crate::app::Model;
use crate::export::ExportFormat;
use crate::render::BlockKind;
use crate::share::SocialPlatform;

use super::PANEL_WIDTH;
use super::overlays::help_lines;
use super::status::{header_line, toast_line};

/// Blocks listed in the preview outline before it is cut off.
const PREVIEW_OUTLINE_LIMIT: usize = 12;

/// Render the whole screen for `model`.
pub fn view(model: &Model) -> String {
    let mut lines = vec![header_line(model), String::new()];

    if model.invalid_link {
        lines.push("[!] Invalid password. This document cannot be displayed.".to_string());
        lines.push(String::new());
    } else if model.document.is_empty() {
        lines.push("Upload a markdown file:  load <file.md>".to_string());
        lines.push("Open a shared link:      open <link>".to_string());
        lines.push(String::new());
    }

    if model.has_share_panel() {
        share_panel(model, &mut lines);
    }
    if model.download_menu_open && !model.document.is_empty() {
        download_panel(&mut lines);
    }
    if model.has_preview() {
        preview_panel(model, &mut lines);
    }
    if let Some(toast) = toast_line(model) {
        lines.push(toast);
    }
    if model.help_visible {
        lines.extend(help_lines());
    }

    let mut screen = lines.join("\n");
    screen.push('\n');
    screen
}

fn panel_title(title: &str, lines: &mut Vec<String>) {
    lines.push(title.to_string());
    lines.push("-".repeat(PANEL_WIDTH));
}

fn share_panel(model: &Model, lines: &mut Vec<String>) {
    let Some(link) = &model.share_link else {
        return;
    };
    panel_title("Share", lines);
    let lock = if link.is_password_protected() {
        " [password protected]"
    } else {
        ""
    };
    lines.push(format!("Link{lock}: {}", link.as_str()));

    let password_state = match (model.password_protected, model.password.is_empty()) {
        (true, false) => "on",
        (true, true) => "on (no password set)",
        (false, _) => "off",
    };
    lines.push(format!("Password protection: {password_state}"));

    if let Some(short) = &model.short_link {
        lines.push(format!("Short link: {short}"));
    } else if model.shortening {
        lines.push("Generating short link...".to_string());
    } else {
        if model.short_link_error {
            lines.push("[!] Failed to generate short link.".to_string());
        }
        lines.push("Generate Short Link:  shorten".to_string());
    }

    if model.copied {
        lines.push("Copied!".to_string());
    }

    if model.share_menu_open {
        for platform in SocialPlatform::ALL {
            let command = platform.to_string().to_ascii_lowercase();
            lines.push(format!("  {:<9} social {command}", platform.to_string()));
        }
    }
    lines.push(String::new());
}

fn download_panel(lines: &mut Vec<String>) {
    panel_title("Download", lines);
    for format in ExportFormat::ALL {
        let command = match format {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        };
        lines.push(format!("  {:<9} export {command}", format.to_string()));
    }
    lines.push(String::new());
}

fn preview_panel(model: &Model, lines: &mut Vec<String>) {
    let title = model.document.title().unwrap_or("Preview");
    panel_title(title, lines);

    let blocks = model.rendered.blocks();
    for block in blocks.iter().take(PREVIEW_OUTLINE_LIMIT) {
        let line = match &block.kind {
            BlockKind::Heading(level) => {
                format!("{} {}", "#".repeat(usize::from(*level)), block.text)
            }
            BlockKind::ListItem(depth) => {
                let marker = block.marker.as_deref().unwrap_or("-");
                format!("{}{marker} {}", "  ".repeat(*depth), block.text)
            }
            BlockKind::Quote => format!("> {}", block.text),
            BlockKind::Code => format!("[code] {}", first_line(&block.text)),
            BlockKind::Rule => "---".to_string(),
            BlockKind::Paragraph => block.text.clone(),
        };
        lines.push(line);
    }
    if blocks.len() > PREVIEW_OUTLINE_LIMIT {
        lines.push(format!("... {} more", blocks.len() - PREVIEW_OUTLINE_LIMIT));
    }

    if model.preview_visible {
        lines.push(String::new());
        lines.push(model.rendered.html().trim_end().to_string());
    } else {
        lines.push("(type `preview` to show the HTML)".to_string());
    }
    lines.push(String::new());
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
