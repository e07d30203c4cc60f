use crate::config::{global_config_path, local_override_path};

/// Command reference shown by `help`.
pub fn help_lines() -> Vec<String> {
    let mut all_lines = Vec::new();
    all_lines.push("Help".to_string());
    all_lines.push("-".repeat(super::PANEL_WIDTH));

    // Document
    all_lines.push("Document".to_string());
    all_lines.push("  load <file.md>        Load a markdown file".to_string());
    all_lines.push("  open <link>           Open a shared link".to_string());
    all_lines.push("  preview               Toggle the HTML preview".to_string());
    all_lines.push("  delete                Remove the document".to_string());
    all_lines.push(String::new());

    // Share
    all_lines.push("Share".to_string());
    all_lines.push("  lock [password]       Protect the link with a password".to_string());
    all_lines.push("  unlock                Remove password protection".to_string());
    all_lines.push("  copy / copy-short     Copy the link / short link".to_string());
    all_lines.push("  shorten               Generate a short link".to_string());
    all_lines.push("  share                 Toggle the social share menu".to_string());
    all_lines.push("  social <platform>     Share on twitter, linkedin, facebook, whatsapp".to_string());
    all_lines.push(String::new());

    // Download
    all_lines.push("Download".to_string());
    all_lines.push("  downloads             Toggle the download menu".to_string());
    all_lines.push("  export <md|html|pdf>  Save the document".to_string());
    all_lines.push(String::new());

    // Other
    all_lines.push("Other".to_string());
    all_lines.push("  help / ?              Toggle help".to_string());
    all_lines.push("  quit / q              Quit".to_string());
    all_lines.push(String::new());

    // Config
    all_lines.push("Config".to_string());
    all_lines.push(format!("  Global: {}", global_config_path().display()));
    all_lines.push(format!("  Local override: {}", local_override_path().display()));
    all_lines
}
