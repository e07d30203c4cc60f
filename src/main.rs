//! mdshare - share markdown documents through self-contained links.
//!
//! # Usage
//!
//! ```bash
//! mdshare render README.md
//! mdshare share README.md --password abc123 --short
//! mdshare open "http://localhost:5173/?content=..." --export pdf
//! mdshare session README.md
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mdshare::app::{App, Message};
use mdshare::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use mdshare::document::Document;
use mdshare::export::{self, ExportFormat};
use mdshare::highlight::{ThemeMode, set_theme_mode};
use mdshare::link::{self, FixedPassword, PasswordPrompt, ShareLink, StdinPrompt};
use mdshare::render;
use mdshare::share::{Clipboard, Shortener, SocialPlatform, SystemClipboard, TinyUrl};

/// Share markdown documents through links that carry the document itself
#[derive(Parser, Debug)]
#[command(name = "mdshare", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of generated links
    #[arg(long, global = true, value_name = "URL")]
    origin: Option<String>,

    /// Syntax highlight theme
    #[arg(long, global = true, value_enum)]
    theme: Option<ThemeMode>,

    /// Directory exports are written to
    #[arg(long, global = true, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Link shortener endpoint (`GET <endpoint>?url=<link>`)
    #[arg(long, global = true, value_name = "URL")]
    shortener: Option<String>,

    /// Message placed in front of links on social networks
    #[arg(long, global = true, value_name = "TEXT")]
    share_message: Option<String>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a document as HTML
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print a share link for a document
    Share {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Require this password when the link is opened
        #[arg(long)]
        password: Option<String>,
        /// Also print a short link
        #[arg(long)]
        short: bool,
        /// Copy the (short) link to the clipboard
        #[arg(long)]
        copy: bool,
        /// Print social network share links
        #[arg(long)]
        social: bool,
    },
    /// Decode a share link and print or export the document
    Open {
        #[arg(value_name = "LINK")]
        link: String,
        /// Password for protected links (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Export instead of printing HTML
        #[arg(long, value_enum, value_name = "FORMAT")]
        export: Option<ExportFormat>,
    },
    /// Export a document
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_enum)]
        format: ExportFormat,
    },
    /// Interactive session
    Session {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        origin: cli.origin.clone(),
        theme: cli.theme,
        out_dir: cli.out_dir.clone(),
        shortener: cli.shortener.clone(),
        share_message: cli.share_message.clone(),
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    set_theme_mode(effective.theme_or_default());

    match cli.command.unwrap_or(Command::Session { file: None }) {
        Command::Render { file } => {
            let document = Document::load(&file)?;
            print!("{}", render::render(&document)?.html());
            Ok(())
        }
        Command::Share {
            file,
            password,
            short,
            copy,
            social,
        } => share(&effective, &file, password.as_deref(), short, copy, social),
        Command::Open {
            link,
            password,
            export,
        } => open(&effective, &link, password, export),
        Command::Export { file, format } => {
            let document = Document::load(&file)?;
            let rendered = render::render(&document)?;
            let path = export::export(format, &document, &rendered, &effective.out_dir_or_default())
                .with_context(|| format!("Failed to export {}", file.display()))?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Session { file } => App::new(effective.origin_or_default())
            .with_out_dir(effective.out_dir_or_default())
            .with_share_message(effective.share_message_or_default())
            .with_shortener(Arc::new(TinyUrl::new(effective.shortener_or_default())))
            .with_initial_message(file.map(Message::LoadFile))
            .run()
            .context("Application error"),
    }
}

fn share(
    flags: &ConfigFlags,
    file: &std::path::Path,
    password: Option<&str>,
    short: bool,
    copy: bool,
    social: bool,
) -> Result<()> {
    let document = Document::load(file)?;
    if document.is_empty() {
        anyhow::bail!("Nothing to share: {} is empty", file.display());
    }
    let password = password.filter(|p| !p.is_empty());
    let link = ShareLink::build(flags.origin_or_default(), document.source(), password)?;
    println!("{link}");

    let mut target = link.as_str().to_string();
    if short {
        match TinyUrl::new(flags.shortener_or_default()).shorten(link.as_str()) {
            Ok(short_link) => {
                println!("{short_link}");
                target = short_link;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to shorten link");
                eprintln!("Failed to generate short link: {err}");
            }
        }
    }

    if copy {
        match SystemClipboard.copy(&target) {
            Ok(()) => eprintln!("Copied!"),
            Err(err) => tracing::warn!(%err, "failed to copy link"),
        }
    }

    if social {
        for platform in SocialPlatform::ALL {
            println!(
                "{platform}: {}",
                platform.share_url(flags.share_message_or_default(), &target)
            );
        }
    }
    Ok(())
}

fn open(
    flags: &ConfigFlags,
    input: &str,
    password: Option<String>,
    export_format: Option<ExportFormat>,
) -> Result<()> {
    let mut prompt: Box<dyn PasswordPrompt> = match password {
        Some(password) => Box::new(FixedPassword::new(password)),
        None => Box::new(StdinPrompt),
    };
    let text = match link::decode_link(input, prompt.as_mut()) {
        Ok(text) => text,
        Err(err) if err.is_access_denied() => {
            tracing::warn!(%err, "rejected protected link");
            anyhow::bail!("Invalid password. This document cannot be displayed.");
        }
        Err(err) => {
            tracing::error!(%err, "failed to decode content");
            return Err(err).context("Failed to decode content");
        }
    };

    let document = Document::from_text(text);
    let rendered = render::render(&document)?;
    match export_format {
        Some(format) => {
            let path = export::export(format, &document, &rendered, &flags.out_dir_or_default())?;
            println!("{}", path.display());
        }
        None => print!("{}", rendered.html()),
    }
    Ok(())
}
