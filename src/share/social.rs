//! Deep links into social networks' share dialogs.

use std::fmt;

/// Message shown next to the link where a platform supports it.
pub const DEFAULT_SHARE_MESSAGE: &str = "Check out this markdown document!";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    Twitter,
    #[value(name = "linkedin")]
    LinkedIn,
    Facebook,
    #[value(name = "whatsapp")]
    WhatsApp,
}

impl SocialPlatform {
    pub const ALL: [Self; 4] = [Self::Twitter, Self::LinkedIn, Self::Facebook, Self::WhatsApp];

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "twitter" | "x" => Some(Self::Twitter),
            "linkedin" => Some(Self::LinkedIn),
            "facebook" | "fb" => Some(Self::Facebook),
            "whatsapp" | "wa" => Some(Self::WhatsApp),
            _ => None,
        }
    }

    /// Build the platform's share URL for `link`.
    pub fn share_url(self, message: &str, link: &str) -> String {
        let text = urlencoding::encode(message);
        let url = urlencoding::encode(link);
        match self {
            Self::Twitter => format!("https://twitter.com/intent/tweet?text={text}&url={url}"),
            Self::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={url}")
            }
            Self::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
            Self::WhatsApp => format!("https://wa.me/?text={text}%20{url}"),
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::Facebook => "Facebook",
            Self::WhatsApp => "WhatsApp",
        })
    }
}
