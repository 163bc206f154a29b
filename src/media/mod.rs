pub mod dropbox;
pub mod gdrive;
pub mod imgur;
pub mod video;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

static URL_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://[^\s]+").expect("Invalid URL token regex")
});

/// Outcome of canonicalizing one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canonical {
    Url(String),
    /// A multi-image page with no single direct file; not renderable.
    Album(String),
}

type HostRewrite = fn(&Url) -> Option<Canonical>;

/// Host-specific rewrites in priority order. The first that claims the URL
/// wins; unclaimed URLs pass through unchanged.
const HOST_REWRITES: [(&str, HostRewrite); 3] = [
    ("dropbox", dropbox::rewrite),
    ("imgur", imgur::rewrite),
    ("google drive", gdrive::rewrite),
];

pub fn canonicalize_url(raw: &str) -> Canonical {
    let Ok(url) = Url::parse(raw) else {
        return Canonical::Url(raw.to_string());
    };

    for (host, rewrite) in HOST_REWRITES.iter() {
        if let Some(canonical) = rewrite(&url) {
            debug!("Canonicalized {} link {}", host, raw);
            return canonical;
        }
    }

    Canonical::Url(raw.to_string())
}

/// Pull the links out of a free-text media cell.
///
/// Each line contributes its first http(s) token; anything after the next
/// whitespace (such as " - cover shot") is dropped. Album links are skipped
/// and repeated links keep their first position.
pub fn parse_media_urls(field: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for line in field.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(token) = URL_TOKEN_REGEX.find(line) else {
            continue;
        };
        let token = token.as_str().trim_end_matches([',', ';', ')', '>', '"', '\'']);

        match canonicalize_url(token) {
            Canonical::Url(url) => {
                if !urls.contains(&url) {
                    urls.push(url);
                }
            }
            Canonical::Album(url) => {
                warn!("Skipping album link with no direct image: {}", url);
            }
        }
    }

    urls
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaKind {
    PlatformVideo { embed_url: String },
    FileVideo,
    Image,
}

pub fn classify_url(raw: &str) -> MediaKind {
    let Ok(url) = Url::parse(raw) else {
        return MediaKind::Image;
    };

    if let Some(embed_url) = video::embed_url(&url) {
        MediaKind::PlatformVideo { embed_url }
    } else if video::is_video_file(&url) {
        MediaKind::FileVideo
    } else {
        MediaKind::Image
    }
}

/// What a post's media cell renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Media {
    None,
    PlatformVideo { url: String, embed_url: String },
    FileVideo { url: String },
    Images { urls: Vec<String> },
}

impl Media {
    pub fn is_video(&self) -> bool {
        matches!(self, Media::PlatformVideo { .. } | Media::FileVideo { .. })
    }
}

/// The first video link wins; otherwise every link is an image, in order.
pub fn resolve_media(field: &str) -> Media {
    let urls = parse_media_urls(field);

    for url in &urls {
        match classify_url(url) {
            MediaKind::PlatformVideo { embed_url } => {
                return Media::PlatformVideo {
                    url: url.clone(),
                    embed_url,
                }
            }
            MediaKind::FileVideo => return Media::FileVideo { url: url.clone() },
            MediaKind::Image => {}
        }
    }

    if urls.is_empty() {
        Media::None
    } else {
        Media::Images { urls }
    }
}
