use percent_encoding::percent_decode_str;
use url::Url;

pub const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mov", "webm", "m4v", "avi", "mkv"];

const YOUTUBE_HOSTS: [&str; 4] = ["youtube.com", "www.youtube.com", "m.youtube.com", "music.youtube.com"];
const VIMEO_HOSTS: [&str; 3] = ["vimeo.com", "www.vimeo.com", "player.vimeo.com"];
const TIKTOK_HOSTS: [&str; 3] = ["tiktok.com", "www.tiktok.com", "m.tiktok.com"];

/// Embeddable player URL when `url` points at a known video platform.
pub fn embed_url(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if YOUTUBE_HOSTS.contains(&host) {
        // Watch pages carry the id in `v`; shorts, live and embed in the path.
        let id = match segments.as_slice() {
            ["watch", ..] => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            ["shorts", id, ..] | ["live", id, ..] | ["embed", id, ..] => Some(id.to_string()),
            _ => None,
        }?;
        return youtube_embed(&id);
    }

    if host == "youtu.be" {
        return youtube_embed(segments.first()?);
    }

    if VIMEO_HOSTS.contains(&host) {
        let id = segments
            .iter()
            .rev()
            .find(|s| s.chars().all(|c| c.is_ascii_digit()))?;
        return Some(format!("https://player.vimeo.com/video/{}", id));
    }

    if TIKTOK_HOSTS.contains(&host) {
        let position = segments.iter().position(|s| *s == "video")?;
        let id = segments.get(position + 1)?;
        return Some(format!("https://www.tiktok.com/embed/v2/{}", id));
    }

    None
}

fn youtube_embed(id: &str) -> Option<String> {
    if id.is_empty() {
        None
    } else {
        Some(format!("https://www.youtube.com/embed/{}", id))
    }
}

/// True when the path, or a file host's `preview` parameter, names a video file.
pub fn is_video_file(url: &Url) -> bool {
    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    if has_video_extension(&path) {
        return true;
    }

    url.query_pairs()
        .any(|(key, value)| key == "preview" && has_video_extension(&value))
}

fn has_video_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
