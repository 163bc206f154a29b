use url::Url;

use super::Canonical;

const PAGE_HOSTS: [&str; 3] = ["imgur.com", "www.imgur.com", "m.imgur.com"];
const DIRECT_HOST: &str = "i.imgur.com";

// Albums and galleries hold several images behind one page and have no
// single direct file to point at.
const ALBUM_PREFIXES: [&str; 3] = ["a", "gallery", "t"];

pub fn rewrite(url: &Url) -> Option<Canonical> {
    let host = url.host_str()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    if host == DIRECT_HOST {
        return match segments.as_slice() {
            [file] if !has_extension(file) => Some(direct(file)),
            _ => None,
        };
    }

    if !PAGE_HOSTS.contains(&host) {
        return None;
    }

    match segments.as_slice() {
        [prefix, ..] if ALBUM_PREFIXES.contains(prefix) => {
            Some(Canonical::Album(url.to_string()))
        }
        [file] if has_extension(file) => Some(Canonical::Url(format!("https://{}/{}", DIRECT_HOST, file))),
        [id] => Some(direct(id)),
        _ => None,
    }
}

fn direct(id: &str) -> Canonical {
    Canonical::Url(format!("https://{}/{}.jpg", DIRECT_HOST, id))
}

fn has_extension(segment: &str) -> bool {
    matches!(segment.rsplit_once('.'), Some((stem, ext)) if !stem.is_empty() && !ext.is_empty())
}
