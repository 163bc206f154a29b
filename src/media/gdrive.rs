use url::Url;

use super::Canonical;

const DRIVE_HOST: &str = "drive.google.com";

/// `file/d/<id>/view` share pages (and the older `open?id=<id>` form) become
/// the `uc?export=view` link that serves the file itself.
pub fn rewrite(url: &Url) -> Option<Canonical> {
    if url.host_str()? != DRIVE_HOST {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let id = match segments.as_slice() {
        ["file", "d", id, ..] => id.to_string(),
        ["open"] => url
            .query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned())?,
        _ => return None,
    };

    Some(Canonical::Url(format!(
        "https://{}/uc?export=view&id={}",
        DRIVE_HOST, id
    )))
}
