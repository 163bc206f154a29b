use url::Url;

use super::Canonical;

const SHARE_HOSTS: [&str; 2] = ["www.dropbox.com", "dropbox.com"];
const DIRECT_HOST: &str = "dl.dropboxusercontent.com";

/// Rewrite a Dropbox share link to its direct-content form.
///
/// File links keep their permanent `rlkey`, lose the expiring `st` session
/// token, and have `dl=` turned into `raw=1`. Folder links opened on a
/// `preview=` file get that file appended to the path and keep only `rlkey`.
pub fn rewrite(url: &Url) -> Option<Canonical> {
    let host = url.host_str()?;
    if !SHARE_HOSTS.contains(&host) {
        return None;
    }

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let preview = pairs
        .iter()
        .find(|(key, value)| key == "preview" && !value.is_empty())
        .map(|(_, value)| value.clone());

    let mut direct = url.clone();
    direct.set_host(Some(DIRECT_HOST)).ok()?;

    let kept: Vec<(String, String)> = match preview {
        Some(file_name) => {
            direct
                .path_segments_mut()
                .ok()?
                .pop_if_empty()
                .push(&file_name);
            pairs.into_iter().filter(|(key, _)| key == "rlkey").collect()
        }
        None => pairs
            .into_iter()
            .filter(|(key, _)| key != "st")
            .map(|(key, value)| {
                if key == "dl" {
                    ("raw".to_string(), "1".to_string())
                } else {
                    (key, value)
                }
            })
            .collect(),
    };

    if kept.is_empty() {
        direct.set_query(None);
    } else {
        direct.query_pairs_mut().clear().extend_pairs(kept);
    }

    Some(Canonical::Url(direct.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewritten(raw: &str) -> String {
        match rewrite(&Url::parse(raw).unwrap()) {
            Some(Canonical::Url(url)) => url,
            other => panic!("unexpected rewrite for {raw}: {other:?}"),
        }
    }

    #[test]
    fn file_link_becomes_direct_raw_link() {
        let url = rewritten("https://www.dropbox.com/scl/fi/abc/file.jpg?rlkey=XYZ&st=TOKEN&dl=0");
        assert_eq!(url, "https://dl.dropboxusercontent.com/scl/fi/abc/file.jpg?rlkey=XYZ&raw=1");

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("dl.dropboxusercontent.com"));
        assert!(!parsed.query_pairs().any(|(k, _)| k == "st"));
        assert!(parsed.query_pairs().any(|(k, v)| k == "raw" && v == "1"));
    }

    #[test]
    fn legacy_share_link() {
        assert_eq!(
            rewritten("https://dropbox.com/s/abc123/photo.png?dl=1"),
            "https://dl.dropboxusercontent.com/s/abc123/photo.png?raw=1"
        );
    }

    #[test]
    fn folder_preview_link_points_at_the_file() {
        assert_eq!(
            rewritten("https://www.dropbox.com/scl/fo/folder1/key2?dl=0&preview=My+Clip.mp4&rlkey=XYZ&st=TOKEN"),
            "https://dl.dropboxusercontent.com/scl/fo/folder1/key2/My%20Clip.mp4?rlkey=XYZ"
        );
    }

    #[test]
    fn other_hosts_are_not_touched() {
        assert_eq!(rewrite(&Url::parse("https://example.com/a.jpg?dl=0").unwrap()), None);
        assert_eq!(
            rewrite(&Url::parse("https://dl.dropboxusercontent.com/s/abc/a.jpg").unwrap()),
            None
        );
    }
}
