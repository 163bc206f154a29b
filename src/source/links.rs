use once_cell::sync::Lazy;
use regex::Regex;

// Word field code left in cell text when a hyperlink was inserted as a field.
static FIELD_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"HYPERLINK\s+"([^"]+)""#).expect("Invalid hyperlink field regex")
});

/// Append a cell's hyperlink targets to its text, one per line.
///
/// `links` are the targets resolved from the document's relationship map;
/// any `HYPERLINK "..."` field code in the text is added after them. Targets
/// that already stand on a line of their own are not repeated.
pub fn fold_links(text: &str, links: &[String]) -> String {
    let mut folded = text.trim().to_string();

    let field_links: Vec<String> = FIELD_CODE_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .collect();

    for link in links.iter().chain(field_links.iter()) {
        let link = link.trim();
        if link.is_empty() || folded.lines().any(|line| line.trim() == link) {
            continue;
        }
        if !folded.is_empty() {
            folded.push('\n');
        }
        folded.push_str(link);
    }

    folded
}
