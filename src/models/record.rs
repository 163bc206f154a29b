use serde::{Serialize, Serializer};
use std::fmt;

use super::DAY_LABELS;

/// Account settings from the small two-column table at the top of the template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountConfig {
    pub account_name: String,
    pub date_created: String,
    pub month: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PostType {
    #[default]
    Post,
    Reel,
    Highlight,
    Other(String),
}

impl PostType {
    /// Maps an already bracket-stripped cell value. Empty means the default.
    pub fn from_label(value: &str) -> Self {
        let key = value.trim().to_lowercase();
        match key.as_str() {
            "" | "post" | "posts" => PostType::Post,
            "reel" | "reels" => PostType::Reel,
            "highlight" | "highlights" => PostType::Highlight,
            _ => PostType::Other(key),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            PostType::Post => "post",
            PostType::Reel => "reel",
            PostType::Highlight => "highlight",
            PostType::Other(other) => other,
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for PostType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PostStatus {
    #[default]
    Draft,
    Approved,
    Posted,
    NeedsRevision,
    Other(String),
}

impl PostStatus {
    /// Maps an already bracket-stripped cell value, ignoring case and spacing.
    /// Unrecognised text is kept lower-cased and trimmed.
    pub fn from_label(value: &str) -> Self {
        let label = value.trim().to_lowercase();
        let key: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();

        match key.as_str() {
            "" | "draft" => PostStatus::Draft,
            "approved" => PostStatus::Approved,
            "posted" => PostStatus::Posted,
            "needsrevision" => PostStatus::NeedsRevision,
            _ => PostStatus::Other(label),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "Draft"),
            PostStatus::Approved => write!(f, "Approved"),
            PostStatus::Posted => write!(f, "Posted"),
            PostStatus::NeedsRevision => write!(f, "NeedsRevision"),
            PostStatus::Other(other) => write!(f, "{}", other),
        }
    }
}

impl Serialize for PostStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    pub post_date: String,
    pub time: String,
    pub post_type: PostType,
    pub status: PostStatus,
    pub hashtags: String,
    pub notes: String,
    pub caption: Option<String>,
    pub media_url: Option<String>,
}

impl Post {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Story {
    pub title: String,
    pub post_date: String,
    pub time: String,
    pub interactive_elements: String,
    pub notes: String,
    pub media_url: Option<String>,
}

/// Which days of the week an interaction target is worked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub mon: bool,
    pub tue: bool,
    pub wed: bool,
    pub thu: bool,
    pub fri: bool,
    pub sat: bool,
    pub sun: bool,
}

impl DaySchedule {
    pub fn from_flags(flags: [bool; 7]) -> Self {
        let [mon, tue, wed, thu, fri, sat, sun] = flags;
        Self { mon, tue, wed, thu, fri, sat, sun }
    }

    pub fn flags(&self) -> [bool; 7] {
        [self.mon, self.tue, self.wed, self.thu, self.fri, self.sat, self.sun]
    }

    pub fn active_days(&self) -> Vec<&'static str> {
        DAY_LABELS
            .iter()
            .zip(self.flags())
            .filter(|(_, on)| *on)
            .map(|(label, _)| *label)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub account_name: String,
    pub platform: String,
    pub interaction_type: String,
    pub daily_goal: String,
    pub days: DaySchedule,
}

/// The long-form fields one detail block contributes to a post.
/// Empty strings mean "not supplied" and never overwrite schedule values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailBlock {
    pub title: String,
    pub caption: String,
    pub hashtags: String,
    pub media_url: String,
    pub post_type: Option<PostType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_type_labels() {
        assert_eq!(PostType::from_label("Reel"), PostType::Reel);
        assert_eq!(PostType::from_label(" highlight "), PostType::Highlight);
        assert_eq!(PostType::from_label(""), PostType::Post);
        assert_eq!(
            PostType::from_label("Carousel"),
            PostType::Other("carousel".to_string())
        );
    }

    #[test]
    fn status_labels_ignore_case_and_spacing() {
        assert_eq!(PostStatus::from_label("Needs Revision"), PostStatus::NeedsRevision);
        assert_eq!(PostStatus::from_label("APPROVED"), PostStatus::Approved);
        assert_eq!(PostStatus::from_label(""), PostStatus::Draft);
        assert_eq!(PostStatus::from_label("needs-revision"), PostStatus::NeedsRevision);
        assert_eq!(PostStatus::NeedsRevision.to_string(), "NeedsRevision");
    }

    #[test]
    fn unknown_status_is_lowercased() {
        assert_eq!(
            PostStatus::from_label("  In Review "),
            PostStatus::Other("in review".to_string())
        );
        assert_eq!(PostStatus::from_label("Scheduled").to_string(), "scheduled");
    }

    #[test]
    fn serializes_as_display_strings() {
        let mut post = Post::titled("Launch");
        post.post_type = PostType::Reel;
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["post_type"], "reel");
        assert_eq!(json["status"], "Draft");
    }

    #[test]
    fn active_days_follow_template_order() {
        let days = DaySchedule::from_flags([true, false, true, false, false, false, true]);
        assert_eq!(days.active_days(), vec!["Mon", "Wed", "Sun"]);
    }
}
