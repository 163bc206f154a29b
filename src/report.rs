use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::media::{resolve_media, Media};
use crate::models::{AccountConfig, Interaction, Post, PostType, RawTable, Story};
use crate::parsers::{
    bucket_by_week, classify_tables, date_records, merge_detail_blocks, month_grid,
    parse_config, parse_detail_block, parse_interactions, parse_schedule, parse_stories,
    try_parse_month_year, Dated, MonthGrid, MonthYear, WeekBucket,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Month text that takes precedence over the document's own Month field.
    pub month: Option<String>,
    pub reference_year: Option<i32>,
}

/// Everything extracted from one document, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSchedule {
    pub config: AccountConfig,
    pub posts: Vec<Post>,
    pub stories: Vec<Story>,
    pub interactions: Vec<Interaction>,
    pub month: MonthYear,
    pub reference_year: i32,
}

impl ContentSchedule {
    /// classify → parse → merge, in document order.
    pub fn from_tables(tables: &[RawTable], options: &ReportOptions) -> Self {
        let classified = classify_tables(tables);

        let config = classified
            .config
            .as_ref()
            .map(parse_config)
            .unwrap_or_default();
        info!("Config: account '{}', month '{}'", config.account_name, config.month);

        let scheduled = classified
            .schedule
            .as_ref()
            .map(parse_schedule)
            .unwrap_or_default();
        info!("Posts from schedule: {}", scheduled.len());

        let blocks: Vec<_> = classified
            .detail_blocks
            .iter()
            .filter_map(parse_detail_block)
            .collect();
        let posts = merge_detail_blocks(scheduled, &blocks);
        info!("Total posts after merging {} detail blocks: {}", blocks.len(), posts.len());

        let stories = classified
            .stories
            .as_ref()
            .map(parse_stories)
            .unwrap_or_default();
        info!("Stories: {}", stories.len());

        let interactions = classified
            .interactions
            .as_ref()
            .map(parse_interactions)
            .unwrap_or_default();
        info!("Interactions: {}", interactions.len());

        let month = anchor_month(options.month.as_deref(), &config.month);
        let reference_year = options.reference_year.unwrap_or(month.year);

        Self {
            config,
            posts,
            stories,
            interactions,
            month,
            reference_year,
        }
    }

    pub fn posts_of_type(&self, post_type: &PostType) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| &post.post_type == post_type)
            .collect()
    }

    pub fn dated_posts(&self) -> Vec<Dated<'_, Post>> {
        date_records(&self.posts, |post| post.post_date.as_str(), Some(self.reference_year))
    }

    pub fn dated_stories(&self) -> Vec<Dated<'_, Story>> {
        date_records(&self.stories, |story| story.post_date.as_str(), Some(self.reference_year))
    }

    pub fn calendar(&self) -> MonthGrid<'_, Post> {
        month_grid(self.month, &self.dated_posts())
    }

    pub fn weeks(&self) -> Vec<WeekBucket<'_, Post>> {
        bucket_by_week(&self.dated_posts())
    }

    pub fn story_calendar(&self) -> MonthGrid<'_, Story> {
        month_grid(self.month, &self.dated_stories())
    }

    pub fn story_weeks(&self) -> Vec<WeekBucket<'_, Story>> {
        bucket_by_week(&self.dated_stories())
    }

    pub fn summary(&self) -> Summary {
        let dated = self.dated_posts().len();
        Summary {
            total_posts: self.posts.len(),
            posts: self.posts_of_type(&PostType::Post).len(),
            reels: self.posts_of_type(&PostType::Reel).len(),
            highlights: self.posts_of_type(&PostType::Highlight).len(),
            stories: self.stories.len(),
            interactions: self.interactions.len(),
            undated_posts: self.posts.len() - dated,
        }
    }

    /// Build the structure handed to the renderer. Temporal views are
    /// computed here and not kept on `self`.
    pub fn payload(&self) -> ReportPayload<'_> {
        ReportPayload {
            config: &self.config,
            month: self.month,
            summary: self.summary(),
            posts: self
                .posts
                .iter()
                .map(|post| WithMedia {
                    record: post,
                    media: media_of(post.media_url.as_deref()),
                })
                .collect(),
            stories: self
                .stories
                .iter()
                .map(|story| WithMedia {
                    record: story,
                    media: media_of(story.media_url.as_deref()),
                })
                .collect(),
            by_type: TypeGroups {
                posts: self.posts_of_type(&PostType::Post),
                reels: self.posts_of_type(&PostType::Reel),
                highlights: self.posts_of_type(&PostType::Highlight),
            },
            interactions: &self.interactions,
            calendar: self.calendar(),
            weeks: self.weeks(),
            story_calendar: self.story_calendar(),
            story_weeks: self.story_weeks(),
        }
    }
}

fn media_of(field: Option<&str>) -> Media {
    field.map(resolve_media).unwrap_or(Media::None)
}

fn anchor_month(override_text: Option<&str>, document_month: &str) -> MonthYear {
    if let Some(text) = override_text {
        match try_parse_month_year(text) {
            Some(month) => return month,
            None => warn!("Ignoring unreadable month override '{}'", text),
        }
    }

    match try_parse_month_year(document_month) {
        Some(month) => month,
        None => {
            if !document_month.is_empty() {
                warn!("Could not read month '{}', using the current month", document_month);
            }
            MonthYear::current()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_posts: usize,
    pub posts: usize,
    pub reels: usize,
    pub highlights: usize,
    pub stories: usize,
    pub interactions: usize,
    pub undated_posts: usize,
}

#[derive(Debug, Serialize)]
pub struct WithMedia<'a, T> {
    #[serde(flatten)]
    pub record: &'a T,
    pub media: Media,
}

/// Posts split into the renderer's tabs. Unknown types only appear in the
/// flat listing.
#[derive(Debug, Serialize)]
pub struct TypeGroups<'a> {
    pub posts: Vec<&'a Post>,
    pub reels: Vec<&'a Post>,
    pub highlights: Vec<&'a Post>,
}

#[derive(Debug, Serialize)]
pub struct ReportPayload<'a> {
    pub config: &'a AccountConfig,
    pub month: MonthYear,
    pub summary: Summary,
    pub posts: Vec<WithMedia<'a, Post>>,
    pub stories: Vec<WithMedia<'a, Story>>,
    pub by_type: TypeGroups<'a>,
    pub interactions: &'a [Interaction],
    pub calendar: MonthGrid<'a, Post>,
    pub weeks: Vec<WeekBucket<'a, Post>>,
    pub story_calendar: MonthGrid<'a, Story>,
    pub story_weeks: Vec<WeekBucket<'a, Story>>,
}

/// `schedule.json` → `schedule_report.json`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schedule".to_string());
    input.with_file_name(format!("{}_report.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tables() -> Vec<RawTable> {
        vec![
            RawTable::from_rows(&[
                &["Account Name", "@studio"],
                &["Date Created", "11/01/2025"],
                &["Month", "December 2025"],
            ]),
            RawTable::from_rows(&[
                &["Title", "Date", "Time", "Type", "Status", "Hashtags", "Notes"],
                &["Launch", "12/5", "9am", "[Reel]", "[Draft]", "#launch", ""],
                &["Recap", "Dec 9", "", "[Post]", "[Approved]", "", ""],
                &["Someday", "TBD", "", "", "", "", ""],
                &["[Post title]", "", "", "", "", "", ""],
                &["[Post title]", "", "", "", "", "", ""],
            ]),
        ]
    }

    #[test]
    fn month_comes_from_document() {
        let schedule = ContentSchedule::from_tables(&tables(), &ReportOptions::default());
        assert_eq!(schedule.month, MonthYear::new(2025, 12).unwrap());
        assert_eq!(schedule.reference_year, 2025);
    }

    #[test]
    fn month_override_wins() {
        let options = ReportOptions {
            month: Some("1/2026".to_string()),
            reference_year: None,
        };
        let schedule = ContentSchedule::from_tables(&tables(), &options);
        assert_eq!(schedule.month, MonthYear::new(2026, 1).unwrap());
    }

    #[test]
    fn unreadable_override_falls_back_to_document() {
        let options = ReportOptions {
            month: Some("soon".to_string()),
            reference_year: Some(2024),
        };
        let schedule = ContentSchedule::from_tables(&tables(), &options);
        assert_eq!(schedule.month, MonthYear::new(2025, 12).unwrap());
        assert_eq!(schedule.reference_year, 2024);
    }

    #[test]
    fn summary_counts_types_and_undated() {
        let schedule = ContentSchedule::from_tables(&tables(), &ReportOptions::default());
        assert_eq!(
            schedule.summary(),
            Summary {
                total_posts: 3,
                posts: 2,
                reels: 1,
                highlights: 0,
                stories: 0,
                interactions: 0,
                undated_posts: 1,
            }
        );
    }

    #[test]
    fn undated_posts_stay_in_flat_listing_only() {
        let schedule = ContentSchedule::from_tables(&tables(), &ReportOptions::default());
        let weeks = schedule.weeks();

        let bucketed: Vec<(u32, Vec<&str>)> = weeks
            .iter()
            .map(|w| (w.key.week, w.entries.iter().map(|e| e.item.title.as_str()).collect()))
            .collect();
        assert_eq!(bucketed, vec![(1, vec!["Launch"]), (2, vec!["Recap"])]);

        let payload = serde_json::to_value(schedule.payload()).unwrap();
        assert_eq!(payload["posts"].as_array().unwrap().len(), 3);
        assert_eq!(payload["posts"][2]["title"], "Someday");
        assert_eq!(payload["by_type"]["reels"][0]["title"], "Launch");
        assert_eq!(payload["by_type"]["posts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn stories_get_their_own_calendar_and_weeks() {
        let mut tables = tables();
        tables.push(RawTable::from_rows(&[
            &["Title", "Date", "Time", "Interactive Elements", "Notes"],
            &["Poll", "12/6", "5pm", "Poll sticker", ""],
            &["Quiz", "Dec 16", "", "Quiz sticker", ""],
            &["Later", "TBD", "", "", ""],
        ]));
        let schedule = ContentSchedule::from_tables(&tables, &ReportOptions::default());

        let story_weeks = schedule.story_weeks();
        let weeks: Vec<(u32, Vec<&str>)> = story_weeks
            .iter()
            .map(|w| (w.key.week, w.entries.iter().map(|e| e.item.title.as_str()).collect()))
            .collect();
        assert_eq!(weeks, vec![(1, vec!["Poll"]), (3, vec!["Quiz"])]);

        let calendar = schedule.story_calendar();
        let placed: Vec<&str> = calendar
            .weeks
            .iter()
            .flatten()
            .flatten()
            .flat_map(|day| day.entries.iter().map(|story| story.title.as_str()))
            .collect();
        assert_eq!(placed, vec!["Poll", "Quiz"]);

        let payload = serde_json::to_value(schedule.payload()).unwrap();
        assert_eq!(payload["story_weeks"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn empty_document_still_renders() {
        let schedule = ContentSchedule::from_tables(&[], &ReportOptions::default());
        assert!(schedule.posts.is_empty());
        assert_eq!(schedule.month, MonthYear::current());
        assert!(!schedule.calendar().weeks.is_empty());
    }

    #[test]
    fn output_path_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/tmp/plans/december.json")),
            PathBuf::from("/tmp/plans/december_report.json")
        );
    }
}
