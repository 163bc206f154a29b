use tracing::debug;

use super::{cell, is_checked, is_placeholder, normalize_label, strip_brackets, unless_placeholder};
use super::{Field, FieldMap};
use crate::models::{
    AccountConfig, DaySchedule, DetailBlock, Interaction, Post, PostStatus, PostType, RawTable,
    Story,
};

const INTERACTION_MIN_COLUMNS: usize = 11;
const FIRST_DAY_COLUMN: usize = 4;

/// Read the label/value config table. Placeholder values become empty.
pub fn parse_config(table: &RawTable) -> AccountConfig {
    let mut config = AccountConfig::default();

    for row in &table.rows {
        let key = normalize_label(cell(row, 0)).replace(' ', "");
        let value = unless_placeholder(cell(row, 1));

        if key.contains("accountname") {
            config.account_name = value;
        } else if key.contains("datecreated") {
            config.date_created = value;
        } else if key.contains("month") {
            config.month = value;
        }
    }

    config
}

/// Rows with an empty or placeholder title are template filler.
fn row_title(map: &FieldMap, row: &[String]) -> Option<String> {
    let title = map.value(row, Field::Title).unwrap_or("");
    if title.is_empty() || is_placeholder(title) {
        None
    } else {
        Some(title.to_string())
    }
}

fn optional(map: &FieldMap, row: &[String], field: Field) -> Option<String> {
    map.value(row, field)
        .map(unless_placeholder)
        .filter(|v| !v.is_empty())
}

fn media_value(map: &FieldMap, row: &[String]) -> Option<String> {
    map.media_column()
        .and_then(|index| row.get(index))
        .map(|text| unless_placeholder(text))
        .filter(|v| !v.is_empty())
}

pub fn parse_schedule(table: &RawTable) -> Vec<Post> {
    let Some(header) = table.header() else {
        return Vec::new();
    };
    let map = FieldMap::from_header(header);
    let mut posts = Vec::new();

    for row in table.body() {
        let Some(title) = row_title(&map, row) else {
            continue;
        };

        posts.push(Post {
            title,
            post_date: map.text(row, Field::Date),
            time: map.text(row, Field::Time),
            post_type: PostType::from_label(&strip_brackets(&map.text(row, Field::Type))),
            status: PostStatus::from_label(&strip_brackets(&map.text(row, Field::Status))),
            hashtags: unless_placeholder(&map.text(row, Field::Hashtags)),
            notes: unless_placeholder(&map.text(row, Field::Notes)),
            caption: optional(&map, row, Field::Caption),
            media_url: media_value(&map, row),
        });
    }

    debug!("Parsed {} posts from schedule table", posts.len());
    posts
}

pub fn parse_stories(table: &RawTable) -> Vec<Story> {
    let Some(header) = table.header() else {
        return Vec::new();
    };
    let map = FieldMap::from_header(header);
    let mut stories = Vec::new();

    for row in table.body() {
        let Some(title) = row_title(&map, row) else {
            continue;
        };

        stories.push(Story {
            title,
            post_date: map.text(row, Field::Date),
            time: map.text(row, Field::Time),
            interactive_elements: unless_placeholder(&map.text(row, Field::Interaction)),
            notes: unless_placeholder(&map.text(row, Field::Notes)),
            media_url: media_value(&map, row),
        });
    }

    debug!("Parsed {} stories", stories.len());
    stories
}

/// Descriptive columns follow the header when it names them; day columns
/// are always positional.
pub fn parse_interactions(table: &RawTable) -> Vec<Interaction> {
    let Some(header) = table.header() else {
        return Vec::new();
    };
    let map = FieldMap::from_header(header);
    let column = |row: &[String], field: Field, fallback: usize| -> String {
        let index = map.column(field).unwrap_or(fallback);
        strip_brackets(cell(row, index))
    };

    let mut interactions = Vec::new();

    for row in table.body() {
        let row = row.as_slice();
        let first = cell(row, 0);
        if row.len() < INTERACTION_MIN_COLUMNS || first.is_empty() || is_placeholder(first) {
            continue;
        }

        let mut flags = [false; 7];
        for (offset, flag) in flags.iter_mut().enumerate() {
            *flag = is_checked(cell(row, FIRST_DAY_COLUMN + offset));
        }

        interactions.push(Interaction {
            account_name: column(row, Field::Account, 0).replace('@', ""),
            platform: column(row, Field::Platform, 1),
            interaction_type: column(row, Field::Interaction, 2),
            daily_goal: column(row, Field::DailyGoal, 3),
            days: DaySchedule::from_flags(flags),
        });
    }

    debug!("Parsed {} interaction targets", interactions.len());
    interactions
}

/// Reduce a two-column detail table to the fields it contributes.
/// Returns `None` when no usable title remains.
pub fn parse_detail_block(table: &RawTable) -> Option<DetailBlock> {
    let mut block = DetailBlock::default();

    for row in &table.rows {
        if row.len() < 2 {
            continue;
        }
        let label = normalize_label(cell(row, 0));
        if label.contains("title") {
            let title = cell(row, 1);
            if !title.is_empty() && !is_placeholder(title) {
                block.title = title.to_string();
            }
            continue;
        }

        let value = unless_placeholder(cell(row, 1));
        if value.is_empty() {
            continue;
        }

        if label.contains("caption") || label.contains("description") {
            block.caption = value;
        } else if label.contains("hashtag") {
            block.hashtags = value;
        } else if label.contains("video") {
            block.media_url = value;
            block.post_type = Some(PostType::Reel);
        } else if label.contains("cover") {
            block.media_url = value;
            block.post_type = Some(PostType::Highlight);
        } else if label.contains("image") || label.contains("url") {
            block.media_url = value;
        }
    }

    if block.title.is_empty() {
        None
    } else {
        Some(block)
    }
}
