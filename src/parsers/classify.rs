use tracing::{debug, warn};

use super::{is_placeholder, normalize_label};
use crate::models::{ClassifiedTables, RawTable, TableCategory};

const CONFIG_MAX_ROWS: usize = 5;
const SCHEDULE_MIN_ROWS: usize = 6;
const DETAIL_MIN_ROWS: usize = 3;

/// Shape rule for a single table, evaluated in fixed priority order.
pub fn classify_table(table: &RawTable) -> TableCategory {
    if table.is_empty() {
        return TableCategory::Unknown;
    }

    let header: Vec<String> = table
        .header()
        .unwrap_or(&[])
        .iter()
        .map(|c| normalize_label(c))
        .collect();
    let header_has = |marker: &str| header.iter().any(|c| c.contains(marker));
    let labels = first_column_labels(table);
    let columns = table.column_count();
    let rows = table.row_count();

    if columns == 2
        && rows <= CONFIG_MAX_ROWS
        && labels
            .iter()
            .any(|l| l.contains("account name") || l.contains("date created"))
    {
        return TableCategory::Config;
    }

    if header_has("title") && header_has("type") && rows >= SCHEDULE_MIN_ROWS {
        return TableCategory::Schedule;
    }

    if header_has("title")
        && (header_has("interaction") || header_has("interactive"))
        && !header_has("type")
    {
        return TableCategory::Stories;
    }

    if header_has("account") && header_has("goal") && header_has("mon") {
        return TableCategory::Interactions;
    }

    if columns == 2
        && rows >= DETAIL_MIN_ROWS
        && labels.iter().any(|l| l.contains("title"))
        && labels
            .iter()
            .any(|l| l.contains("caption") || l.contains("description"))
        && !detail_title_is_placeholder(table)
    {
        return TableCategory::DetailBlock;
    }

    TableCategory::Unknown
}

/// Sort tables into roles. Singleton roles keep the first match; a later
/// table of the same shape is dropped rather than merged.
pub fn classify_tables(tables: &[RawTable]) -> ClassifiedTables {
    let mut result = ClassifiedTables::default();

    for (index, table) in tables.iter().enumerate() {
        let category = classify_table(table);
        debug!("Table {} classified as {}", index, category.key());

        let slot = match category {
            TableCategory::Config => &mut result.config,
            TableCategory::Schedule => &mut result.schedule,
            TableCategory::Stories => &mut result.stories,
            TableCategory::Interactions => &mut result.interactions,
            TableCategory::DetailBlock => {
                result.detail_blocks.push(table.clone());
                continue;
            }
            TableCategory::Unknown => continue,
        };

        if slot.is_some() {
            warn!(
                "Ignoring table {}: a {} table was already found earlier",
                index,
                category.key()
            );
        } else {
            *slot = Some(table.clone());
        }
    }

    result
}

fn first_column_labels(table: &RawTable) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|row| row.first().map(|c| normalize_label(c)).unwrap_or_default())
        .collect()
}

fn detail_title_is_placeholder(table: &RawTable) -> bool {
    table
        .rows
        .iter()
        .find(|row| {
            row.first()
                .map(|c| normalize_label(c).contains("title"))
                .unwrap_or(false)
        })
        .and_then(|row| row.get(1))
        .map(|value| is_placeholder(value))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schedule() -> RawTable {
        RawTable::from_rows(&[
            &["Title", "Date", "Time", "Type", "Status", "Hashtags", "Notes"],
            &["Launch", "12/5", "9am", "[Reel]", "[Draft]", "", ""],
            &["[Title]", "", "", "", "", "", ""],
            &["[Title]", "", "", "", "", "", ""],
            &["[Title]", "", "", "", "", "", ""],
            &["[Title]", "", "", "", "", "", ""],
        ])
    }

    fn config() -> RawTable {
        RawTable::from_rows(&[
            &["Account Name", "@studio"],
            &["Date Created", "11/01/2025"],
            &["Month", "December 2025"],
        ])
    }

    fn detail(title: &str) -> RawTable {
        RawTable::from_rows(&[
            &["Title", title],
            &["Caption", "Big day!"],
            &["Video URL", "https://youtu.be/abc123"],
        ])
    }

    #[test]
    fn recognises_each_shape() {
        assert_eq!(classify_table(&config()), TableCategory::Config);
        assert_eq!(classify_table(&schedule()), TableCategory::Schedule);
        assert_eq!(classify_table(&detail("Launch")), TableCategory::DetailBlock);

        let stories = RawTable::from_rows(&[
            &["Story Title", "Date", "Time", "Interactive Elements", "Notes"],
            &["Poll", "12/6", "", "Poll sticker", ""],
        ]);
        assert_eq!(classify_table(&stories), TableCategory::Stories);

        let interactions = RawTable::from_rows(&[&[
            "Account", "Platform", "Interaction Type", "Daily Goal", "Mon", "Tue", "Wed", "Thu",
            "Fri", "Sat", "Sun",
        ]]);
        assert_eq!(classify_table(&interactions), TableCategory::Interactions);
    }

    #[test]
    fn short_schedule_is_not_a_schedule() {
        let table = RawTable::from_rows(&[&["Title", "Type"], &["Launch", "post"]]);
        assert_eq!(classify_table(&table), TableCategory::Unknown);
    }

    #[test]
    fn placeholder_detail_block_is_dropped() {
        assert_eq!(classify_table(&detail("[Post title]")), TableCategory::Unknown);
    }

    #[test]
    fn empty_table_is_unknown() {
        assert_eq!(classify_table(&RawTable::default()), TableCategory::Unknown);
    }

    #[test]
    fn first_singleton_wins_and_blocks_keep_order() {
        let mut second_schedule = schedule();
        second_schedule.rows[1][0] = "Other".to_string();

        let tables = vec![
            detail("One"),
            schedule(),
            config(),
            second_schedule,
            detail("Two"),
            RawTable::from_rows(&[&["Random", "Stuff"]]),
        ];
        let classified = classify_tables(&tables);

        assert_eq!(classified.schedule, Some(schedule()));
        assert_eq!(classified.config, Some(config()));
        assert_eq!(classified.detail_blocks, vec![detail("One"), detail("Two")]);
        assert_eq!(classified.stories, None);
        assert_eq!(classified.interactions, None);
    }

    fn stories(first: &str) -> RawTable {
        RawTable::from_rows(&[
            &["Title", "Date", "Time", "Interactive Elements", "Notes"],
            &[first, "12/6", "", "Poll sticker", ""],
        ])
    }

    fn interactions(first: &str) -> RawTable {
        RawTable::from_rows(&[
            &[
                "Account", "Platform", "Interaction Type", "Daily Goal", "Mon", "Tue", "Wed",
                "Thu", "Fri", "Sat", "Sun",
            ],
            &[first, "Instagram", "Comment", "5", "x", "", "", "", "", "", ""],
        ])
    }

    #[test]
    fn config_needs_at_most_five_rows() {
        let table = RawTable::from_rows(&[
            &["Account Name", "@studio"],
            &["Date Created", "11/01/2025"],
            &["Month", "December 2025"],
            &["Owner", "Sam"],
            &["Region", "EU"],
            &["Notes", ""],
        ]);
        assert_eq!(classify_table(&table), TableCategory::Unknown);

        let mut five = table.clone();
        five.rows.pop();
        assert_eq!(classify_table(&five), TableCategory::Config);
    }

    #[test]
    fn config_outranks_detail_block() {
        let table = RawTable::from_rows(&[
            &["Account Name", "@studio"],
            &["Title", "Launch"],
            &["Caption", "Big day!"],
        ]);
        assert_eq!(classify_table(&table), TableCategory::Config);
    }

    #[test]
    fn type_header_never_reads_as_stories() {
        let header: &[&str] = &["Title", "Interactive Elements", "Type", "Notes"];
        let row: &[&str] = &["Poll", "Poll sticker", "post", ""];

        let long = RawTable::from_rows(&[header, row, row, row, row, row]);
        assert_eq!(classify_table(&long), TableCategory::Schedule);

        let short = RawTable::from_rows(&[header, row]);
        assert_eq!(classify_table(&short), TableCategory::Unknown);
    }

    #[test]
    fn detail_block_needs_three_rows() {
        let table = RawTable::from_rows(&[&["Title", "Launch"], &["Caption", "Big day!"]]);
        assert_eq!(classify_table(&table), TableCategory::Unknown);
    }

    #[test]
    fn later_stories_and_interactions_are_ignored() {
        let tables = vec![
            stories("Poll"),
            interactions("@brand"),
            stories("Quiz"),
            interactions("@partner"),
        ];
        let classified = classify_tables(&tables);

        assert_eq!(classified.stories, Some(stories("Poll")));
        assert_eq!(classified.interactions, Some(interactions("@brand")));
    }
}
