use chrono::{Datelike, Local, Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::clean_text;

static NUMERIC_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?$")
        .expect("Invalid numeric date regex")
});

static NAMED_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z]+,\s*)?([A-Za-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?$")
        .expect("Invalid named date regex")
});

static NAMED_MONTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\.?,?\s+(\d{4})$").expect("Invalid named month regex")
});

static NUMERIC_MONTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[/-](\d{4})$").expect("Invalid numeric month regex")
});

/// Month number for an English month name: full, three-letter, or any
/// longer prefix such as "Sept".
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim().trim_end_matches('.').to_lowercase();
    if let Ok(month) = lower.parse::<Month>() {
        return Some(month.number_from_month());
    }

    let month = lower.get(..3)?.parse::<Month>().ok()?;
    month
        .name()
        .to_lowercase()
        .starts_with(&lower)
        .then(|| month.number_from_month())
}

/// Parse the loosely formatted date text people type into the schedule.
///
/// Accepts `MM/DD/YY`, `MM/DD/YYYY`, `MM/DD`, `Mon DD`, `Month DD` and
/// `Mon DD, YYYY`. Year-less forms take `reference_year`, or the current
/// year when none is given. Anything else is `None`: the record stays in
/// flat listings but is left out of calendar and weekly views.
pub fn parse_date(text: &str, reference_year: Option<i32>) -> Option<NaiveDate> {
    let text = clean_text(text);
    if text.is_empty() {
        return None;
    }
    let default_year = || reference_year.unwrap_or_else(|| Local::now().year());

    if let Some(caps) = NUMERIC_DATE_REGEX.captures(&text) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = match caps.get(3) {
            Some(y) if y.as_str().len() == 2 => 2000 + y.as_str().parse::<i32>().ok()?,
            Some(y) => y.as_str().parse().ok()?,
            None => default_year(),
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = NAMED_DATE_REGEX.captures(&text) {
        let month = month_from_name(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year = match caps.get(3) {
            Some(y) => y.as_str().parse().ok()?,
            None => default_year(),
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// The single month the calendar view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match (self.first_day(), NaiveDate::from_ymd_opt(next_year, next_month, 1)) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => 0,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Parse `Month YYYY`, `Mon YYYY`, `M/YYYY` or `M-YYYY`, falling back to the
/// current month on empty or unreadable input.
pub fn parse_month_year(text: &str) -> MonthYear {
    parse_month_year_or(text, MonthYear::current())
}

pub fn parse_month_year_or(text: &str, fallback: MonthYear) -> MonthYear {
    try_parse_month_year(text).unwrap_or(fallback)
}

pub fn try_parse_month_year(text: &str) -> Option<MonthYear> {
    let text = clean_text(text);

    if let Some(caps) = NAMED_MONTH_REGEX.captures(&text) {
        let month = month_from_name(&caps[1])?;
        return MonthYear::new(caps[2].parse().ok()?, month);
    }

    if let Some(caps) = NUMERIC_MONTH_REGEX.captures(&text) {
        return MonthYear::new(caps[2].parse().ok()?, caps[1].parse().ok()?);
    }

    None
}

/// Fixed-origin week of the month: days 1-7 are week 1, 8-14 week 2, and so
/// on. Unrelated to ISO weeks.
pub fn week_of_month(day: u32) -> u32 {
    (day.max(1) - 1) / 7 + 1
}

/// A record paired with the date its text parsed to.
#[derive(Debug, Serialize)]
pub struct Dated<'a, T> {
    pub date: NaiveDate,
    pub item: &'a T,
}

impl<T> Clone for Dated<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Dated<'_, T> {}

/// Pair each record with its parsed date, skipping the ones that don't parse.
pub fn date_records<'a, T>(
    records: &'a [T],
    date_text: impl Fn(&T) -> &str,
    reference_year: Option<i32>,
) -> Vec<Dated<'a, T>> {
    records
        .iter()
        .filter_map(|item| {
            parse_date(date_text(item), reference_year).map(|date| Dated { date, item })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeekKey {
    pub year: i32,
    pub month: u32,
    pub week: u32,
}

#[derive(Debug, Serialize)]
pub struct WeekBucket<'a, T> {
    #[serde(flatten)]
    pub key: WeekKey,
    pub start_day: u32,
    pub end_day: u32,
    pub entries: Vec<Dated<'a, T>>,
}

/// Group dated records into fixed-origin week buckets, oldest first.
/// Records keep their input order inside a bucket.
pub fn bucket_by_week<'a, T>(entries: &[Dated<'a, T>]) -> Vec<WeekBucket<'a, T>> {
    let mut buckets: BTreeMap<WeekKey, Vec<Dated<'a, T>>> = BTreeMap::new();

    for entry in entries {
        let key = WeekKey {
            year: entry.date.year(),
            month: entry.date.month(),
            week: week_of_month(entry.date.day()),
        };
        buckets.entry(key).or_default().push(*entry);
    }

    buckets
        .into_iter()
        .map(|(key, entries)| {
            let start_day = (key.week - 1) * 7 + 1;
            let days = MonthYear {
                year: key.year,
                month: key.month,
            }
            .days_in_month();
            WeekBucket {
                key,
                start_day,
                end_day: (start_day + 6).min(days),
                entries,
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CalendarDay<'a, T> {
    pub day: u32,
    pub entries: Vec<&'a T>,
}

/// Sunday-first month grid. Days outside the month are `None`.
#[derive(Debug, Serialize)]
pub struct MonthGrid<'a, T> {
    pub month: MonthYear,
    pub weeks: Vec<Vec<Option<CalendarDay<'a, T>>>>,
}

pub fn month_grid<'a, T>(month: MonthYear, entries: &[Dated<'a, T>]) -> MonthGrid<'a, T> {
    let Some(first) = month.first_day() else {
        return MonthGrid {
            month,
            weeks: Vec::new(),
        };
    };

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<CalendarDay<'a, T>>> = (0..leading).map(|_| None).collect();

    for day in 1..=month.days_in_month() {
        let day_entries = entries
            .iter()
            .filter(|e| month.contains(e.date) && e.date.day() == day)
            .map(|e| e.item)
            .collect();
        cells.push(Some(CalendarDay {
            day,
            entries: day_entries,
        }));
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    let mut weeks = Vec::with_capacity(cells.len() / 7);
    let mut cells = cells.into_iter();
    loop {
        let week: Vec<_> = cells.by_ref().take(7).collect();
        if week.is_empty() {
            break;
        }
        weeks.push(week);
    }

    MonthGrid { month, weeks }
}
