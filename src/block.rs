use crate::models::CalendarData;
use crate::store::{GoalStore, PeriodType};
use std::collections::BTreeMap;
use tracing::warn;

/// Options parsed from the leading `key: value` lines of an embedded block.
/// An absent `streak` option means the streak counter stays hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOptions {
    pub period_type: PeriodType,
    pub title: String,
    pub show_streak: bool,
}

impl Default for BlockOptions {
    fn default() -> Self {
        Self {
            period_type: PeriodType::Daily,
            title: "Goal Tracker".to_string(),
            show_streak: false,
        }
    }
}

/// Parses an embedded calendar block: option lines (`type`, `title`,
/// `streak`) terminated by the first line without a colon, then a JSON
/// object. Empty or malformed JSON falls back to a fresh empty calendar
/// with a new id; the option title always wins over the JSON title.
pub fn parse_block(source: &str) -> (BlockOptions, CalendarData) {
    let mut options = BlockOptions::default();
    let mut lines = source.trim().lines().peekable();

    while let Some(line) = lines.peek() {
        let Some((key, value)) = line.split_once(':') else {
            break;
        };
        match key.trim() {
            "type" => {
                if let Some(period_type) = PeriodType::from_str_opt(value.trim()) {
                    options.period_type = period_type;
                }
            }
            "title" => options.title = value.trim().to_string(),
            "streak" => options.show_streak = value.trim() == "true",
            other => warn!("ignoring unknown calendar option {other:?}"),
        }
        lines.next();
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    let mut data = if body.trim().is_empty() {
        fresh_data(&options)
    } else {
        match serde_json::from_str::<CalendarData>(&body) {
            Ok(data) => data,
            Err(err) => {
                warn!("failed to parse calendar block, starting fresh: {err}");
                fresh_data(&options)
            }
        }
    };
    data.title = options.title.clone();

    (options, data)
}

/// Renders a calendar back into block text; `parse_block` round-trips it.
pub fn render_block(store: &GoalStore) -> String {
    let data = CalendarData {
        id: store.id.clone(),
        period_type: store.period_type,
        title: store.title.clone(),
        goals: store.goals.clone(),
    };
    // CalendarData has no fallible serialization states.
    let json = serde_json::to_string_pretty(&data).unwrap_or_default();
    format!(
        "type: {}\ntitle: {}\nstreak: {}\n{}",
        store.period_type.as_str(),
        store.title,
        store.show_streak,
        json
    )
}

/// Replaces the body of an embedded block inside a larger document. The line
/// at `line_start` (the opening fence) and everything from `line_end` on are
/// kept; the lines in between become `block`.
pub fn splice_block(content: &str, line_start: usize, line_end: usize, block: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let before = lines[..(line_start + 1).min(lines.len())].join("\n");
    let after = lines[line_end.min(lines.len())..].join("\n");
    format!("{before}\n{block}\n{after}")
}

pub fn store_from(options: &BlockOptions, data: CalendarData) -> GoalStore {
    GoalStore {
        id: data.id,
        period_type: data.period_type,
        title: data.title,
        show_streak: options.show_streak,
        goals: data.goals,
    }
}

fn fresh_data(options: &BlockOptions) -> CalendarData {
    CalendarData {
        id: uuid::Uuid::new_v4().to_string(),
        period_type: options.period_type,
        title: options.title.clone(),
        goals: BTreeMap::new(),
    }
}
