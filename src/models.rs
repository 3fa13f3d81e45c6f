use crate::store::{GoalStore, PeriodType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The JSON object embedded in a calendar block:
/// `{ id, type, title, goals }`. `show_streak` is not part of this shape;
/// in the block format it travels as an option line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarData {
    pub id: String,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub title: String,
    #[serde(default)]
    pub goals: BTreeMap<String, bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCalendarRequest {
    #[serde(default, rename = "type")]
    pub period_type: Option<PeriodType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub show_streak: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub key: String,
    pub completed: bool,
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub title: String,
    pub show_streak: bool,
    pub goal_count: usize,
}

impl CalendarSummary {
    pub fn of(store: &GoalStore) -> Self {
        Self {
            id: store.id.clone(),
            period_type: store.period_type,
            title: store.title.clone(),
            show_streak: store.show_streak,
            goal_count: store.goals.len(),
        }
    }
}
