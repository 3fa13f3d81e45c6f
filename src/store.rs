use crate::datemath::{iso_week_number, iso_week_year};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
    Monthly,
}

impl PeriodType {
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Singular unit name for streak display.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
        }
    }
}

/// One tracked calendar: a period type fixed for its lifetime plus a mapping
/// from period key to completion flag. Keys are `YYYY-MM-DD`, `YYYY-Www`
/// (ISO week, zero-padded) or `YYYY-MM` depending on the period type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalStore {
    pub id: String,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub title: String,
    #[serde(default)]
    pub show_streak: bool,
    #[serde(default)]
    pub goals: BTreeMap<String, bool>,
}

impl GoalStore {
    pub fn new(period_type: PeriodType, title: impl Into<String>, show_streak: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            period_type,
            title: title.into(),
            show_streak,
            goals: BTreeMap::new(),
        }
    }

    /// Absent keys read as "not completed".
    pub fn is_completed(&self, key: &str) -> bool {
        self.goals.get(key).copied().unwrap_or(false)
    }

    /// Flips the flag for `key` and returns the new value. This is the only
    /// mutation entry point; the caller is responsible for persisting after.
    pub fn toggle(&mut self, key: &str) -> bool {
        let flag = self.goals.entry(key.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }
}

pub fn key_for(period_type: PeriodType, date: NaiveDate) -> String {
    match period_type {
        PeriodType::Daily => date.format("%Y-%m-%d").to_string(),
        PeriodType::Weekly => {
            format!("{}-W{:02}", iso_week_year(date), iso_week_number(date))
        }
        PeriodType::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn key_formats_per_period_type() {
        let d = date(2024, 3, 5);
        assert_eq!(key_for(PeriodType::Daily, d), "2024-03-05");
        assert_eq!(key_for(PeriodType::Monthly, d), "2024-03");
        // 2024-03-05 falls in ISO week 10 of 2024.
        assert_eq!(key_for(PeriodType::Weekly, d), "2024-W10");
    }

    #[test]
    fn absent_key_reads_as_not_completed() {
        let store = GoalStore::new(PeriodType::Daily, "t", false);
        assert!(!store.is_completed("2024-03-05"));
    }

    #[test]
    fn toggle_twice_restores_initial_value() {
        let mut store = GoalStore::new(PeriodType::Daily, "t", false);
        assert!(store.toggle("2024-03-05"));
        assert!(store.is_completed("2024-03-05"));
        assert!(!store.toggle("2024-03-05"));
        assert!(!store.is_completed("2024-03-05"));
    }
}
