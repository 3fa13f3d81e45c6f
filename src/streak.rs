use crate::store::{GoalStore, PeriodType};
use chrono::{Duration, Local, NaiveDate};

pub fn current_streak(store: &GoalStore) -> u32 {
    current_streak_at(Local::now().date_naive(), store)
}

/// Consecutive completed periods counting backward from `today`, breaking at
/// the first gap. Returns 0 when streak display is disabled or nothing is
/// completed. Read-only; safe to call on every render.
pub fn current_streak_at(today: NaiveDate, store: &GoalStore) -> u32 {
    if !store.show_streak {
        return 0;
    }

    let mut completed: Vec<&str> = store
        .goals
        .iter()
        .filter(|(_, completed)| **completed)
        .map(|(key, _)| key.as_str())
        .collect();
    if completed.is_empty() {
        return 0;
    }
    completed.sort_unstable_by(|a, b| b.cmp(a));

    match store.period_type {
        PeriodType::Daily => daily_streak(today, &completed),
        PeriodType::Weekly => weekly_streak(&completed),
        PeriodType::Monthly => monthly_streak(&completed),
    }
}

fn daily_streak(today: NaiveDate, keys: &[&str]) -> u32 {
    let mut count = 0;
    let mut last: Option<NaiveDate> = None;

    for key in keys {
        let Ok(date) = NaiveDate::parse_from_str(key, "%Y-%m-%d") else {
            continue;
        };
        // Future-dated entries are skipped, not treated as gaps.
        if date > today {
            continue;
        }
        match last {
            None => {
                count = 1;
                last = Some(date);
            }
            Some(prev) => {
                if prev - date == Duration::days(1) {
                    count += 1;
                    last = Some(date);
                } else {
                    break;
                }
            }
        }
    }
    count
}

fn weekly_streak(keys: &[&str]) -> u32 {
    let mut count = 0;
    let mut last: Option<(i32, u32)> = None;

    for key in keys {
        let Some((year, week)) = parse_week_key(key) else {
            continue;
        };
        match last {
            None => {
                count = 1;
                last = Some((year, week));
            }
            Some((prev_year, prev_week)) => {
                // Year wrap only recognizes week 52 as preceding week 1;
                // 53-week ISO years break the streak at the boundary.
                let consecutive = (year == prev_year && week + 1 == prev_week)
                    || (year + 1 == prev_year && prev_week == 1 && week == 52);
                if consecutive {
                    count += 1;
                    last = Some((year, week));
                } else {
                    break;
                }
            }
        }
    }
    count
}

fn monthly_streak(keys: &[&str]) -> u32 {
    let mut count = 0;
    let mut last: Option<(i32, u32)> = None;

    for key in keys {
        let Some((year, month)) = parse_month_key(key) else {
            continue;
        };
        match last {
            None => {
                count = 1;
                last = Some((year, month));
            }
            Some((prev_year, prev_month)) => {
                let consecutive = (year == prev_year && month + 1 == prev_month)
                    || (year + 1 == prev_year && prev_month == 1 && month == 12);
                if consecutive {
                    count += 1;
                    last = Some((year, month));
                } else {
                    break;
                }
            }
        }
    }
    count
}

fn parse_week_key(key: &str) -> Option<(i32, u32)> {
    let (year, week) = key.split_once("-W")?;
    Some((year.parse().ok()?, week.parse().ok()?))
}

fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (year, month) = key.split_once('-')?;
    if month.len() != 2 {
        return None;
    }
    Some((year.parse().ok()?, month.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(period_type: PeriodType, keys: &[&str]) -> GoalStore {
        let mut store = GoalStore::new(period_type, "t", true);
        for key in keys {
            store.goals.insert((*key).to_string(), true);
        }
        store
    }

    fn today(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_streak_breaks_at_first_gap() {
        let store = store_with(
            PeriodType::Daily,
            &["2024-03-05", "2024-03-04", "2024-03-03", "2024-03-01"],
        );
        assert_eq!(current_streak_at(today(2024, 3, 5), &store), 3);
    }

    #[test]
    fn daily_streak_skips_future_dates_without_breaking() {
        let store = store_with(PeriodType::Daily, &["2024-03-09", "2024-03-05", "2024-03-04"]);
        assert_eq!(current_streak_at(today(2024, 3, 5), &store), 2);
    }

    #[test]
    fn monthly_streak_wraps_december_to_january() {
        let store = store_with(PeriodType::Monthly, &["2024-01", "2023-12", "2023-11"]);
        assert_eq!(current_streak_at(today(2024, 1, 15), &store), 3);
    }

    #[test]
    fn weekly_streak_accepts_week_52_across_year_boundary() {
        let store = store_with(PeriodType::Weekly, &["2024-W01", "2023-W52"]);
        assert_eq!(current_streak_at(today(2024, 1, 5), &store), 2);
    }

    #[test]
    fn weekly_streak_does_not_recognize_week_53_predecessor() {
        let store = store_with(PeriodType::Weekly, &["2024-W01", "2023-W53"]);
        assert_eq!(current_streak_at(today(2024, 1, 5), &store), 1);
    }

    #[test]
    fn empty_goals_yield_zero() {
        for period_type in [PeriodType::Daily, PeriodType::Weekly, PeriodType::Monthly] {
            let store = GoalStore::new(period_type, "t", true);
            assert_eq!(current_streak_at(today(2024, 3, 5), &store), 0);
        }
    }

    #[test]
    fn disabled_streak_display_yields_zero() {
        let mut store = store_with(PeriodType::Daily, &["2024-03-05"]);
        store.show_streak = false;
        assert_eq!(current_streak_at(today(2024, 3, 5), &store), 0);
    }

    #[test]
    fn uncompleted_entries_do_not_count() {
        let mut store = store_with(PeriodType::Daily, &["2024-03-05"]);
        store.goals.insert("2024-03-04".to_string(), false);
        store.goals.insert("2024-03-03".to_string(), true);
        assert_eq!(current_streak_at(today(2024, 3, 5), &store), 1);
    }
}
