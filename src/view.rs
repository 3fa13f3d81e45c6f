use crate::store::{key_for, GoalStore, PeriodType};
use crate::streak::current_streak_at;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Serialize)]
pub struct CalendarCell {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub completed: bool,
}

/// Read-only snapshot of one displayed calendar page. Everything a renderer
/// needs: the cells with their period keys, plus the current streak.
#[derive(Debug, Serialize)]
pub struct CalendarSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub title: String,
    pub show_streak: bool,
    pub year: i32,
    pub month: u32,
    pub streak: u32,
    pub leading_blanks: usize,
    pub cells: Vec<CalendarCell>,
}

/// Builds the snapshot for `year`/`month`. Returns `None` when the pair does
/// not name a valid calendar page.
pub fn build_snapshot(
    store: &GoalStore,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<CalendarSnapshot> {
    let (leading_blanks, cells) = match store.period_type {
        PeriodType::Daily => daily_cells(store, year, month)?,
        PeriodType::Weekly => (0, weekly_cells(store, year, month)?),
        PeriodType::Monthly => (0, monthly_cells(store, year)),
    };

    Some(CalendarSnapshot {
        id: store.id.clone(),
        period_type: store.period_type,
        title: store.title.clone(),
        show_streak: store.show_streak,
        year,
        month,
        streak: current_streak_at(today, store),
        leading_blanks,
        cells,
    })
}

fn daily_cells(store: &GoalStore, year: i32, month: u32) -> Option<(usize, Vec<CalendarCell>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = last_day_of_month(year, month)?;
    // Sunday-start grid.
    let leading_blanks = first.weekday().num_days_from_sunday() as usize;

    let mut cells = Vec::with_capacity(last.day() as usize);
    for day in 1..=last.day() {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let key = key_for(PeriodType::Daily, date);
        cells.push(CalendarCell {
            completed: store.is_completed(&key),
            key,
            label: day.to_string(),
            detail: None,
        });
    }
    Some((leading_blanks, cells))
}

fn weekly_cells(store: &GoalStore, year: i32, month: u32) -> Option<Vec<CalendarCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = last_day_of_month(year, month)?;

    let mut cells = Vec::new();
    let mut cursor = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    while cursor <= last {
        // A week belongs to the month its Thursday falls in.
        let thursday = cursor + Duration::days(3);
        if thursday.month() == month && thursday.year() == year {
            let key = key_for(PeriodType::Weekly, cursor);
            let week_end = cursor + Duration::days(6);
            cells.push(CalendarCell {
                completed: store.is_completed(&key),
                label: format!("Week {}", crate::datemath::iso_week_number(cursor)),
                detail: Some(format!(
                    "{} {} - {} {}",
                    cursor.day(),
                    MONTH_NAMES[cursor.month0() as usize],
                    week_end.day(),
                    MONTH_NAMES[week_end.month0() as usize],
                )),
                key,
            });
        }
        cursor += Duration::days(7);
    }
    Some(cells)
}

fn monthly_cells(store: &GoalStore, year: i32) -> Vec<CalendarCell> {
    (1..=12u32)
        .map(|month| {
            let key = format!("{year:04}-{month:02}");
            CalendarCell {
                completed: store.is_completed(&key),
                key,
                label: MONTH_NAMES[(month - 1) as usize].to_string(),
                detail: None,
            }
        })
        .collect()
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next - Duration::days(1))
}
