use crate::block::{parse_block, render_block, store_from};
use crate::errors::AppError;
use crate::models::{
    CalendarSummary, CreateCalendarRequest, StreakResponse, ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::storage::{persist_data, AppData};
use crate::store::{GoalStore, PeriodType};
use crate::streak::current_streak;
use crate::ui::{render_empty, render_index};
use crate::view::{build_snapshot, CalendarSnapshot};
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub id: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl ViewParams {
    fn resolve(&self, today: NaiveDate) -> (i32, u32) {
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCalendarForm {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub period_type: String,
    #[serde(default)]
    pub streak: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Html<String>, AppError> {
    let today = Local::now().date_naive();
    let (year, month) = params.resolve(today);

    let data = state.data.lock().await;
    let Some(store) = pick_calendar(&data, params.id.as_deref())? else {
        return Ok(Html(render_empty()));
    };
    let snapshot = snapshot_or_bad_request(store, year, month, today)?;
    let calendars: Vec<(String, String)> = data
        .calendars
        .values()
        .map(|c| (c.id.clone(), c.title.clone()))
        .collect();

    Ok(Html(render_index(&snapshot, &calendars)))
}

pub async fn create_calendar_form(
    State(state): State<AppState>,
    Form(form): Form<CreateCalendarForm>,
) -> Result<Redirect, AppError> {
    let period_type = PeriodType::from_str_opt(form.period_type.trim())
        .ok_or_else(|| AppError::bad_request("type must be daily, weekly or monthly"))?;
    let title = match form.title.trim() {
        "" => "Goal Tracker",
        title => title,
    };
    let store = GoalStore::new(period_type, title, form.streak.is_some());

    let mut data = state.data.lock().await;
    let id = data.insert(store);
    persist_best_effort(&state, &data).await;

    Ok(Redirect::to(&format!("/?id={id}")))
}

pub async fn toggle_cell(
    State(state): State<AppState>,
    Path((id, key)): Path<(String, String)>,
    Query(params): Query<ViewParams>,
) -> Result<Redirect, AppError> {
    let today = Local::now().date_naive();
    let (year, month) = params.resolve(today);

    let mut data = state.data.lock().await;
    data.calendars
        .get_mut(&id)
        .ok_or_else(|| AppError::not_found("unknown calendar"))?
        .toggle(&key);
    persist_best_effort(&state, &data).await;

    Ok(Redirect::to(&format!("/?id={id}&year={year}&month={month}")))
}

pub async fn list_calendars(State(state): State<AppState>) -> Json<Vec<CalendarSummary>> {
    let data = state.data.lock().await;
    Json(data.calendars.values().map(CalendarSummary::of).collect())
}

pub async fn create_calendar(
    State(state): State<AppState>,
    Json(request): Json<CreateCalendarRequest>,
) -> Result<Json<CalendarSummary>, AppError> {
    let store = GoalStore::new(
        request.period_type.unwrap_or(PeriodType::Daily),
        request.title.unwrap_or_else(|| "Goal Tracker".to_string()),
        request.show_streak.unwrap_or(false),
    );
    let summary = CalendarSummary::of(&store);

    let mut data = state.data.lock().await;
    data.insert(store);
    persist_best_effort(&state, &data).await;

    Ok(Json(summary))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ViewParams>,
) -> Result<Json<CalendarSnapshot>, AppError> {
    let today = Local::now().date_naive();
    let (year, month) = params.resolve(today);

    let data = state.data.lock().await;
    let store = find_calendar(&data, &id)?;
    let snapshot = snapshot_or_bad_request(store, year, month, today)?;
    Ok(Json(snapshot))
}

pub async fn toggle_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let mut data = state.data.lock().await;
    let response = {
        let store = data
            .calendars
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("unknown calendar"))?;
        let completed = store.toggle(&request.key);
        ToggleResponse {
            key: request.key,
            completed,
            streak: current_streak(store),
        }
    };
    // The toggle stays applied in memory even if the write fails; it becomes
    // durable with the next successful write.
    persist_best_effort(&state, &data).await;

    Ok(Json(response))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StreakResponse>, AppError> {
    let data = state.data.lock().await;
    let store = find_calendar(&data, &id)?;
    Ok(Json(StreakResponse {
        streak: current_streak(store),
    }))
}

pub async fn export_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, AppError> {
    let data = state.data.lock().await;
    let store = find_calendar(&data, &id)?;
    Ok(render_block(store))
}

pub async fn import_calendar(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<CalendarSummary>, AppError> {
    let (options, calendar_data) = parse_block(&body);
    let store = store_from(&options, calendar_data);
    let summary = CalendarSummary::of(&store);

    let mut data = state.data.lock().await;
    data.insert(store);
    persist_best_effort(&state, &data).await;

    Ok(Json(summary))
}

fn pick_calendar<'a>(
    data: &'a AppData,
    id: Option<&str>,
) -> Result<Option<&'a GoalStore>, AppError> {
    match id {
        Some(id) => find_calendar(data, id).map(Some),
        None => Ok(data.calendars.values().next()),
    }
}

fn find_calendar<'a>(data: &'a AppData, id: &str) -> Result<&'a GoalStore, AppError> {
    data.calendars
        .get(id)
        .ok_or_else(|| AppError::not_found("unknown calendar"))
}

fn snapshot_or_bad_request(
    store: &GoalStore,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<CalendarSnapshot, AppError> {
    build_snapshot(store, year, month, today)
        .ok_or_else(|| AppError::bad_request("year/month out of range"))
}

async fn persist_best_effort(state: &AppState, data: &AppData) {
    if let Err(err) = persist_data(&state.data_path, data).await {
        error!("skipping failed write to {:?}: {}", state.data_path, err.message);
    }
}
