use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/calendars", post(handlers::create_calendar_form))
        .route("/toggle/:id/:key", post(handlers::toggle_cell))
        .route(
            "/api/calendars",
            get(handlers::list_calendars).post(handlers::create_calendar),
        )
        .route("/api/calendars/:id", get(handlers::get_calendar))
        .route("/api/calendars/:id/toggle", post(handlers::toggle_goal))
        .route("/api/calendars/:id/streak", get(handlers::get_streak))
        .route("/api/calendars/:id/export", get(handlers::export_calendar))
        .route("/api/import", post(handlers::import_calendar))
        .with_state(state)
}
