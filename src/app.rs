use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/check-in", post(handlers::check_in_form))
        .route("/api/employees", get(handlers::get_employees))
        .route("/api/today", get(handlers::get_today))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/navigate", get(handlers::navigate))
        .route("/api/check-in", post(handlers::check_in))
        .with_state(state)
}
