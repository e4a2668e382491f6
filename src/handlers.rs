use crate::calendar::{self, MonthCursor};
use crate::checkin::{CheckInEvent, CheckInSession, record_check_in};
use crate::errors::AppError;
use crate::models::{
    AttendanceBook, CalendarQuery, CalendarResponse, CheckInRequest, CheckInResponse,
    DashboardQuery, EmployeeResponse, NavigateQuery,
};
use crate::recognition::Capture;
use crate::state::AppState;
use crate::stats::{TodayOverview, build_calendar, build_today};
use crate::storage::persist_book;
use crate::ui::render_dashboard;
use crate::view::{DashboardTab, ViewEvent, ViewState};
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::Local;
use tracing::{info, warn};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let book = state.book.lock().await;
    let cursor = resolve_cursor(query.year, query.month)?;

    let mut view = ViewState::new(resolve_employee(&book, None)?, cursor);
    if let Some(requested) = query.employee.as_deref().filter(|id| !id.trim().is_empty()) {
        view.apply(ViewEvent::SelectEmployee(resolve_employee(&book, Some(requested))?))?;
    }
    if let Some(tab) = query.tab.as_deref().and_then(DashboardTab::parse) {
        view.apply(ViewEvent::SelectTab(tab))?;
    }
    match query.nav.as_deref() {
        Some("prev") => view.apply(ViewEvent::PrevMonth)?,
        Some("next") => view.apply(ViewEvent::NextMonth)?,
        _ => {}
    }

    let calendar = build_calendar(&book, &view.employee_id, view.cursor)?;
    let records = book.month_records(&view.employee_id, view.cursor);
    let today = build_today(&book);
    Ok(Html(render_dashboard(
        &view,
        &book.employees,
        &calendar,
        &records,
        &today,
    )))
}

pub async fn get_employees(State(state): State<AppState>) -> Json<Vec<EmployeeResponse>> {
    let book = state.book.lock().await;
    Json(book.employees.iter().map(EmployeeResponse::from).collect())
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayOverview> {
    let book = state.book.lock().await;
    Json(build_today(&book))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let book = state.book.lock().await;
    let employee_id = resolve_employee(&book, query.employee.as_deref())?;
    let cursor = resolve_cursor(query.year, query.month)?;
    Ok(Json(build_calendar(&book, &employee_id, cursor)?))
}

pub async fn navigate(Query(query): Query<NavigateQuery>) -> Result<Json<MonthCursor>, AppError> {
    let (year, month) = calendar::validate(query.year, query.month)?;
    let cursor = MonthCursor::new(year, month)?;
    let next = match query.direction.trim() {
        "prev" => cursor.prev()?,
        "next" => cursor.next()?,
        _ => return Err(AppError::bad_request("direction must be 'prev' or 'next'")),
    };
    Ok(Json(next))
}

pub async fn check_in(
    State(state): State<AppState>,
    Json(payload): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    Ok(Json(run_check_in(&state, &payload.employee_id).await?))
}

pub async fn check_in_form(
    State(state): State<AppState>,
    Form(payload): Form<CheckInRequest>,
) -> Result<Redirect, AppError> {
    let response = run_check_in(&state, &payload.employee_id).await?;
    Ok(Redirect::to(&format!("/?employee={}", response.employee_id)))
}

async fn run_check_in(state: &AppState, employee_id: &str) -> Result<CheckInResponse, AppError> {
    let employee_id = employee_id.trim();
    if employee_id.is_empty() {
        return Err(AppError::bad_request("employee_id is required"));
    }

    let mut session = CheckInSession::new(state.check_in);
    session.apply(CheckInEvent::StartCamera)?;
    session.apply(CheckInEvent::Capture)?;

    let outcome = state
        .recognizer
        .recognize(Capture {
            claimed_employee_id: employee_id.to_string(),
        })
        .await;
    session.apply(CheckInEvent::Recognized {
        outcome,
        at: Local::now().naive_local(),
    })?;

    let verified = match session.verified() {
        Ok(verified) => verified,
        Err(err) => {
            warn!(employee = %employee_id, "check-in rejected: {err}");
            return Err(err.into());
        }
    };

    let date = verified.at.date();
    let mut book = state.book.lock().await;
    let previous = book.status_on(&verified.employee_id, date);
    let recorded = record_check_in(&mut book, &verified.employee_id, verified.status, verified.at);
    if let Err(err) = persist_book(&state.data_path, &book).await {
        // Keep memory in step with the file when the write fails.
        book.restore_status(&verified.employee_id, date, previous);
        return Err(err);
    }
    info!(employee = %verified.employee_id, status = recorded.as_str(), "checked in");

    Ok(CheckInResponse {
        employee_id: verified.employee_id,
        date: date.to_string(),
        status: recorded,
        phase: session.phase().name().to_string(),
    })
}

fn resolve_employee(book: &AttendanceBook, requested: Option<&str>) -> Result<String, AppError> {
    match requested.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => book
            .employee(id)
            .map(|employee| employee.id.clone())
            .ok_or_else(|| AppError::not_found(format!("unknown employee '{id}'"))),
        None => book
            .employees
            .first()
            .map(|employee| employee.id.clone())
            .ok_or_else(|| AppError::not_found("no employees on the roster")),
    }
}

fn resolve_cursor(year: Option<i64>, month: Option<i64>) -> Result<MonthCursor, AppError> {
    let current = MonthCursor::containing(Local::now().date_naive());
    let (year, month) = calendar::validate(
        year.unwrap_or(i64::from(current.year)),
        month.unwrap_or(i64::from(current.month)),
    )?;
    Ok(MonthCursor::new(year, month)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::CheckInPolicy;
    use crate::recognition::SimulatedRecognizer;
    use crate::roster;
    use axum::http::StatusCode;
    use chrono::NaiveTime;
    use std::{path::PathBuf, sync::Arc, time::Duration};

    fn state_with_path(data_path: PathBuf) -> AppState {
        let book = roster::seed_book(Local::now().date_naive());
        let recognizer = SimulatedRecognizer::new(
            Duration::ZERO,
            book.employees.iter().map(|employee| employee.id.clone()),
        );
        let policy = CheckInPolicy {
            late_after: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
            min_confidence: 0.8,
        };
        AppState::new(data_path, book, Arc::new(recognizer), policy)
    }

    #[tokio::test]
    async fn failed_write_leaves_book_untouched() {
        // A directory cannot be written as a file.
        let state = state_with_path(std::env::temp_dir());
        let err = run_check_in(&state, "EMP-001").await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let book = state.book.lock().await;
        assert_eq!(book.status_on("EMP-001", Local::now().date_naive()), None);
    }

    #[tokio::test]
    async fn blank_employee_is_bad_request_for_both_routes() {
        let state = state_with_path(std::env::temp_dir());

        let Err(err) = check_in_form(
            State(state.clone()),
            Form(CheckInRequest {
                employee_id: "   ".into(),
            }),
        )
        .await
        else {
            panic!("blank form check-in succeeded");
        };
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let Err(err) = check_in(
            State(state),
            Json(CheckInRequest {
                employee_id: String::new(),
            }),
        )
        .await
        else {
            panic!("blank json check-in succeeded");
        };
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_face_is_unprocessable() {
        let state = state_with_path(std::env::temp_dir());
        let err = run_check_in(&state, "EMP-404").await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "face not recognized");
    }
}
