use crate::calendar::{self, AttendanceStatus, CalendarError, MonthCursor, MonthlySummary};
use crate::models::{AttendanceBook, CalendarResponse};
use chrono::{Local, NaiveDate};
use serde::Serialize;

pub fn build_calendar(
    book: &AttendanceBook,
    employee_id: &str,
    cursor: MonthCursor,
) -> Result<CalendarResponse, CalendarError> {
    let attendance = book.month_attendance(employee_id, cursor);
    let grid = calendar::build(cursor.year, cursor.month, &attendance)?;

    Ok(CalendarResponse {
        employee_id: employee_id.to_string(),
        year: cursor.year,
        month: cursor.month,
        month_name: calendar::month_name(cursor.month)?.to_string(),
        attendance_rate: attendance_rate(&grid.summary),
        cells: grid.cells,
        summary: grid.summary,
    })
}

pub fn attendance_rate(summary: &MonthlySummary) -> f64 {
    if summary.working_days == 0 {
        return 0.0;
    }
    let rate = f64::from(summary.attended_days) * 100.0 / f64::from(summary.working_days);
    (rate * 10.0).round() / 10.0
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct TodayOverview {
    pub date: String,
    pub headcount: u32,
    pub present: u32,
    pub late: u32,
    pub absent: u32,
    pub leave: u32,
    pub not_checked_in: u32,
}

pub fn build_today(book: &AttendanceBook) -> TodayOverview {
    build_today_at(Local::now().date_naive(), book)
}

pub fn build_today_at(today: NaiveDate, book: &AttendanceBook) -> TodayOverview {
    let mut overview = TodayOverview {
        date: today.to_string(),
        ..TodayOverview::default()
    };

    for employee in &book.employees {
        overview.headcount += 1;
        match book.status_on(&employee.id, today).unwrap_or_default() {
            AttendanceStatus::Present => overview.present += 1,
            AttendanceStatus::Late => overview.late += 1,
            AttendanceStatus::Absent => overview.absent += 1,
            AttendanceStatus::Leave => overview.leave += 1,
            AttendanceStatus::Weekend | AttendanceStatus::Unknown => overview.not_checked_in += 1,
        }
    }

    overview
}
