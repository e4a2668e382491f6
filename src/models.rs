use crate::calendar::{
    AttendanceStatus, CalendarCell, MonthAttendance, MonthCursor, MonthlySummary,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: String,
    pub role: String,
}

impl Employee {
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Roster plus per-employee daily statuses keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttendanceBook {
    pub employees: Vec<Employee>,
    pub records: BTreeMap<String, BTreeMap<String, AttendanceStatus>>,
}

impl AttendanceBook {
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn status_on(&self, employee_id: &str, date: NaiveDate) -> Option<AttendanceStatus> {
        self.records
            .get(employee_id)
            .and_then(|days| days.get(&date_key(date)))
            .copied()
    }

    pub fn set_status(&mut self, employee_id: &str, date: NaiveDate, status: AttendanceStatus) {
        self.records
            .entry(employee_id.to_string())
            .or_default()
            .insert(date_key(date), status);
    }

    pub fn restore_status(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        status: Option<AttendanceStatus>,
    ) {
        match status {
            Some(status) => self.set_status(employee_id, date, status),
            None => {
                if let Some(days) = self.records.get_mut(employee_id) {
                    days.remove(&date_key(date));
                }
            }
        }
    }

    /// Projects one employee's records onto a month. Keys that do not parse
    /// as dates or fall outside the month are skipped.
    pub fn month_attendance(&self, employee_id: &str, cursor: MonthCursor) -> MonthAttendance {
        let Some(days) = self.records.get(employee_id) else {
            return MonthAttendance::new();
        };

        days.iter()
            .filter_map(|(key, status)| {
                let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()?;
                cursor.contains(date).then_some((date.day(), *status))
            })
            .collect()
    }

    /// Dated records of one employee within a month, oldest first.
    pub fn month_records(&self, employee_id: &str, cursor: MonthCursor) -> Vec<RecordPoint> {
        let Some(days) = self.records.get(employee_id) else {
            return Vec::new();
        };

        days.iter()
            .filter_map(|(key, status)| {
                let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()?;
                cursor.contains(date).then(|| RecordPoint {
                    date: date.to_string(),
                    weekday: date.format("%a").to_string(),
                    status: *status,
                })
            })
            .collect()
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecordPoint {
    pub date: String,
    pub weekday: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub employee: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    pub year: i64,
    pub month: i64,
    pub direction: String,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub employee: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub tab: Option<String>,
    pub nav: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub employee_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub employee_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    pub phase: String,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub employee_id: String,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub cells: Vec<CalendarCell>,
    pub summary: MonthlySummary,
    pub attendance_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub department: String,
    pub role: String,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            initials: employee.initials(),
            department: employee.department.clone(),
            role: employee.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> AttendanceBook {
        let mut book = AttendanceBook::default();
        book.employees.push(Employee {
            id: "emp-1".into(),
            name: "ada lovelace".into(),
            department: "Engineering".into(),
            role: "Analyst".into(),
        });
        book
    }

    #[test]
    fn month_attendance_only_includes_requested_month() {
        let mut book = book();
        let cursor = MonthCursor::new(2025, 10).unwrap();
        let third = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let december = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        book.set_status("emp-1", third, AttendanceStatus::Late);
        book.set_status("emp-1", december, AttendanceStatus::Absent);
        book.records
            .get_mut("emp-1")
            .unwrap()
            .insert("not-a-date".into(), AttendanceStatus::Present);

        let month = book.month_attendance("emp-1", cursor);
        assert_eq!(month, MonthAttendance::from([(3, AttendanceStatus::Late)]));
        assert!(book.month_attendance("nobody", cursor).is_empty());
    }

    #[test]
    fn month_records_are_dated_and_ordered() {
        let mut book = book();
        let cursor = MonthCursor::new(2025, 10).unwrap();
        let third = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let fourth = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
        book.set_status("emp-1", fourth, AttendanceStatus::Present);
        book.set_status("emp-1", third, AttendanceStatus::Late);

        let records = book.month_records("emp-1", cursor);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2025-11-03");
        assert_eq!(records[0].weekday, "Mon");
        assert_eq!(records[1].status, AttendanceStatus::Present);
    }

    #[test]
    fn restore_status_reverts_or_removes_entry() {
        let mut book = book();
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();

        book.set_status("emp-1", date, AttendanceStatus::Present);
        book.restore_status("emp-1", date, None);
        assert_eq!(book.status_on("emp-1", date), None);

        book.set_status("emp-1", date, AttendanceStatus::Present);
        book.restore_status("emp-1", date, Some(AttendanceStatus::Absent));
        assert_eq!(book.status_on("emp-1", date), Some(AttendanceStatus::Absent));
    }

    #[test]
    fn initials_use_first_two_words() {
        let book = book();
        assert_eq!(book.employee("emp-1").unwrap().initials(), "AL");
        assert!(book.employee("emp-2").is_none());
    }
}
