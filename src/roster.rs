use crate::calendar::AttendanceStatus;
use crate::models::{AttendanceBook, Employee};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

const SEED_DAYS: i64 = 90;

const EMPLOYEES: [(&str, &str, &str, &str); 5] = [
    ("EMP-001", "Sarah Johnson", "Human Resources", "HR Manager"),
    ("EMP-002", "Michael Chen", "Engineering", "Senior Developer"),
    ("EMP-003", "Priya Patel", "Finance", "Accountant"),
    ("EMP-004", "David Okafor", "Operations", "Logistics Lead"),
    ("EMP-005", "Elena Rossi", "Sales", "Account Executive"),
];

pub fn employees() -> Vec<Employee> {
    EMPLOYEES
        .iter()
        .map(|(id, name, department, role)| Employee {
            id: id.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            role: role.to_string(),
        })
        .collect()
}

/// Mock book with the last `SEED_DAYS` days before `today` filled in.
/// Statuses follow a fixed per-employee pattern so reloads are stable.
pub fn seed_book(today: NaiveDate) -> AttendanceBook {
    let mut book = AttendanceBook::default();
    let employees = employees();

    for (index, employee) in employees.iter().enumerate() {
        for offset in 1..=SEED_DAYS {
            let date = today - Duration::days(offset);
            book.set_status(&employee.id, date, seeded_status(index, date));
        }
    }

    book.employees = employees;
    book
}

fn seeded_status(employee_index: usize, date: NaiveDate) -> AttendanceStatus {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return AttendanceStatus::Weekend;
    }

    let n = date.ordinal() as usize + employee_index * 3;
    if n % 17 == 0 {
        AttendanceStatus::Absent
    } else if n % 7 == 0 {
        AttendanceStatus::Late
    } else if n % 23 == 0 || n % 23 == 1 {
        AttendanceStatus::Leave
    } else {
        AttendanceStatus::Present
    }
}
