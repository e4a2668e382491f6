use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("month must be between 0 and 11, got {0}")]
    InvalidMonth(i64),
    #[error("year must be between 1 and 9999, got {0}")]
    InvalidYear(i64),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Leave,
    Weekend,
    #[default]
    Unknown,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 6] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Leave,
        AttendanceStatus::Weekend,
        AttendanceStatus::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Leave => "leave",
            AttendanceStatus::Weekend => "weekend",
            AttendanceStatus::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Leave => "On leave",
            AttendanceStatus::Weekend => "Weekend",
            AttendanceStatus::Unknown => "No record",
        }
    }

    pub fn is_working_day(self) -> bool {
        !matches!(self, AttendanceStatus::Weekend | AttendanceStatus::Unknown)
    }

    pub fn is_attended(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

/// Day-of-month to status. Days without an entry render as `Unknown`.
pub type MonthAttendance = BTreeMap<u32, AttendanceStatus>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell {
    Blank,
    Day { day: u32, status: AttendanceStatus },
}

impl CalendarCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day { day, .. } => Some(*day),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub leave: u32,
    pub weekend: u32,
    pub unknown: u32,
    pub working_days: u32,
    pub attended_days: u32,
    pub total_days: u32,
}

impl MonthlySummary {
    fn record(&mut self, status: AttendanceStatus) {
        let slot = match status {
            AttendanceStatus::Present => &mut self.present,
            AttendanceStatus::Absent => &mut self.absent,
            AttendanceStatus::Late => &mut self.late,
            AttendanceStatus::Leave => &mut self.leave,
            AttendanceStatus::Weekend => &mut self.weekend,
            AttendanceStatus::Unknown => &mut self.unknown,
        };
        *slot += 1;

        if status.is_working_day() {
            self.working_days += 1;
        }
        if status.is_attended() {
            self.attended_days += 1;
        }
        self.total_days += 1;
    }

    pub fn count(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Late => self.late,
            AttendanceStatus::Leave => self.leave,
            AttendanceStatus::Weekend => self.weekend,
            AttendanceStatus::Unknown => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cells: Vec<CalendarCell>,
    pub summary: MonthlySummary,
}

/// Builds the month grid for a zero-based `month`: blank padding up to the
/// weekday of the 1st (Sunday first), then one cell per day.
pub fn build(
    year: i32,
    month: u32,
    attendance: &MonthAttendance,
) -> Result<MonthGrid, CalendarError> {
    let leading = first_weekday_of_month(year, month)?;
    let days = days_in_month(year, month)?;

    let mut cells = Vec::with_capacity((leading + days) as usize);
    cells.extend((0..leading).map(|_| CalendarCell::Blank));

    let mut summary = MonthlySummary::default();
    for day in 1..=days {
        let status = attendance.get(&day).copied().unwrap_or_default();
        summary.record(status);
        cells.push(CalendarCell::Day { day, status });
    }

    Ok(MonthGrid { cells, summary })
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month)?;
    let next = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    }
    .ok_or(CalendarError::InvalidYear(i64::from(year)))?;

    Ok((next - first).num_days() as u32)
}

/// Weekday of the 1st, 0 = Sunday through 6 = Saturday.
pub fn first_weekday_of_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_sunday())
}

pub fn month_name(month: u32) -> Result<&'static str, CalendarError> {
    MONTH_NAMES
        .get(month as usize)
        .copied()
        .ok_or(CalendarError::InvalidMonth(i64::from(month)))
}

pub fn validate(year: i64, month: i64) -> Result<(i32, u32), CalendarError> {
    if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
        return Err(CalendarError::InvalidYear(year));
    }
    if !(0..12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    Ok((year as i32, month as u32))
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    let (year, month) = validate(i64::from(year), i64::from(month))?;
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(CalendarError::InvalidYear(i64::from(year)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        let (year, month) = validate(i64::from(year), i64::from(month))?;
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn next(self) -> Result<Self, CalendarError> {
        if self.month == 11 {
            Self::new(self.year + 1, 0)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn prev(self) -> Result<Self, CalendarError> {
        if self.month == 0 {
            Self::new(self.year - 1, 11)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }
}
