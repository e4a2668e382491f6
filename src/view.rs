use crate::calendar::{CalendarError, MonthCursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Calendar,
    Records,
}

impl DashboardTab {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "calendar" => Some(DashboardTab::Calendar),
            "records" => Some(DashboardTab::Records),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DashboardTab::Calendar => "calendar",
            DashboardTab::Records => "records",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SelectTab(DashboardTab),
    SelectEmployee(String),
    PrevMonth,
    NextMonth,
}

/// What the dashboard page shows. Requests rebuild it from the query string
/// and replay navigation as events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub tab: DashboardTab,
    pub cursor: MonthCursor,
    pub employee_id: String,
}

impl ViewState {
    pub fn new(employee_id: impl Into<String>, cursor: MonthCursor) -> Self {
        Self {
            tab: DashboardTab::default(),
            cursor,
            employee_id: employee_id.into(),
        }
    }

    pub fn apply(&mut self, event: ViewEvent) -> Result<(), CalendarError> {
        match event {
            ViewEvent::SelectTab(tab) => self.tab = tab,
            ViewEvent::SelectEmployee(id) => self.employee_id = id,
            ViewEvent::PrevMonth => self.cursor = self.cursor.prev()?,
            ViewEvent::NextMonth => self.cursor = self.cursor.next()?,
        }
        Ok(())
    }

    pub fn query(&self) -> String {
        format!(
            "employee={}&year={}&month={}&tab={}",
            self.employee_id,
            self.cursor.year,
            self.cursor.month,
            self.tab.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_update_state() {
        let mut view = ViewState::new("EMP-001", MonthCursor::new(2025, 0).unwrap());
        view.apply(ViewEvent::PrevMonth).unwrap();
        view.apply(ViewEvent::SelectTab(DashboardTab::Records)).unwrap();
        view.apply(ViewEvent::SelectEmployee("EMP-002".into())).unwrap();

        assert_eq!(view.cursor, MonthCursor { year: 2024, month: 11 });
        assert_eq!(view.tab, DashboardTab::Records);
        assert_eq!(view.query(), "employee=EMP-002&year=2024&month=11&tab=records");
    }

    #[test]
    fn failed_navigation_leaves_cursor() {
        let start = MonthCursor::new(9999, 11).unwrap();
        let mut view = ViewState::new("EMP-001", start);
        assert!(view.apply(ViewEvent::NextMonth).is_err());
        assert_eq!(view.cursor, start);
    }

    #[test]
    fn tabs_parse_known_names() {
        assert_eq!(DashboardTab::parse("records"), Some(DashboardTab::Records));
        assert_eq!(DashboardTab::parse("calendar"), Some(DashboardTab::Calendar));
        assert_eq!(DashboardTab::parse("camera"), None);
    }
}
