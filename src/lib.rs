pub mod app;
pub mod calendar;
pub mod checkin;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod recognition;
pub mod roster;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use calendar::{AttendanceStatus, CalendarCell, MonthAttendance, MonthCursor, MonthlySummary};
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{load_book, persist_book};
