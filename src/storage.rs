use crate::errors::AppError;
use crate::models::AttendanceBook;
use crate::roster::seed_book;
use chrono::NaiveDate;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Reads the book at `path`, falling back to the mock seed when the file is
/// missing or unreadable.
pub async fn load_book(path: &Path, today: NaiveDate) -> AttendanceBook {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AttendanceBook>(&bytes) {
            Ok(book) => book,
            Err(err) => {
                error!("failed to parse data file: {err}");
                seed_book(today)
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no data file at {}, using seeded attendance", path.display());
            seed_book(today)
        }
        Err(err) => {
            error!("failed to read data file: {err}");
            seed_book(today)
        }
    }
}

pub async fn persist_book(path: &Path, book: &AttendanceBook) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(book).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::AttendanceStatus;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("attendance_{name}_{}_{nanos}.json", std::process::id()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 19).unwrap()
    }

    #[tokio::test]
    async fn missing_file_yields_seed() {
        let book = load_book(&temp_path("missing"), today()).await;
        assert_eq!(book.records, seed_book(today()).records);
    }

    #[tokio::test]
    async fn corrupt_file_yields_seed() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{ not json").await.unwrap();
        let book = load_book(&path, today()).await;
        assert_eq!(book.employees.len(), 5);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_book_reloads() {
        let path = temp_path("persist");
        let mut book = seed_book(today());
        book.set_status("EMP-003", today(), AttendanceStatus::Late);
        persist_book(&path, &book).await.unwrap();

        let reloaded = load_book(&path, today()).await;
        assert_eq!(reloaded.status_on("EMP-003", today()), Some(AttendanceStatus::Late));
        assert_eq!(reloaded.employees, book.employees);
        let _ = fs::remove_file(&path).await;
    }
}
