use crate::checkin::CheckInPolicy;
use crate::models::AttendanceBook;
use crate::recognition::RecognitionService;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub book: Arc<Mutex<AttendanceBook>>,
    pub recognizer: Arc<dyn RecognitionService>,
    pub check_in: CheckInPolicy,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        book: AttendanceBook,
        recognizer: Arc<dyn RecognitionService>,
        check_in: CheckInPolicy,
    ) -> Self {
        Self {
            data_path,
            book: Arc::new(Mutex::new(book)),
            recognizer,
            check_in,
        }
    }
}
