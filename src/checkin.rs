use crate::calendar::AttendanceStatus;
use crate::models::AttendanceBook;
use crate::recognition::RecognitionOutcome;
use chrono::{NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, PartialEq)]
pub enum CheckInPhase {
    Idle,
    CameraActive,
    Recognizing,
    Verified {
        employee_id: String,
        status: AttendanceStatus,
        at: NaiveDateTime,
    },
    Rejected {
        reason: String,
    },
}

impl CheckInPhase {
    pub fn name(&self) -> &'static str {
        match self {
            CheckInPhase::Idle => "idle",
            CheckInPhase::CameraActive => "camera_active",
            CheckInPhase::Recognizing => "recognizing",
            CheckInPhase::Verified { .. } => "verified",
            CheckInPhase::Rejected { .. } => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckInEvent {
    StartCamera,
    Capture,
    Recognized {
        outcome: RecognitionOutcome,
        at: NaiveDateTime,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckInError {
    #[error("cannot apply {event} while {phase}")]
    InvalidTransition {
        phase: &'static str,
        event: &'static str,
    },
    #[error("{reason}")]
    Rejected { reason: String },
    #[error("check-in stopped while {phase}")]
    Incomplete { phase: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCheckIn {
    pub employee_id: String,
    pub status: AttendanceStatus,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckInPolicy {
    pub late_after: NaiveTime,
    pub min_confidence: f32,
}

impl CheckInPolicy {
    pub fn status_at(&self, at: NaiveDateTime) -> AttendanceStatus {
        if at.time() > self.late_after {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckInSession {
    policy: CheckInPolicy,
    phase: CheckInPhase,
}

impl CheckInSession {
    pub fn new(policy: CheckInPolicy) -> Self {
        Self {
            policy,
            phase: CheckInPhase::Idle,
        }
    }

    pub fn phase(&self) -> &CheckInPhase {
        &self.phase
    }

    /// Applies `event`; on error the current phase is kept.
    pub fn apply(&mut self, event: CheckInEvent) -> Result<&CheckInPhase, CheckInError> {
        let next = match (&self.phase, event) {
            (_, CheckInEvent::Reset) => CheckInPhase::Idle,
            (CheckInPhase::Idle, CheckInEvent::StartCamera) => CheckInPhase::CameraActive,
            (CheckInPhase::CameraActive, CheckInEvent::Capture) => CheckInPhase::Recognizing,
            (CheckInPhase::Recognizing, CheckInEvent::Recognized { outcome, at }) => match outcome {
                RecognitionOutcome::Matched {
                    employee_id,
                    confidence,
                } if confidence >= self.policy.min_confidence => CheckInPhase::Verified {
                    employee_id,
                    status: self.policy.status_at(at),
                    at,
                },
                RecognitionOutcome::Matched { confidence, .. } => CheckInPhase::Rejected {
                    reason: format!("match confidence {confidence:.2} is below threshold"),
                },
                RecognitionOutcome::NoMatch => CheckInPhase::Rejected {
                    reason: "face not recognized".to_string(),
                },
            },
            (phase, event) => {
                return Err(CheckInError::InvalidTransition {
                    phase: phase.name(),
                    event: event_name(&event),
                })
            }
        };

        self.phase = next;
        Ok(&self.phase)
    }

    pub fn verified(&self) -> Result<VerifiedCheckIn, CheckInError> {
        match &self.phase {
            CheckInPhase::Verified {
                employee_id,
                status,
                at,
            } => Ok(VerifiedCheckIn {
                employee_id: employee_id.clone(),
                status: *status,
                at: *at,
            }),
            CheckInPhase::Rejected { reason } => Err(CheckInError::Rejected {
                reason: reason.clone(),
            }),
            other => Err(CheckInError::Incomplete {
                phase: other.name(),
            }),
        }
    }
}

fn event_name(event: &CheckInEvent) -> &'static str {
    match event {
        CheckInEvent::StartCamera => "start_camera",
        CheckInEvent::Capture => "capture",
        CheckInEvent::Recognized { .. } => "recognized",
        CheckInEvent::Reset => "reset",
    }
}

/// Writes the day's status for a verified check-in. An earlier present/late
/// entry for the same day wins over a later check-in.
pub fn record_check_in(
    book: &mut AttendanceBook,
    employee_id: &str,
    status: AttendanceStatus,
    at: NaiveDateTime,
) -> AttendanceStatus {
    let date = at.date();
    match book.status_on(employee_id, date) {
        Some(existing) if existing.is_attended() => existing,
        _ => {
            book.set_status(employee_id, date, status);
            status
        }
    }
}
