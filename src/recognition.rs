use async_trait::async_trait;
use std::{collections::HashSet, time::Duration};
use tokio::time::sleep;
use tracing::info;

/// A frame handed to the recognizer. The simulated service reads the
/// employee the kiosk operator selected instead of real pixels.
#[derive(Debug, Clone)]
pub struct Capture {
    pub claimed_employee_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    Matched { employee_id: String, confidence: f32 },
    NoMatch,
}

#[async_trait]
pub trait RecognitionService: Send + Sync {
    async fn recognize(&self, capture: Capture) -> RecognitionOutcome;
}

pub struct SimulatedRecognizer {
    latency: Duration,
    confidence: f32,
    enrolled: HashSet<String>,
}

impl SimulatedRecognizer {
    pub fn new(latency: Duration, enrolled: impl IntoIterator<Item = String>) -> Self {
        Self {
            latency,
            confidence: 0.97,
            enrolled: enrolled.into_iter().collect(),
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

#[async_trait]
impl RecognitionService for SimulatedRecognizer {
    async fn recognize(&self, capture: Capture) -> RecognitionOutcome {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        if self.enrolled.contains(&capture.claimed_employee_id) {
            info!(employee = %capture.claimed_employee_id, "face matched");
            RecognitionOutcome::Matched {
                employee_id: capture.claimed_employee_id,
                confidence: self.confidence,
            }
        } else {
            info!(employee = %capture.claimed_employee_id, "no face match");
            RecognitionOutcome::NoMatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(id: &str) -> Capture {
        Capture {
            claimed_employee_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn enrolled_employee_is_matched() {
        let recognizer = SimulatedRecognizer::new(Duration::ZERO, ["EMP-001".to_string()]);
        let outcome = recognizer.recognize(capture("EMP-001")).await;
        assert_eq!(
            outcome,
            RecognitionOutcome::Matched {
                employee_id: "EMP-001".into(),
                confidence: 0.97
            }
        );
    }

    #[tokio::test]
    async fn unknown_face_is_not_matched() {
        let recognizer = SimulatedRecognizer::new(Duration::ZERO, ["EMP-001".to_string()]);
        assert_eq!(recognizer.recognize(capture("EMP-404")).await, RecognitionOutcome::NoMatch);
    }

    #[tokio::test]
    async fn configured_confidence_is_reported() {
        let recognizer = SimulatedRecognizer::new(Duration::ZERO, ["EMP-002".to_string()])
            .with_confidence(0.4);
        assert_eq!(
            recognizer.recognize(capture("EMP-002")).await,
            RecognitionOutcome::Matched {
                employee_id: "EMP-002".into(),
                confidence: 0.4
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn answer_arrives_after_latency() {
        let recognizer = SimulatedRecognizer::new(Duration::from_secs(2), ["EMP-001".to_string()]);
        let started = tokio::time::Instant::now();
        recognizer.recognize(capture("EMP-001")).await;
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
