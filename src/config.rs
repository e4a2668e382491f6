use crate::checkin::CheckInPolicy;
use chrono::NaiveTime;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub recognition_latency: Duration,
    pub recognition_confidence: f32,
    pub check_in: CheckInPolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup` so tests can supply their own values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "PORT", 8080, |v| v.parse::<u16>().ok())?;
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/attendance.json"));
        let latency_ms =
            parse_or(&lookup, "RECOGNITION_LATENCY_MS", 1500, |v| v.parse::<u64>().ok())?;
        let late_after = parse_or(
            &lookup,
            "LATE_AFTER",
            NaiveTime::from_hms_opt(9, 15, 0).unwrap_or_default(),
            |v| NaiveTime::parse_from_str(v, "%H:%M").ok(),
        )?;
        let min_confidence =
            parse_or(&lookup, "RECOGNITION_MIN_CONFIDENCE", 0.8, parse_confidence)?;
        let recognition_confidence =
            parse_or(&lookup, "RECOGNITION_CONFIDENCE", 0.97, parse_confidence)?;

        Ok(Self {
            port,
            data_path,
            recognition_latency: Duration::from_millis(latency_ms),
            recognition_confidence,
            check_in: CheckInPolicy {
                late_after,
                min_confidence,
            },
        })
    }
}

fn parse_confidence(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|c| (0.0..=1.0).contains(c))
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/attendance.json"));
        assert_eq!(config.recognition_latency, Duration::from_millis(1500));
        assert_eq!(config.recognition_confidence, 0.97);
        assert_eq!(config.check_in.late_after, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }

    #[test]
    fn values_are_read_from_environment() {
        let config = config(&[
            ("PORT", "3000"),
            ("APP_DATA_PATH", "/tmp/book.json"),
            ("RECOGNITION_LATENCY_MS", "0"),
            ("LATE_AFTER", "08:45"),
            ("RECOGNITION_CONFIDENCE", "0.5"),
        ])
        .unwrap();
        assert_eq!(config.recognition_confidence, 0.5);
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/book.json"));
        assert!(config.recognition_latency.is_zero());
        assert_eq!(config.check_in.late_after, NaiveTime::from_hms_opt(8, 45, 0).unwrap());
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(config(&[("LATE_AFTER", "quarter past nine")]).is_err());
        assert!(config(&[("RECOGNITION_MIN_CONFIDENCE", "1.5")]).is_err());
        assert!(config(&[("RECOGNITION_CONFIDENCE", "-0.1")]).is_err());
        assert!(config(&[("PORT", "eighty")]).is_err());
    }
}
