use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule topic must not be empty")]
    EmptyTopic,
    #[error("a schedule needs at least one week")]
    NoWeeks,
}

/// One week of a generated teaching plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingWeek {
    pub week: String,
    pub topic: String,
    pub objectives: Vec<String>,
    pub activities: Vec<String>,
}

impl TeachingWeek {
    /// Check the inputs of a schedule request before anything is sent upstream.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError` for a blank topic or zero weeks.
    pub fn validate_request(topic: &str, weeks: u32) -> Result<(), ScheduleError> {
        if topic.trim().is_empty() {
            return Err(ScheduleError::EmptyTopic);
        }
        if weeks == 0 {
            return Err(ScheduleError::NoWeeks);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validation() {
        assert_eq!(
            TeachingWeek::validate_request(" ", 3),
            Err(ScheduleError::EmptyTopic)
        );
        assert_eq!(
            TeachingWeek::validate_request("Algebra", 0),
            Err(ScheduleError::NoWeeks)
        );
        assert!(TeachingWeek::validate_request("Algebra", 4).is_ok());
    }
}
