use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::ContentId;

/// One finished quiz, as reported by the quiz controller's finish event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub content_id: ContentId,
    pub topic: String,
    pub score: u32,
    pub total: u32,
    pub completed_at: DateTime<Utc>,
}

impl QuizAttempt {
    #[must_use]
    pub fn new(
        content_id: ContentId,
        topic: impl Into<String>,
        score: u32,
        total: u32,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content_id,
            topic: topic.into(),
            score: score.min(total),
            total,
            completed_at,
        }
    }

    /// Share of correct answers in `0.0..=100.0`. An empty quiz counts as zero.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total) * 100.0
    }
}

/// Aggregated mastery across a list of attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub attempts: usize,
    /// Mean of per-attempt percentages, rounded to a whole number.
    pub average_percent: u32,
    pub best_percent: u32,
}

impl ProgressReport {
    #[must_use]
    pub fn from_attempts(attempts: &[QuizAttempt]) -> Self {
        if attempts.is_empty() {
            return Self {
                attempts: 0,
                average_percent: 0,
                best_percent: 0,
            };
        }

        let sum: f64 = attempts.iter().map(QuizAttempt::percent).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = sum / attempts.len() as f64;
        let best = attempts
            .iter()
            .map(QuizAttempt::percent)
            .fold(0.0_f64, f64::max);

        Self {
            attempts: attempts.len(),
            average_percent: to_whole_percent(average),
            best_percent: to_whole_percent(best),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_whole_percent(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn attempt(score: u32, total: u32) -> QuizAttempt {
        QuizAttempt::new(ContentId::random(), "Topic", score, total, fixed_now())
    }

    #[test]
    fn percent_handles_empty_quiz() {
        assert!((attempt(0, 0).percent() - 0.0).abs() < f64::EPSILON);
        assert!((attempt(3, 4).percent() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_is_clamped_to_total() {
        assert_eq!(attempt(9, 5).score, 5);
    }

    #[test]
    fn report_averages_and_rounds() {
        let report = ProgressReport::from_attempts(&[attempt(2, 3), attempt(5, 5)]);
        assert_eq!(report.attempts, 2);
        // (66.67 + 100) / 2 = 83.33
        assert_eq!(report.average_percent, 83);
        assert_eq!(report.best_percent, 100);
    }

    #[test]
    fn empty_report_is_zero() {
        let report = ProgressReport::from_attempts(&[]);
        assert_eq!(report.attempts, 0);
        assert_eq!(report.average_percent, 0);
    }
}
