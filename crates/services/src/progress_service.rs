use std::sync::Arc;

use storage::ProgressRepository;
use study_core::Clock;
use study_core::model::{LearningContent, ProgressReport, QuizAttempt};
use tracing::info;

use crate::error::ProgressError;

/// Records finished quizzes and summarizes mastery.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    attempts: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, attempts: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, attempts }
    }

    /// Store the result of a finished quiz over `content`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::EmptyQuiz` when `total` is zero, or storage errors.
    pub async fn record_finish(
        &self,
        content: &LearningContent,
        score: u32,
        total: u32,
    ) -> Result<QuizAttempt, ProgressError> {
        if total == 0 {
            return Err(ProgressError::EmptyQuiz);
        }
        let attempt = QuizAttempt::new(
            content.id(),
            content.title(),
            score,
            total,
            self.clock.now(),
        );
        self.attempts.append_attempt(&attempt).await?;
        info!(content = %attempt.content_id, score, total, "quiz attempt recorded");
        Ok(attempt)
    }

    /// Most recent attempts first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn history(&self, limit: usize) -> Result<Vec<QuizAttempt>, ProgressError> {
        Ok(self.attempts.list_attempts(limit).await?)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn report(&self, limit: usize) -> Result<ProgressReport, ProgressError> {
        let attempts = self.history(limit).await?;
        Ok(ProgressReport::from_attempts(&attempts))
    }
}
