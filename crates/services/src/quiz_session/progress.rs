use study_core::Quiz;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn of(quiz: &Quiz) -> Self {
        let total = quiz.total();
        let answered = quiz.answered();
        Self {
            position: quiz.current_index() + 1,
            total,
            answered,
            remaining: total - answered,
            score: quiz.score(),
            is_complete: quiz.is_complete(),
        }
    }

    /// Share of answered questions in `0.0..=1.0`, for progress bars.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.answered as f64 / self.total as f64;
        fraction
    }
}
