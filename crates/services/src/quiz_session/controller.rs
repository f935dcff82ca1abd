use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use study_core::model::{OptionIndex, QuizQuestion};
use study_core::script::{feedback_script, question_script};
use study_core::{Advance, Quiz, QuizError, QuizScore, Selection};

use crate::config::NarrationTimings;
use crate::narration::{NarrationCoordinator, Narrator};

use super::progress::QuizProgress;

/// Outcome of moving on from a question or leaving the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// The next question is now presented.
    Advanced { index: usize },
    /// The last question was passed. Emitted once per session.
    Finished { score: u32, total: u32 },
    /// The user left the session early (or after finishing).
    Exited { answered: usize, total: usize },
}

impl From<QuizScore> for QuizEvent {
    fn from(score: QuizScore) -> Self {
        Self::Finished {
            score: score.score,
            total: score.total,
        }
    }
}

//
// ─── CONTROLLER ───────────────────────────────────────────────────────────────
//

/// Drives one quiz attempt and its optional narration.
///
/// Pointer clicks and number keys both end up in [`select`](Self::select), so the two
/// input paths cannot diverge. Narration runs in the background and never blocks or
/// fails an answer.
#[derive(Debug)]
pub struct QuizSessionController {
    quiz: Quiz,
    narration_mode: bool,
    narration: NarrationCoordinator,
    timings: NarrationTimings,
}

impl QuizSessionController {
    /// Start presenting the first question. In narration mode it is read aloud.
    ///
    /// Must be called from within a Tokio runtime when `narration_mode` is on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when there are no questions.
    pub fn start(
        questions: Vec<QuizQuestion>,
        narration_mode: bool,
        narrator: Arc<dyn Narrator>,
        timings: NarrationTimings,
    ) -> Result<Self, QuizError> {
        let quiz = Quiz::new(questions)?;
        debug!(total = quiz.total(), narration_mode, "quiz session started");

        let mut controller = Self {
            quiz,
            narration_mode,
            narration: NarrationCoordinator::new(narrator),
            timings,
        };
        controller.narrate_current();
        Ok(controller)
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress::of(&self.quiz)
    }

    #[must_use]
    pub fn narration_mode(&self) -> bool {
        self.narration_mode
    }

    #[must_use]
    pub fn is_narrating(&self) -> bool {
        self.narration.is_speaking()
    }

    #[must_use]
    pub fn subscribe_narration(&self) -> watch::Receiver<bool> {
        self.narration.subscribe()
    }

    /// Answer the current question with a 0-based option index.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OptionOutOfRange`, `QuizError::AlreadyAnswered` or
    /// `QuizError::Completed`. State and score are unchanged on error.
    pub fn select(&mut self, index: usize) -> Result<Selection, QuizError> {
        let selection = self.quiz.select_raw(index).inspect_err(|err| {
            debug!(index, error = %err, "selection rejected");
        })?;

        if self.narration_mode {
            let question = &self.quiz.questions()[selection.index];
            self.narration
                .announce(feedback_script(question, selection.correct));
        }
        Ok(selection)
    }

    /// Keyboard entry point: "1".."4" answer while a question is presented, every other
    /// key (and any key outside the presenting state) is ignored.
    pub fn press_key(&mut self, key: &str) -> Option<Selection> {
        let option = OptionIndex::from_key(key)?;
        if !self.quiz.is_presenting() {
            return None;
        }
        self.select(option.value()).ok()
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` before an answer and `QuizError::Completed` once
    /// the quiz has finished, so `Finished` cannot be reported twice.
    pub fn advance(&mut self) -> Result<QuizEvent, QuizError> {
        match self.quiz.advance()? {
            Advance::Next { index } => {
                self.narrate_current();
                Ok(QuizEvent::Advanced { index })
            }
            Advance::Finished(score) => {
                info!(score = score.score, total = score.total, "quiz finished");
                Ok(score.into())
            }
        }
    }

    /// Read the current question again. Returns `false` when nothing was requested,
    /// either because the quiz is over or narration is still active.
    pub fn replay_question(&mut self) -> bool {
        if self.quiz.is_complete() {
            return false;
        }
        let index = self.quiz.current_index();
        let script = question_script(index, self.quiz.current_question());
        self.narration.request(script, self.timings.question_fallback)
    }

    /// Toggle narration. Turning it on reads the current question; turning it off
    /// silences anything in flight.
    pub fn set_narration_mode(&mut self, enabled: bool) {
        if self.narration_mode == enabled {
            return;
        }
        self.narration_mode = enabled;
        if enabled {
            self.narrate_current();
        } else {
            self.narration.cancel();
        }
    }

    /// Leave the session. Pending narration is cancelled; nothing is recorded.
    #[must_use]
    pub fn exit(mut self) -> QuizEvent {
        self.narration.cancel();
        let event = QuizEvent::Exited {
            answered: self.quiz.answered(),
            total: self.quiz.total(),
        };
        debug!(?event, "quiz session exited");
        event
    }

    fn narrate_current(&mut self) {
        if self.narration_mode {
            self.replay_question();
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
