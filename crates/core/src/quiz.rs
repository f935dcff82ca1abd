//! Quiz session state machine.
//!
//! A quiz walks a fixed, ordered list of questions. Each question is first presented,
//! then answered (which reveals feedback), then advanced past. Advancing past the last
//! question completes the quiz and yields the final score exactly once.
//!
//! The transition function [`QuizState::on`] is pure: it takes the current state, an
//! input and the question list, and returns the next state or a guard error. Nothing is
//! mutated when a guard fails.

use thiserror::Error;

use crate::model::{OptionIndex, QuizQuestion};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("quiz has too many questions: {len}")]
    TooManyQuestions { len: usize },

    #[error("option {index} is out of range")]
    OptionOutOfRange { index: usize },

    #[error("question {index} was already answered")]
    AlreadyAnswered { index: usize },

    #[error("question {index} has not been answered yet")]
    NotAnswered { index: usize },

    #[error("quiz already completed")]
    Completed,
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// Where the learner is in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Question `index` is shown and has not been answered.
    Presenting { index: usize },
    /// Question `index` was answered with `selected`; correctness is revealed.
    Feedback {
        index: usize,
        selected: OptionIndex,
        correct: bool,
    },
    /// Terminal. Every question was answered.
    Completed { score: u32, total: u32 },
}

/// Events that drive the state machine. Keyboard and pointer input both become `Select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    Select(OptionIndex),
    Advance,
}

impl QuizState {
    /// Compute the next state and running score for `input`.
    ///
    /// # Errors
    ///
    /// - `QuizError::AlreadyAnswered` when selecting during feedback.
    /// - `QuizError::NotAnswered` when advancing before an answer was chosen.
    /// - `QuizError::Completed` for any input after completion.
    pub fn on(
        self,
        input: QuizInput,
        questions: &[QuizQuestion],
        score: u32,
    ) -> Result<(Self, u32), QuizError> {
        match (self, input) {
            (Self::Completed { .. }, _) => Err(QuizError::Completed),

            (Self::Presenting { index }, QuizInput::Select(selected)) => {
                let question = questions.get(index).ok_or(QuizError::Completed)?;
                let correct = question.is_correct(selected);
                let score = if correct { score + 1 } else { score };
                Ok((
                    Self::Feedback {
                        index,
                        selected,
                        correct,
                    },
                    score,
                ))
            }
            (Self::Presenting { index }, QuizInput::Advance) => {
                Err(QuizError::NotAnswered { index })
            }

            (Self::Feedback { index, .. }, QuizInput::Select(_)) => {
                Err(QuizError::AlreadyAnswered { index })
            }
            (Self::Feedback { index, .. }, QuizInput::Advance) => {
                let next = index + 1;
                if next < questions.len() {
                    Ok((Self::Presenting { index: next }, score))
                } else {
                    let total = u32::try_from(questions.len())
                        .map_err(|_| QuizError::TooManyQuestions {
                            len: questions.len(),
                        })?;
                    Ok((Self::Completed { score, total }, score))
                }
            }
        }
    }
}

//
// ─── OUTCOMES ─────────────────────────────────────────────────────────────────
//

/// Final tally handed to the caller when the quiz completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub score: u32,
    pub total: u32,
}

/// Result of a successful answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub selected: OptionIndex,
    pub correct: bool,
    /// Running score after this answer.
    pub score: u32,
}

/// Result of a successful advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished(QuizScore),
}

//
// ─── QUIZ ─────────────────────────────────────────────────────────────────────
//

/// One attempt at a fixed list of questions.
#[derive(Debug, Clone)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    state: QuizState,
    score: u32,
}

impl Quiz {
    /// Start a quiz presenting the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `questions` is empty.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        if u32::try_from(questions.len()).is_err() {
            return Err(QuizError::TooManyQuestions {
                len: questions.len(),
            });
        }
        Ok(Self {
            questions,
            state: QuizState::Presenting { index: 0 },
            score: 0,
        })
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Number of questions in this attempt.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Index of the question on screen. Stays on the last question once completed.
    #[must_use]
    pub fn current_index(&self) -> usize {
        match self.state {
            QuizState::Presenting { index } | QuizState::Feedback { index, .. } => index,
            QuizState::Completed { .. } => self.questions.len() - 1,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_index()]
    }

    /// The chosen option while feedback is visible.
    #[must_use]
    pub fn selected(&self) -> Option<OptionIndex> {
        match self.state {
            QuizState::Feedback { selected, .. } => Some(selected),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        matches!(self.state, QuizState::Presenting { .. })
    }

    #[must_use]
    pub fn feedback_visible(&self) -> bool {
        matches!(self.state, QuizState::Feedback { .. })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state, QuizState::Completed { .. })
    }

    /// Number of questions answered so far.
    #[must_use]
    pub fn answered(&self) -> usize {
        match self.state {
            QuizState::Presenting { index } => index,
            QuizState::Feedback { index, .. } => index + 1,
            QuizState::Completed { .. } => self.questions.len(),
        }
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyAnswered` or `QuizError::Completed`; state is unchanged.
    pub fn select(&mut self, selected: OptionIndex) -> Result<Selection, QuizError> {
        self.apply(QuizInput::Select(selected))?;
        Ok(Selection {
            index: self.current_index(),
            selected,
            correct: matches!(self.state, QuizState::Feedback { correct: true, .. }),
            score: self.score,
        })
    }

    /// Answer with an unchecked option index, as received from an input surface.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OptionOutOfRange` for indices outside `0..4`, otherwise the
    /// same errors as [`Quiz::select`]. State is unchanged on error.
    pub fn select_raw(&mut self, index: usize) -> Result<Selection, QuizError> {
        let selected =
            OptionIndex::new(index).map_err(|_| QuizError::OptionOutOfRange { index })?;
        self.select(selected)
    }

    /// Map a key press to an answer. Keys other than "1".."4", and any key while
    /// feedback is shown or after completion, are ignored.
    pub fn press_key(&mut self, key: &str) -> Option<Selection> {
        let selected = OptionIndex::from_key(key)?;
        self.select(selected).ok()
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` before an answer, `QuizError::Completed` after
    /// the quiz has already finished.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        self.apply(QuizInput::Advance)?;
        Ok(match self.state {
            QuizState::Completed { score, total } => Advance::Finished(QuizScore { score, total }),
            _ => Advance::Next {
                index: self.current_index(),
            },
        })
    }

    fn apply(&mut self, input: QuizInput) -> Result<(), QuizError> {
        let (state, score) = self.state.on(input, &self.questions, self.score)?;
        self.state = state;
        self.score = score;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion::new(
            format!("Q{correct}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
            "why",
        )
        .unwrap()
    }

    fn quiz(correct: &[usize]) -> Quiz {
        Quiz::new(correct.iter().copied().map(question).collect()).unwrap()
    }

    fn opt(i: usize) -> OptionIndex {
        OptionIndex::new(i).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert_eq!(Quiz::new(Vec::new()).unwrap_err(), QuizError::Empty);
    }

    #[test]
    fn starts_presenting_first_question() {
        let quiz = quiz(&[0, 1]);
        assert_eq!(quiz.state(), QuizState::Presenting { index: 0 });
        assert_eq!(quiz.selected(), None);
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn three_question_walkthrough_scores_two() {
        let mut quiz = quiz(&[0, 1, 2]);

        let first = quiz.select(opt(0)).unwrap();
        assert!(first.correct);
        assert_eq!(quiz.advance().unwrap(), Advance::Next { index: 1 });

        let second = quiz.select(opt(3)).unwrap();
        assert!(!second.correct);
        assert_eq!(
            quiz.state(),
            QuizState::Feedback {
                index: 1,
                selected: opt(3),
                correct: false
            }
        );
        assert_eq!(quiz.advance().unwrap(), Advance::Next { index: 2 });

        let third = quiz.select(opt(2)).unwrap();
        assert!(third.correct);
        assert_eq!(
            quiz.advance().unwrap(),
            Advance::Finished(QuizScore { score: 2, total: 3 })
        );
        assert!(quiz.is_complete());
        assert_eq!(quiz.current_index(), 2);
    }

    #[test]
    fn finish_is_reported_once() {
        let mut quiz = quiz(&[1]);
        quiz.select(opt(0)).unwrap();
        assert!(matches!(quiz.advance().unwrap(), Advance::Finished(_)));
        assert_eq!(quiz.advance().unwrap_err(), QuizError::Completed);
        assert_eq!(quiz.select(opt(1)).unwrap_err(), QuizError::Completed);
    }

    #[test]
    fn second_select_is_rejected_without_changes() {
        let mut quiz = quiz(&[2, 0]);
        quiz.select(opt(2)).unwrap();
        let before = quiz.state();

        let err = quiz.select(opt(1)).unwrap_err();
        assert_eq!(err, QuizError::AlreadyAnswered { index: 0 });
        assert_eq!(quiz.state(), before);
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn out_of_range_select_is_rejected() {
        let mut quiz = quiz(&[0, 1]);
        let err = quiz.select_raw(5).unwrap_err();
        assert_eq!(err, QuizError::OptionOutOfRange { index: 5 });
        assert_eq!(quiz.state(), QuizState::Presenting { index: 0 });
        assert_eq!(quiz.selected(), None);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut quiz = quiz(&[0, 1]);
        assert_eq!(quiz.advance().unwrap_err(), QuizError::NotAnswered { index: 0 });
        assert_eq!(quiz.state(), QuizState::Presenting { index: 0 });
    }

    #[test]
    fn key_press_matches_programmatic_select() {
        let mut by_key = quiz(&[1, 3]);
        let mut by_call = quiz(&[1, 3]);

        let from_key = by_key.press_key("2").unwrap();
        let from_call = by_call.select(opt(1)).unwrap();
        assert_eq!(from_key, from_call);
        assert_eq!(by_key.state(), by_call.state());
        assert_eq!(by_key.score(), by_call.score());
    }

    #[test]
    fn repeated_keys_are_ignored_during_feedback() {
        let mut quiz = quiz(&[0, 1]);
        assert!(quiz.press_key("1").is_some());
        let before = quiz.state();
        assert!(quiz.press_key("1").is_none());
        assert!(quiz.press_key("3").is_none());
        assert_eq!(quiz.state(), before);
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn non_answer_keys_are_ignored() {
        let mut quiz = quiz(&[0]);
        assert!(quiz.press_key("5").is_none());
        assert!(quiz.press_key("Enter").is_none());
        assert!(quiz.is_presenting());
    }

    #[test]
    fn score_matches_count_of_correct_answers_for_every_choice() {
        let correct = [0, 1, 2, 3];
        for choice in 0..4 {
            let mut quiz = quiz(&correct);
            for _ in 0..correct.len() {
                quiz.select(opt(choice)).unwrap();
                assert!(quiz.score() as usize <= quiz.current_index() + 1);
                let _ = quiz.advance().unwrap();
            }
            // Exactly one question has `choice` as its correct index.
            assert_eq!(
                quiz.state(),
                QuizState::Completed { score: 1, total: 4 }
            );
        }
    }

    #[test]
    fn all_wrong_and_all_right_both_finish() {
        let mut zero = quiz(&[0, 0]);
        zero.select(opt(1)).unwrap();
        zero.advance().unwrap();
        zero.select(opt(1)).unwrap();
        assert_eq!(
            zero.advance().unwrap(),
            Advance::Finished(QuizScore { score: 0, total: 2 })
        );

        let mut full = quiz(&[0, 0]);
        full.select(opt(0)).unwrap();
        full.advance().unwrap();
        full.select(opt(0)).unwrap();
        assert_eq!(
            full.advance().unwrap(),
            Advance::Finished(QuizScore { score: 2, total: 2 })
        );
    }

    #[test]
    fn answered_count_tracks_progress() {
        let mut quiz = quiz(&[0, 0]);
        assert_eq!(quiz.answered(), 0);
        quiz.select(opt(0)).unwrap();
        assert_eq!(quiz.answered(), 1);
        quiz.advance().unwrap();
        assert_eq!(quiz.answered(), 1);
    }

    #[test]
    fn transition_function_is_pure() {
        let questions = vec![question(0)];
        let state = QuizState::Presenting { index: 0 };
        let (next, score) = state
            .on(QuizInput::Select(opt(0)), &questions, 0)
            .unwrap();
        assert_eq!(state, QuizState::Presenting { index: 0 });
        assert_eq!(score, 1);
        let (done, _) = next.on(QuizInput::Advance, &questions, score).unwrap();
        assert_eq!(done, QuizState::Completed { score: 1, total: 1 });
    }
}
