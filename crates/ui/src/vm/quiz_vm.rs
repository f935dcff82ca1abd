use services::QuizProgress;
use study_core::model::OptionIndex;
use study_core::{Quiz, QuizState};

/// How an answer option is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Selectable, no feedback yet.
    Open,
    /// The right answer, shown once feedback is visible.
    Correct,
    /// The user's wrong pick.
    Incorrect,
    /// Any other option while feedback is visible.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "quiz-option",
            Self::Correct => "quiz-option quiz-option--correct",
            Self::Incorrect => "quiz-option quiz-option--incorrect",
            Self::Dimmed => "quiz-option quiz-option--dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    /// 1-based key label, matching the keyboard shortcut.
    pub key: String,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub heading: &'static str,
    pub explanation: String,
    pub next_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub score: u32,
    pub total: u32,
    pub score_label: String,
}

/// Snapshot of a quiz for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub position_label: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<FeedbackVm>,
    pub completion: Option<CompletionVm>,
    pub progress_percent: u32,
}

impl QuizVm {
    #[must_use]
    pub fn new(quiz: &Quiz, progress: QuizProgress) -> Self {
        let question = quiz.current_question();
        let state = quiz.state();
        let last = progress.position == progress.total;

        let options = OptionIndex::all()
            .map(|option| OptionVm {
                index: option.value(),
                key: option.label().to_string(),
                text: question.option(option).to_string(),
                state: option_state(state, question.correct(), option),
            })
            .collect();

        let feedback = match state {
            QuizState::Feedback { correct, .. } => Some(FeedbackVm {
                correct,
                heading: if correct { "Correct!" } else { "Keep Learning" },
                explanation: question.explanation().to_string(),
                next_label: if last { "Finish Quiz" } else { "Next Question" },
            }),
            _ => None,
        };

        let completion = match state {
            QuizState::Completed { score, total } => Some(CompletionVm {
                score,
                total,
                score_label: format!("{score} / {total}"),
            }),
            _ => None,
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let progress_percent = (progress.fraction() * 100.0).round() as u32;

        Self {
            position_label: format!("Question {} of {}", progress.position, progress.total),
            prompt: question.prompt().to_string(),
            options,
            feedback,
            completion,
            progress_percent,
        }
    }

    /// Option buttons only accept input while a question is presented.
    #[must_use]
    pub fn options_enabled(&self) -> bool {
        self.feedback.is_none() && self.completion.is_none()
    }
}

fn option_state(state: QuizState, correct: OptionIndex, option: OptionIndex) -> OptionState {
    match state {
        QuizState::Feedback { selected, .. } => {
            if option == correct {
                OptionState::Correct
            } else if option == selected {
                OptionState::Incorrect
            } else {
                OptionState::Dimmed
            }
        }
        QuizState::Presenting { .. } | QuizState::Completed { .. } => OptionState::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::QuizQuestion;

    fn quiz() -> Quiz {
        let question = |prompt: &str, correct: usize| {
            QuizQuestion::new(
                prompt,
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct,
                "Because.",
            )
            .unwrap()
        };
        Quiz::new(vec![question("Q1", 2), question("Q2", 0)]).unwrap()
    }

    #[test]
    fn presenting_shows_open_options() {
        let quiz = quiz();
        let vm = QuizVm::new(&quiz, QuizProgress::of(&quiz));
        assert_eq!(vm.position_label, "Question 1 of 2");
        assert!(vm.options.iter().all(|o| o.state == OptionState::Open));
        assert_eq!(vm.options[3].key, "4");
        assert!(vm.options_enabled());
        assert_eq!(vm.progress_percent, 0);
    }

    #[test]
    fn wrong_answer_marks_correct_and_selected() {
        let mut quiz = quiz();
        quiz.select_raw(1).unwrap();
        let vm = QuizVm::new(&quiz, QuizProgress::of(&quiz));

        let states: Vec<_> = vm.options.iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            vec![
                OptionState::Dimmed,
                OptionState::Incorrect,
                OptionState::Correct,
                OptionState::Dimmed
            ]
        );
        let feedback = vm.feedback.unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.heading, "Keep Learning");
        assert_eq!(feedback.next_label, "Next Question");
        assert_eq!(vm.progress_percent, 50);
    }

    #[test]
    fn last_question_offers_finish_then_completion() {
        let mut quiz = quiz();
        quiz.select_raw(2).unwrap();
        quiz.advance().unwrap();
        quiz.select_raw(0).unwrap();
        let vm = QuizVm::new(&quiz, QuizProgress::of(&quiz));
        assert_eq!(vm.feedback.unwrap().next_label, "Finish Quiz");

        quiz.advance().unwrap();
        let vm = QuizVm::new(&quiz, QuizProgress::of(&quiz));
        let completion = vm.completion.clone().unwrap();
        assert_eq!(completion.score_label, "2 / 2");
        assert!(!vm.options_enabled());
    }
}
