//! Text handed to the narrator.

use std::fmt::Write as _;

use crate::model::{LearningContent, OptionIndex, QuizQuestion};

pub const ANSWER_INSTRUCTION: &str = "Please press 1, 2, 3, or 4 on your keyboard.";
pub const CORRECT_FEEDBACK: &str = "Correct!";

/// Full read-aloud of a question: number, prompt, all options, then how to answer.
#[must_use]
pub fn question_script(index: usize, question: &QuizQuestion) -> String {
    let mut text = format!("Question {}: {}.", index + 1, question.prompt());
    for option in OptionIndex::all() {
        let _ = write!(
            text,
            " Option {}: {}.",
            option.label(),
            question.option(option)
        );
    }
    text.push(' ');
    text.push_str(ANSWER_INSTRUCTION);
    text
}

#[must_use]
pub fn feedback_script(question: &QuizQuestion, correct: bool) -> String {
    if correct {
        CORRECT_FEEDBACK.to_string()
    } else {
        format!(
            "Incorrect. The correct answer was {}.",
            question.correct_option()
        )
    }
}

#[must_use]
pub fn summary_script(content: &LearningContent) -> String {
    format!("Title: {}. Summary: {}", content.title(), content.summary())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuizQuestion {
        QuizQuestion::new(
            "What is H2O",
            vec![
                "Water".into(),
                "Salt".into(),
                "Iron".into(),
                "Gold".into(),
            ],
            0,
            "Two hydrogens, one oxygen.",
        )
        .unwrap()
    }

    #[test]
    fn question_script_reads_every_option_then_instruction() {
        let text = question_script(1, &question());
        assert!(text.starts_with("Question 2: What is H2O."));
        assert!(text.contains("Option 1: Water."));
        assert!(text.contains("Option 4: Gold."));
        assert!(text.ends_with(ANSWER_INSTRUCTION));
    }

    #[test]
    fn feedback_names_correct_option_when_wrong() {
        assert_eq!(feedback_script(&question(), true), "Correct!");
        assert_eq!(
            feedback_script(&question(), false),
            "Incorrect. The correct answer was Water."
        );
    }
}
