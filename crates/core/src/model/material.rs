use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::flashcard::{Flashcard, FlashcardError};
use crate::model::ids::ContentId;
use crate::model::question::{QuestionError, QuizQuestion};

/// Titles are cut from the first line of the source text at this many characters.
pub const TITLE_MAX_CHARS: usize = 50;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentValidationError {
    #[error("summary must not be empty")]
    EmptySummary,

    #[error("quiz must contain at least one question")]
    EmptyQuiz,

    #[error("invalid quiz question {index}: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("invalid flashcard {index}: {source}")]
    Flashcard {
        index: usize,
        #[source]
        source: FlashcardError,
    },
}

//
// ─── LEARNING CONTENT ─────────────────────────────────────────────────────────
//

/// Study material generated from one pasted text: summary, flashcards and quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningContent {
    id: ContentId,
    title: String,
    summary: String,
    flashcards: Vec<Flashcard>,
    quiz: Vec<QuizQuestion>,
    created_at: DateTime<Utc>,
}

impl LearningContent {
    /// # Errors
    ///
    /// Returns `ContentValidationError::EmptySummary` for a blank summary and
    /// `ContentValidationError::EmptyQuiz` when there is nothing to quiz on.
    pub fn new(
        id: ContentId,
        title: impl Into<String>,
        summary: impl Into<String>,
        flashcards: Vec<Flashcard>,
        quiz: Vec<QuizQuestion>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ContentValidationError> {
        let summary = summary.into();
        if summary.trim().is_empty() {
            return Err(ContentValidationError::EmptySummary);
        }
        if quiz.is_empty() {
            return Err(ContentValidationError::EmptyQuiz);
        }

        Ok(Self {
            id,
            title: title.into(),
            summary,
            flashcards,
            quiz,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> ContentId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    #[must_use]
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builds a display title from the first line of the pasted text.
///
/// The line is cut at `TITLE_MAX_CHARS` characters and always gets a trailing ellipsis.
#[must_use]
pub fn derive_title(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default().trim();
    let mut title: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
    title.push_str("...");
    title
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn question() -> QuizQuestion {
        QuizQuestion::new(
            "Q",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            0,
            "because",
        )
        .unwrap()
    }

    #[test]
    fn requires_summary_and_quiz() {
        let id = ContentId::random();
        let err = LearningContent::new(id, "t", "  ", vec![], vec![question()], fixed_now())
            .unwrap_err();
        assert_eq!(err, ContentValidationError::EmptySummary);

        let err = LearningContent::new(id, "t", "sum", vec![], vec![], fixed_now()).unwrap_err();
        assert_eq!(err, ContentValidationError::EmptyQuiz);
    }

    #[test]
    fn keeps_fields() {
        let id = ContentId::random();
        let card = Flashcard::new("q", "a").unwrap();
        let content =
            LearningContent::new(id, "Title", "Sum", vec![card], vec![question()], fixed_now())
                .unwrap();
        assert_eq!(content.id(), id);
        assert_eq!(content.flashcards().len(), 1);
        assert_eq!(content.quiz().len(), 1);
        assert_eq!(content.created_at(), fixed_now());
    }

    #[test]
    fn title_uses_first_line() {
        assert_eq!(derive_title("Photosynthesis\nmore text"), "Photosynthesis...");
    }

    #[test]
    fn title_is_cut_by_characters() {
        let long = "é".repeat(80);
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn title_of_empty_text_is_ellipsis() {
        assert_eq!(derive_title(""), "...");
    }
}
