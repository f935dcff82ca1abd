use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every quiz question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt must not be empty")]
    EmptyPrompt,

    #[error("expected {OPTION_COUNT} options, got {found}")]
    OptionCount { found: usize },

    #[error("option {index} must not be empty")]
    EmptyOption { index: usize },

    #[error("option index {index} is out of range (0..{OPTION_COUNT})")]
    OptionOutOfRange { index: usize },
}

//
// ─── OPTION INDEX ─────────────────────────────────────────────────────────────
//

/// Zero-based index of one of the four answer options.
///
/// Construction is checked, so holding an `OptionIndex` means the value is in `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct OptionIndex(u8);

impl OptionIndex {
    /// # Errors
    ///
    /// Returns `QuestionError::OptionOutOfRange` if `index` is not in `0..4`.
    pub fn new(index: usize) -> Result<Self, QuestionError> {
        if index < OPTION_COUNT {
            // Bounded by OPTION_COUNT above.
            #[allow(clippy::cast_possible_truncation)]
            Ok(Self(index as u8))
        } else {
            Err(QuestionError::OptionOutOfRange { index })
        }
    }

    /// Maps the keyboard digits "1".."4" to options 0..3.
    ///
    /// Anything else, including "0", "5" and multi-character keys, maps to `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Self(0)),
            "2" => Some(Self(1)),
            "3" => Some(Self(2)),
            "4" => Some(Self(3)),
            _ => None,
        }
    }

    /// All four options in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..OPTION_COUNT as u8).map(Self)
    }

    #[must_use]
    pub fn value(self) -> usize {
        usize::from(self.0)
    }

    /// One-based label as spoken and shown to the learner.
    #[must_use]
    pub fn label(self) -> usize {
        self.value() + 1
    }
}

impl TryFrom<usize> for OptionIndex {
    type Error = QuestionError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OptionIndex> for usize {
    fn from(value: OptionIndex) -> Self {
        value.value()
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Immutable once built; the quiz controller only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct: OptionIndex,
    explanation: String,
}

impl QuizQuestion {
    /// Validate and build a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or any option is blank, if there are not
    /// exactly four options, or if `correct` does not point at one of them.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let found = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| QuestionError::OptionCount { found })?;
        if let Some(index) = options.iter().position(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        let correct = OptionIndex::new(correct)?;

        Ok(Self {
            prompt,
            options,
            correct,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &str {
        &self.options[index.value()]
    }

    #[must_use]
    pub fn correct(&self) -> OptionIndex {
        self.correct
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        self.option(self.correct)
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Exact index match, no partial credit.
    #[must_use]
    pub fn is_correct(&self, selected: OptionIndex) -> bool {
        selected == self.correct
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
