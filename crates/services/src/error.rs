//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use study_core::model::{ContentValidationError, ScheduleError};

/// Errors emitted by content providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("content generation is not configured")]
    Disabled,
    #[error("content generation returned an empty response")]
    EmptyResponse,
    #[error("content generation failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("content generation returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ContentValidationError),
}

/// Errors emitted by narrators. The quiz controller swallows all of them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NarrationError {
    #[error("speech synthesis failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("speech synthesis returned no audio")]
    NoAudio,
    #[error("speech audio could not be decoded: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("audio playback is unavailable")]
    PlaybackClosed,
}

/// Errors emitted by `StudyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error("nothing to study: input text is empty")]
    EmptyInput,
    #[error("content unavailable")]
    ContentUnavailable(#[source] ContentError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("a finished quiz must have at least one question")]
    EmptyQuiz,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
