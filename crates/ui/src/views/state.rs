use dioxus::prelude::*;
use services::{ProgressError, StorageError, StudyError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    EmptyInput,
    EmptyQuiz,
    InvalidSchedule,
    /// Generation failed upstream; the user can retry.
    Unavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::NotFound => "This study module no longer exists.",
            Self::EmptyInput => "Paste some text to study first.",
            Self::EmptyQuiz => "This module has no quiz questions.",
            Self::InvalidSchedule => "Enter a topic and at least one week.",
            Self::Unavailable => "Could not generate study material. Please try again.",
        }
    }
}

impl From<&StudyError> for ViewError {
    fn from(err: &StudyError) -> Self {
        match err {
            StudyError::EmptyInput => Self::EmptyInput,
            StudyError::ContentUnavailable(_) => Self::Unavailable,
            StudyError::Schedule(_) => Self::InvalidSchedule,
            StudyError::Storage(StorageError::NotFound) => Self::NotFound,
            _ => Self::Unknown,
        }
    }
}

impl From<&ProgressError> for ViewError {
    fn from(err: &ProgressError) -> Self {
        match err {
            ProgressError::EmptyQuiz => Self::EmptyQuiz,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
