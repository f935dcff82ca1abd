#![forbid(unsafe_code)]

pub mod config;
pub mod content_service;
pub mod error;
mod gemini;
pub mod narration;
pub mod progress_service;
pub mod quiz_session;
pub mod study_service;

pub use storage::StorageError;
pub use study_core::Clock;

pub use config::{GeminiConfig, NarrationTimings};
pub use content_service::{ContentProvider, GeminiContentService, StudyMaterial};
pub use error::{ContentError, NarrationError, ProgressError, StudyError};
pub use narration::{
    ChannelSink, GeminiNarrator, NarrationCoordinator, Narrator, Playback, PlaybackSink,
    SilentNarrator, SpeechClip, SpeechReceiver,
};
pub use progress_service::ProgressService;
pub use quiz_session::{QuizEvent, QuizProgress, QuizSessionController};
pub use study_service::StudyService;
