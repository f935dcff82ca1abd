//! Text-to-speech narration.
//!
//! A [`Narrator`] speaks text and reports roughly how long playback lasts. Narration is
//! best effort: callers go through a [`NarrationCoordinator`], which runs each request as
//! a detached task, swallows failures and exposes only a "speaking" flag.

mod coordinator;
mod gemini;
mod playback;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::NarrationError;

pub use coordinator::NarrationCoordinator;
pub use gemini::GeminiNarrator;
pub use playback::{
    ChannelSink, Playback, PlaybackSink, SpeechClip, SpeechReceiver, TTS_CHANNELS, TTS_SAMPLE_RATE,
};

/// Speech output capability.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Speak `text`. Returns the expected playback duration, or `None` when the
    /// narrator cannot tell (or cannot speak at all on this platform).
    ///
    /// # Errors
    ///
    /// Returns `NarrationError` when synthesis or playback fails.
    async fn speak(&self, text: &str) -> Result<Option<Duration>, NarrationError>;

    /// Silence audio this narrator already handed off for playback.
    fn stop(&self) {}
}

/// Narrator for platforms without speech output. Never fails, never reports a duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNarrator;

#[async_trait]
impl Narrator for SilentNarrator {
    async fn speak(&self, text: &str) -> Result<Option<Duration>, NarrationError> {
        tracing::trace!(chars = text.len(), "silent narrator skipped speech");
        Ok(None)
    }
}
