use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::config::GeminiConfig;
use crate::error::NarrationError;
use crate::gemini::{GenerateRequest, GenerateResponse, generate_request};

use super::Narrator;
use super::playback::{PlaybackSink, SpeechClip};

/// Narrator backed by Gemini speech synthesis.
///
/// Synthesized audio goes to a [`PlaybackSink`]; the returned duration is computed from
/// the PCM length. Without configuration it behaves like a silent narrator.
#[derive(Clone)]
pub struct GeminiNarrator {
    client: Client,
    config: Option<GeminiConfig>,
    sink: Arc<dyn PlaybackSink>,
}

impl GeminiNarrator {
    #[must_use]
    pub fn new(config: Option<GeminiConfig>, sink: Arc<dyn PlaybackSink>) -> Self {
        Self {
            client: Client::new(),
            config,
            sink,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn synthesize(
        &self,
        config: &GeminiConfig,
        text: &str,
    ) -> Result<SpeechClip, NarrationError> {
        let request = GenerateRequest::text(
            text,
            json!({
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": config.voice }
                    }
                }
            }),
        );

        let response = generate_request(&self.client, config, &config.tts_model, &request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(NarrationError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        let data = body.first_inline_data().ok_or(NarrationError::NoAudio)?;
        let clip = SpeechClip::from_base64(data)?;
        if clip.is_empty() {
            return Err(NarrationError::NoAudio);
        }
        Ok(clip)
    }
}

#[async_trait]
impl Narrator for GeminiNarrator {
    async fn speak(&self, text: &str) -> Result<Option<Duration>, NarrationError> {
        let Some(config) = self.config.as_ref() else {
            return Ok(None);
        };

        let clip = self.synthesize(config, text).await?;
        let duration = clip.duration();
        self.sink.play(clip)?;
        Ok(Some(duration))
    }

    fn stop(&self) {
        self.sink.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::ChannelSink;

    #[tokio::test]
    async fn unconfigured_narrator_is_a_no_op() {
        let (sink, mut rx) = ChannelSink::new();
        let narrator = GeminiNarrator::new(None, Arc::new(sink));
        assert!(!narrator.enabled());
        assert_eq!(narrator.speak("hello").await.unwrap(), None);
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn stop_reaches_the_sink() {
        let (sink, mut rx) = ChannelSink::new();
        let narrator = GeminiNarrator::new(None, Arc::new(sink));
        narrator.stop();
        assert_eq!(rx.try_recv(), Some(crate::narration::Playback::Stop));
    }
}
