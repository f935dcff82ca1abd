use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CONTENT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";

/// Connection settings for the generative-AI backend.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub content_model: String,
    pub tts_model: String,
    pub voice: String,
}

impl GeminiConfig {
    /// Reads `STUDY_AI_API_KEY` (or `GEMINI_API_KEY`) plus optional overrides.
    ///
    /// Returns `None` when no usable key is set, which disables generation and narration.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("STUDY_AI_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()?;
        Self::with_key(api_key).map(|config| Self {
            base_url: env::var("STUDY_AI_BASE_URL").unwrap_or(config.base_url),
            content_model: env::var("STUDY_AI_MODEL").unwrap_or(config.content_model),
            tts_model: env::var("STUDY_TTS_MODEL").unwrap_or(config.tts_model),
            voice: env::var("STUDY_TTS_VOICE").unwrap_or(config.voice),
            api_key: config.api_key,
        })
    }

    /// Default models and endpoint for the given key. Blank keys yield `None`.
    #[must_use]
    pub fn with_key(api_key: impl Into<String>) -> Option<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key,
            content_model: DEFAULT_CONTENT_MODEL.into(),
            tts_model: DEFAULT_TTS_MODEL.into(),
            voice: DEFAULT_VOICE.into(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// How long the "speaking" indicator stays on when the narrator reports no duration.
///
/// These pace the indicator only. They are not a contract with the speech backend and
/// can be tuned per deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarrationTimings {
    /// Fallback for question read-aloud.
    pub question_fallback: Duration,
    /// Fallback for longer content such as summaries.
    pub content_fallback: Duration,
}

impl Default for NarrationTimings {
    fn default() -> Self {
        Self {
            question_fallback: Duration::from_millis(1000),
            content_fallback: Duration::from_millis(3000),
        }
    }
}

impl NarrationTimings {
    /// Defaults, overridden by `STUDY_NARRATION_QUESTION_FALLBACK_MS` and
    /// `STUDY_NARRATION_CONTENT_FALLBACK_MS` when they parse as milliseconds.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            question_fallback: millis_from_env("STUDY_NARRATION_QUESTION_FALLBACK_MS")
                .unwrap_or(defaults.question_fallback),
            content_fallback: millis_from_env("STUDY_NARRATION_CONTENT_FALLBACK_MS")
                .unwrap_or(defaults.content_fallback),
        }
    }
}

fn millis_from_env(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_disables_backend() {
        assert!(GeminiConfig::with_key("   ").is_none());
    }

    #[test]
    fn generate_url_trims_trailing_slash() {
        let config = GeminiConfig::with_key("k")
            .unwrap()
            .with_base_url("http://localhost:9000/v1beta/");
        assert_eq!(
            config.generate_url("m"),
            "http://localhost:9000/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn default_timings() {
        let timings = NarrationTimings::default();
        assert_eq!(timings.question_fallback, Duration::from_millis(1000));
        assert_eq!(timings.content_fallback, Duration::from_millis(3000));
    }
}
