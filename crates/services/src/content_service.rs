use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use study_core::model::{
    ContentId, ContentValidationError, Flashcard, LearningContent, QuestionError, QuizQuestion,
    TeachingWeek,
};

use crate::config::GeminiConfig;
use crate::error::ContentError;
use crate::gemini::{GenerateRequest, GenerateResponse, generate_request};

/// Upstream source of study material.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Turn pasted text into a summary, flashcards and a quiz.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` when the upstream is unreachable or replies with
    /// something that is not study material.
    async fn generate_material(&self, text: &str) -> Result<StudyMaterial, ContentError>;

    /// Build a week-by-week teaching plan for a topic.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` on transport or parse failures.
    async fn generate_schedule(
        &self,
        topic: &str,
        weeks: u32,
    ) -> Result<Vec<TeachingWeek>, ContentError>;
}

//
// ─── MATERIAL ─────────────────────────────────────────────────────────────────
//

/// Study material as returned by the provider, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudyMaterial {
    pub summary: String,
    #[serde(default)]
    pub flashcards: Vec<FlashcardDraft>,
    pub quiz: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlashcardDraft {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    /// Schema type is NUMBER, so integral floats such as `2.0` are accepted.
    pub correct_index: f64,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionDraft {
    fn validate(self) -> Result<QuizQuestion, QuestionError> {
        let index = self.correct_index;
        if index.fract() != 0.0 || index < 0.0 || index > f64::from(u16::MAX) {
            return Err(QuestionError::OptionOutOfRange { index: usize::MAX });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let correct = index as usize;
        QuizQuestion::new(self.question, self.options, correct, self.explanation)
    }
}

impl StudyMaterial {
    /// Validate every question and flashcard and assemble `LearningContent`.
    ///
    /// # Errors
    ///
    /// Returns the first `ContentValidationError` encountered.
    pub fn into_content(
        self,
        id: ContentId,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<LearningContent, ContentValidationError> {
        let flashcards = self
            .flashcards
            .into_iter()
            .enumerate()
            .map(|(index, card)| {
                Flashcard::new(card.question, card.answer)
                    .map_err(|source| ContentValidationError::Flashcard { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let quiz = self
            .quiz
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| ContentValidationError::Question { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        LearningContent::new(id, title, self.summary, flashcards, quiz, created_at)
    }
}

/// Parse the JSON text the model produced.
///
/// # Errors
///
/// Returns `ContentError::Malformed` when the text does not match the material shape.
pub fn parse_material(text: &str) -> Result<StudyMaterial, ContentError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a generated schedule.
///
/// # Errors
///
/// Returns `ContentError::Malformed` when the text does not match the schedule shape.
pub fn parse_schedule(text: &str) -> Result<Vec<TeachingWeek>, ContentError> {
    Ok(serde_json::from_str(text)?)
}

//
// ─── GEMINI ───────────────────────────────────────────────────────────────────
//

/// Content provider backed by Gemini structured output.
#[derive(Clone)]
pub struct GeminiContentService {
    client: Client,
    config: Option<GeminiConfig>,
}

impl GeminiContentService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeminiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn generate_json(&self, prompt: String, schema: Value) -> Result<String, ContentError> {
        let config = self.config.as_ref().ok_or(ContentError::Disabled)?;
        let request = GenerateRequest::text(
            prompt,
            json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }),
        );

        let response = generate_request(&self.client, config, &config.content_model, &request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ContentError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        body.first_text()
            .map(str::to_string)
            .ok_or(ContentError::EmptyResponse)
    }
}

#[async_trait]
impl ContentProvider for GeminiContentService {
    async fn generate_material(&self, text: &str) -> Result<StudyMaterial, ContentError> {
        let prompt = format!(
            "Process this educational content. Provide a concise summary, 5 key flashcards \
             (question/answer), and a 5-question multiple choice quiz with exactly 4 options \
             each. Content: {text}"
        );
        let raw = self.generate_json(prompt, material_schema()).await?;
        parse_material(&raw)
    }

    async fn generate_schedule(
        &self,
        topic: &str,
        weeks: u32,
    ) -> Result<Vec<TeachingWeek>, ContentError> {
        let prompt = format!("Create a teaching schedule for \"{topic}\" spread over {weeks} weeks.");
        let raw = self.generate_json(prompt, schedule_schema()).await?;
        parse_schedule(&raw)
    }
}

fn material_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "flashcards": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "answer": { "type": "STRING" }
                    },
                    "required": ["question", "answer"]
                }
            },
            "quiz": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "correctIndex": { "type": "NUMBER" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["question", "options", "correctIndex", "explanation"]
                }
            }
        },
        "required": ["summary", "flashcards", "quiz"]
    })
}

fn schedule_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "week": { "type": "STRING" },
                "topic": { "type": "STRING" },
                "objectives": { "type": "ARRAY", "items": { "type": "STRING" } },
                "activities": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["week", "topic", "objectives", "activities"]
        }
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
