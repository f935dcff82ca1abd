use std::sync::Arc;

use study_core::Clock;
use study_core::model::{ContentId, LearningContent, TeachingWeek, derive_title};
use study_core::script::summary_script;
use storage::ContentRepository;
use tracing::{info, warn};

use crate::config::NarrationTimings;
use crate::content_service::ContentProvider;
use crate::error::{ContentError, StudyError};
use crate::narration::NarrationCoordinator;

/// Turns pasted text into stored study material and serves it back.
#[derive(Clone)]
pub struct StudyService {
    clock: Clock,
    provider: Arc<dyn ContentProvider>,
    content: Arc<dyn ContentRepository>,
    timings: NarrationTimings,
}

impl StudyService {
    #[must_use]
    pub fn new(
        clock: Clock,
        provider: Arc<dyn ContentProvider>,
        content: Arc<dyn ContentRepository>,
    ) -> Self {
        Self {
            clock,
            provider,
            content,
            timings: NarrationTimings::default(),
        }
    }

    #[must_use]
    pub fn with_timings(mut self, timings: NarrationTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Generate, validate and store material for `text`.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::EmptyInput` for blank text (nothing is sent upstream),
    /// `StudyError::ContentUnavailable` for any provider or validation failure, and
    /// `StudyError::Storage` when saving fails.
    pub async fn create_content(&self, text: &str) -> Result<LearningContent, StudyError> {
        if text.trim().is_empty() {
            return Err(StudyError::EmptyInput);
        }

        let material = self
            .provider
            .generate_material(text)
            .await
            .map_err(unavailable)?;
        let content = material
            .into_content(ContentId::random(), derive_title(text), self.clock.now())
            .map_err(|err| unavailable(ContentError::from(err)))?;

        self.content.save_content(&content).await?;
        info!(
            id = %content.id(),
            questions = content.quiz().len(),
            "study content created"
        );
        Ok(content)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Storage` (including not-found).
    pub async fn get_content(&self, id: ContentId) -> Result<LearningContent, StudyError> {
        Ok(self.content.get_content(id).await?)
    }

    /// Newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` on repository failures.
    pub async fn list_content(&self, limit: usize) -> Result<Vec<LearningContent>, StudyError> {
        Ok(self.content.list_content(limit).await?)
    }

    /// Read the title and summary aloud. Returns `false` when narration is already active.
    pub fn read_summary(
        &self,
        content: &LearningContent,
        narration: &mut NarrationCoordinator,
    ) -> bool {
        narration.request(summary_script(content), self.timings.content_fallback)
    }

    /// Ask the provider for a week-by-week teaching plan.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Schedule` for a blank topic or zero weeks and
    /// `StudyError::ContentUnavailable` for provider failures.
    pub async fn generate_schedule(
        &self,
        topic: &str,
        weeks: u32,
    ) -> Result<Vec<TeachingWeek>, StudyError> {
        TeachingWeek::validate_request(topic, weeks)?;
        self.provider
            .generate_schedule(topic.trim(), weeks)
            .await
            .map_err(unavailable)
    }
}

fn unavailable(err: ContentError) -> StudyError {
    warn!(error = %err, "study content unavailable");
    StudyError::ContentUnavailable(err)
}
