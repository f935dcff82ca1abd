use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use study_core::model::{ContentId, LearningContent, QuizAttempt};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Library of generated study material.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Persist new content or replace content with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the content cannot be stored.
    async fn save_content(&self, content: &LearningContent) -> Result<(), StorageError>;

    /// Fetch content by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_content(&self, id: ContentId) -> Result<LearningContent, StorageError>;

    /// List saved content, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_content(&self, limit: usize) -> Result<Vec<LearningContent>, StorageError>;
}

/// Quiz history for the analytics view.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Append a finished attempt.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<(), StorageError>;

    /// List attempts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_attempts(&self, limit: usize) -> Result<Vec<QuizAttempt>, StorageError>;
}

/// In-memory repository. State lives only as long as the process.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    content: Arc<Mutex<HashMap<ContentId, LearningContent>>>,
    attempts: Arc<Mutex<Vec<QuizAttempt>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn save_content(&self, content: &LearningContent) -> Result<(), StorageError> {
        let mut guard = self
            .content
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(content.id(), content.clone());
        Ok(())
    }

    async fn get_content(&self, id: ContentId) -> Result<LearningContent, StorageError> {
        let guard = self
            .content
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_content(&self, limit: usize) -> Result<Vec<LearningContent>, StorageError> {
        let guard = self
            .content
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut items: Vec<_> = guard.values().cloned().collect();
        items.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.title().cmp(right.title()))
        });
        items.truncate(limit);
        Ok(items)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<(), StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(attempt.clone());
        Ok(())
    }

    async fn list_attempts(&self, limit: usize) -> Result<Vec<QuizAttempt>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub content: Arc<dyn ContentRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let content: Arc<dyn ContentRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self { content, progress }
    }
}
