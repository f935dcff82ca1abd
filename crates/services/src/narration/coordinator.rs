use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, trace};

use super::Narrator;

/// Runs narration requests in the background and tracks a single "speaking" flag.
///
/// * [`request`](Self::request) is gated: while a previous read-aloud is still
///   within its window the new one is dropped, not queued.
/// * [`announce`](Self::announce) is ungated and leaves the flag alone.
///
/// Narrator failures never reach the caller. Dropping the coordinator (or calling
/// [`cancel`](Self::cancel)) aborts everything still in flight and silences audio that
/// was already handed to the narrator's playback.
pub struct NarrationCoordinator {
    narrator: Arc<dyn Narrator>,
    speaking: Arc<watch::Sender<bool>>,
    /// Bumped per request and per cancel; only the matching request may clear the flag.
    generation: Arc<AtomicU64>,
    tasks: JoinSet<()>,
    issued: bool,
}

impl NarrationCoordinator {
    #[must_use]
    pub fn new(narrator: Arc<dyn Narrator>) -> Self {
        let (speaking, _) = watch::channel(false);
        Self {
            narrator,
            speaking: Arc::new(speaking),
            generation: Arc::new(AtomicU64::new(0)),
            tasks: JoinSet::new(),
            issued: false,
        }
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        *self.speaking.borrow()
    }

    /// Watch the speaking flag, e.g. to drive a UI indicator.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.speaking.subscribe()
    }

    /// Speak `text` and hold the speaking flag for the reported duration, or for
    /// `fallback` when the narrator reports none.
    ///
    /// Returns `false` when the request was dropped because narration is already active.
    /// Must be called from within a Tokio runtime.
    pub fn request(&mut self, text: impl Into<String>, fallback: Duration) -> bool {
        let claimed = self.speaking.send_if_modified(|speaking| {
            if *speaking {
                false
            } else {
                *speaking = true;
                true
            }
        });
        if !claimed {
            trace!("narration already active, request dropped");
            return false;
        }

        self.reap();
        self.issued = true;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let narrator = Arc::clone(&self.narrator);
        let speaking = Arc::clone(&self.speaking);
        let current = Arc::clone(&self.generation);
        let text = text.into();
        self.tasks.spawn(async move {
            match narrator.speak(&text).await {
                Ok(duration) => tokio::time::sleep(duration.unwrap_or(fallback)).await,
                Err(err) => debug!(error = %err, "narration failed"),
            }
            release(&speaking, &current, generation);
        });
        true
    }

    /// Speak `text` without touching the speaking flag. Failures are logged and dropped.
    pub fn announce(&mut self, text: impl Into<String>) {
        self.reap();
        self.issued = true;
        let narrator = Arc::clone(&self.narrator);
        let text = text.into();
        self.tasks.spawn(async move {
            if let Err(err) = narrator.speak(&text).await {
                debug!(error = %err, "announcement failed");
            }
        });
    }

    /// Abort in-flight narration, silence queued audio and clear the speaking flag.
    pub fn cancel(&mut self) {
        self.tasks.abort_all();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.speaking.send_replace(false);
        if std::mem::take(&mut self.issued) {
            self.narrator.stop();
        }
    }

    fn reap(&mut self) {
        while self.tasks.try_join_next().is_some() {}
    }
}

/// Clear the flag unless a newer request (or a cancel) has happened since `generation`.
fn release(speaking: &watch::Sender<bool>, current: &AtomicU64, generation: u64) {
    speaking.send_if_modified(|flag| {
        if *flag && current.load(Ordering::Acquire) == generation {
            *flag = false;
            true
        } else {
            false
        }
    });
}

impl Drop for NarrationCoordinator {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for NarrationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrationCoordinator")
            .field("speaking", &self.is_speaking())
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
