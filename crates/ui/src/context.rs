use std::sync::{Arc, Mutex};

use dioxus::prelude::*;
use services::{NarrationTimings, Narrator, ProgressService, SpeechReceiver, StudyService};

pub trait UiApp: Send + Sync {
    fn study(&self) -> Arc<StudyService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn narrator(&self) -> Arc<dyn Narrator>;
    fn narration_timings(&self) -> NarrationTimings;
    fn accessibility_on_launch(&self) -> bool;

    /// Receiver for synthesized speech. Handed out once; later calls return `None`.
    fn take_speech_clips(&self) -> Option<SpeechReceiver>;
}

#[derive(Clone)]
pub struct AppContext {
    study: Arc<StudyService>,
    progress: Arc<ProgressService>,
    narrator: Arc<dyn Narrator>,
    narration_timings: NarrationTimings,
    accessibility_on_launch: bool,
    speech_clips: Arc<Mutex<Option<SpeechReceiver>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            study: app.study(),
            progress: app.progress(),
            narrator: app.narrator(),
            narration_timings: app.narration_timings(),
            accessibility_on_launch: app.accessibility_on_launch(),
            speech_clips: Arc::new(Mutex::new(app.take_speech_clips())),
        }
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn narrator(&self) -> Arc<dyn Narrator> {
        Arc::clone(&self.narrator)
    }

    #[must_use]
    pub fn narration_timings(&self) -> NarrationTimings {
        self.narration_timings
    }

    #[must_use]
    pub fn accessibility_on_launch(&self) -> bool {
        self.accessibility_on_launch
    }

    /// One-shot: the audio player owns the receiver for the lifetime of the window.
    #[must_use]
    pub fn take_speech_clips(&self) -> Option<SpeechReceiver> {
        self.speech_clips
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Live accessibility toggle shared by the sidebar and the quiz.
#[derive(Clone, Copy)]
pub struct AccessibilityMode(Signal<bool>);

impl AccessibilityMode {
    /// Must be created inside a component scope.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self(Signal::new(enabled))
    }

    #[must_use]
    pub fn signal(self) -> Signal<bool> {
        self.0
    }
}

#[must_use]
pub fn use_accessibility() -> Signal<bool> {
    use_context::<AccessibilityMode>().signal()
}
