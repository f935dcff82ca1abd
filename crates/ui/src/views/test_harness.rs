use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    Clock, ContentError, ContentProvider, NarrationTimings, Narrator, ProgressService,
    SilentNarrator, SpeechReceiver, StudyMaterial, StudyService,
};
use storage::Storage;
use study_core::model::{ContentId, LearningContent, QuizQuestion, TeachingWeek};
use study_core::time::fixed_now;

use crate::context::{AccessibilityMode, UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{DashboardView, ProgressView, QuizView, StudyContentView};

/// Provider that is never reached by the view tests; content is seeded directly.
struct UnusedProvider;

#[async_trait]
impl ContentProvider for UnusedProvider {
    async fn generate_material(&self, _text: &str) -> Result<StudyMaterial, ContentError> {
        Err(ContentError::Disabled)
    }

    async fn generate_schedule(
        &self,
        _topic: &str,
        _weeks: u32,
    ) -> Result<Vec<TeachingWeek>, ContentError> {
        Err(ContentError::Disabled)
    }
}

struct TestApp {
    study: Arc<StudyService>,
    progress: Arc<ProgressService>,
}

impl UiApp for TestApp {
    fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn narrator(&self) -> Arc<dyn Narrator> {
        Arc::new(SilentNarrator)
    }

    fn narration_timings(&self) -> NarrationTimings {
        NarrationTimings::default()
    }

    fn accessibility_on_launch(&self) -> bool {
        false
    }

    fn take_speech_clips(&self) -> Option<SpeechReceiver> {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Progress,
    Quiz(ContentId),
    StudyContent(ContentId),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| AccessibilityMode::new(false));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
        ViewKind::Quiz(content_id) => rsx! { QuizView { content_id } },
        ViewKind::StudyContent(content_id) => rsx! { StudyContentView { content_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until pending resources and spawned tasks have had a chance to finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Three questions; the correct answers are options 1, 3 and 2.
pub fn sample_content() -> LearningContent {
    let question = |prompt: &str, correct: usize| {
        QuizQuestion::new(
            prompt,
            vec!["Alpha".into(), "Beta".into(), "Gamma".into(), "Delta".into()],
            correct,
            "Because.",
        )
        .expect("valid question")
    };
    LearningContent::new(
        ContentId::random(),
        "Photosynthesis basics...",
        "## Light\nPlants turn **light** into sugar.",
        Vec::new(),
        vec![question("First?", 0), question("Second?", 2), question("Third?", 1)],
        fixed_now(),
    )
    .expect("valid content")
}

pub async fn setup_view_harness(view: ViewKind, seed: &[LearningContent]) -> ViewHarness {
    let storage = Storage::in_memory();
    for content in seed {
        storage
            .content
            .save_content(content)
            .await
            .expect("seed content");
    }

    let clock = Clock::fixed(fixed_now());
    let study = Arc::new(StudyService::new(
        clock,
        Arc::new(UnusedProvider),
        Arc::clone(&storage.content),
    ));
    let progress = Arc::new(ProgressService::new(clock, Arc::clone(&storage.progress)));
    let app = Arc::new(TestApp { study, progress });

    let quiz_handles = match view {
        ViewKind::Quiz(_) => Some(QuizTestHandles::default()),
        _ => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        quiz_handles,
    }
}
