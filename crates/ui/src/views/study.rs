use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::NarrationCoordinator;
use study_core::model::ContentId;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ContentDetailVm, FlashcardVm, map_content_detail};

#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let study = ctx.study();

    let mut input = use_signal(String::new);
    let mut generating = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);

    let on_generate = use_callback(move |()| {
        if generating() {
            return;
        }
        let text = input();
        let study = study.clone();
        generating.set(true);
        error.set(None);
        spawn(async move {
            let result = study.create_content(&text).await;
            generating.set(false);
            match result {
                Ok(content) => {
                    let _ = navigator.push(Route::StudyContent {
                        content_id: content.id(),
                    });
                }
                Err(err) => {
                    warn!(error = %err, "study content not created");
                    error.set(Some(ViewError::from(&err)));
                }
            }
        });
    });

    let blank = input.read().trim().is_empty();

    rsx! {
        div { class: "page study-page",
            if generating() {
                div { class: "study-loading", role: "status",
                    p { "Synthesizing your learning material..." }
                }
            } else {
                header { class: "page-header",
                    h2 { "What are we learning today?" }
                    p { "Paste your lecture notes, articles, or topics below." }
                }
                textarea {
                    class: "study-input",
                    id: "study-input",
                    placeholder: "E.g., Quantum Physics is a branch of physics that...",
                    value: "{input}",
                    oninput: move |evt| input.set(evt.value()),
                }
                if let Some(err) = error() {
                    p { class: "form-error", "{err.message()}" }
                }
                button {
                    class: "btn btn-primary",
                    id: "study-generate",
                    r#type: "button",
                    disabled: blank,
                    onclick: move |_| on_generate.call(()),
                    "Analyze & Learn"
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StudyTab {
    Summary,
    Flashcards,
}

#[component]
pub fn StudyContentView(content_id: ContentId) -> Element {
    let ctx = use_context::<AppContext>();
    let study = ctx.study();
    let narrator = ctx.narrator();

    let mut tab = use_signal(|| StudyTab::Summary);
    let mut narration = use_signal(|| NarrationCoordinator::new(narrator));
    let mut reading = use_signal(|| false);
    use_hook(move || {
        let mut speaking = narration.read().subscribe();
        spawn(async move {
            while speaking.changed().await.is_ok() {
                let now = *speaking.borrow_and_update();
                reading.set(now);
            }
        })
    });

    let resource = {
        let study = study.clone();
        use_resource(move || {
            let study = study.clone();
            async move {
                study
                    .get_content(content_id)
                    .await
                    .map_err(|err| ViewError::from(&err))
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let on_read = use_callback(move |()| {
        let content = resource
            .value()
            .read()
            .as_ref()
            .and_then(|value| value.as_ref().ok())
            .cloned();
        if let Some(content) = content {
            study.read_summary(&content, &mut *narration.write());
        }
    });

    rsx! {
        div { class: "page study-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { class: "btn btn-secondary", to: Route::Study {}, "Start over" }
                },
                ViewState::Ready(content) => {
                    let detail = map_content_detail(&content);
                    rsx! {
                        ContentPanel {
                            detail,
                            tab: tab(),
                            reading: reading(),
                            on_tab: move |next| tab.set(next),
                            on_read,
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ContentPanel(
    detail: ContentDetailVm,
    tab: StudyTab,
    reading: bool,
    on_tab: EventHandler<StudyTab>,
    on_read: Callback<()>,
) -> Element {
    let tab_class = |this: StudyTab| {
        if this == tab {
            "study-tab study-tab--active"
        } else {
            "study-tab"
        }
    };

    rsx! {
        div { class: "study-panel",
            h2 { class: "study-title", "{detail.title}" }
            div { class: "study-tabs", role: "tablist",
                button {
                    class: tab_class(StudyTab::Summary),
                    r#type: "button",
                    onclick: move |_| on_tab.call(StudyTab::Summary),
                    "Adaptive Summary"
                }
                button {
                    class: tab_class(StudyTab::Flashcards),
                    r#type: "button",
                    onclick: move |_| on_tab.call(StudyTab::Flashcards),
                    "Flashcards"
                }
            }
            match tab {
                StudyTab::Summary => rsx! {
                    div { class: "study-summary",
                        div { class: "study-summary__heading",
                            h3 { "Topic Breakdown" }
                            button {
                                class: "btn btn-secondary",
                                id: "study-read",
                                r#type: "button",
                                disabled: reading,
                                onclick: move |_| on_read.call(()),
                                if reading { "Reading..." } else { "Listen to Content" }
                            }
                        }
                        div { class: "study-summary__body", dangerous_inner_html: "{detail.summary_html}" }
                    }
                },
                StudyTab::Flashcards => rsx! {
                    if detail.flashcards.is_empty() {
                        p { "No flashcards for this module." }
                    } else {
                        div { class: "flashcards",
                            for card in detail.flashcards.clone() {
                                FlashcardTile { key: "{card.label}", card }
                            }
                        }
                    }
                },
            }
            footer { class: "study-footer",
                if detail.question_count > 0 {
                    Link {
                        class: "btn btn-primary",
                        to: Route::Quiz { content_id: detail.id },
                        "Take Personalized Quiz"
                    }
                }
            }
        }
    }
}

#[component]
fn FlashcardTile(card: FlashcardVm) -> Element {
    rsx! {
        div { class: "flashcard",
            span { class: "flashcard__label", "{card.label}" }
            p { class: "flashcard__question", "{card.question}" }
            p { class: "flashcard__answer", "{card.answer}" }
        }
    }
}
