use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::{debug, warn};

use services::{QuizEvent, QuizSessionController};
use study_core::model::{ContentId, LearningContent};

use crate::context::{AppContext, use_accessibility};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionVm, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView(content_id: ContentId) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let accessibility = use_accessibility();
    let study = ctx.study();
    let progress = ctx.progress();
    let narrator = ctx.narrator();
    let timings = ctx.narration_timings();

    let mut session = use_signal(|| None::<QuizSessionController>);
    let mut speaking = use_signal(|| false);
    let mut session_error = use_signal(|| None::<ViewError>);
    let mut record_error = use_signal(|| None::<ViewError>);

    let resource = use_resource(move || {
        let study = study.clone();
        async move {
            study
                .get_content(content_id)
                .await
                .map_err(|err| ViewError::from(&err))
        }
    });
    let state = view_state_from_resource(&resource);

    // Starts the controller once content is loaded, then follows the accessibility toggle.
    use_effect(move || {
        let enabled = accessibility();
        let questions = match resource.value().read().as_ref() {
            Some(Ok(content)) => content.quiz().to_vec(),
            _ => return,
        };

        let mut slot = session.write();
        if let Some(controller) = slot.as_mut() {
            controller.set_narration_mode(enabled);
            return;
        }
        match QuizSessionController::start(questions, enabled, narrator.clone(), timings) {
            Ok(controller) => {
                let mut narration = controller.subscribe_narration();
                *slot = Some(controller);
                spawn(async move {
                    loop {
                        let now = *narration.borrow_and_update();
                        speaking.set(now);
                        if narration.changed().await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(err) => {
                warn!(error = %err, "quiz could not start");
                session_error.set(Some(ViewError::EmptyQuiz));
            }
        }
    });

    use_effect(move || {
        if session.read().is_some() {
            let _ = eval("document.getElementById(\"quiz-root\")?.focus();");
        }
    });

    let on_select = use_callback(move |index: usize| {
        if let Some(controller) = session.write().as_mut() {
            if let Err(err) = controller.select(index) {
                debug!(index, error = %err, "option ignored");
            }
        }
    });

    let on_next = use_callback(move |()| {
        let event = session.write().as_mut().map(QuizSessionController::advance);
        match event {
            Some(Ok(QuizEvent::Finished { score, total })) => {
                let content: Option<LearningContent> = resource
                    .value()
                    .read()
                    .as_ref()
                    .and_then(|value| value.as_ref().ok())
                    .cloned();
                let Some(content) = content else {
                    return;
                };
                let progress = progress.clone();
                spawn(async move {
                    if let Err(err) = progress.record_finish(&content, score, total).await {
                        warn!(error = %err, "quiz attempt not recorded");
                        record_error.set(Some(ViewError::from(&err)));
                    }
                });
            }
            Some(Ok(_)) | None => {}
            Some(Err(err)) => debug!(error = %err, "advance ignored"),
        }
    });

    let on_listen = use_callback(move |()| {
        if let Some(controller) = session.write().as_mut() {
            controller.replay_question();
        }
    });

    let on_quit = use_callback(move |()| {
        if let Some(controller) = session.write().take() {
            let event = controller.exit();
            debug!(?event, "quiz closed");
        }
        let _ = navigator.push(Route::Dashboard {});
    });

    // Number keys only; the listener goes away with the view.
    let on_key = use_callback(move |evt: KeyboardEvent| {
        let Key::Character(value) = evt.data.key() else {
            return;
        };
        let handled = session
            .write()
            .as_mut()
            .and_then(|controller| controller.press_key(&value))
            .is_some();
        if handled {
            evt.prevent_default();
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(on_select, on_next, session);
            }
        }
    }

    let vm = session
        .read()
        .as_ref()
        .map(|controller| QuizVm::new(controller.quiz(), controller.progress()));
    let large = if accessibility() { " quiz-page--large" } else { "" };

    rsx! {
        div {
            class: "page quiz-page{large}",
            id: "quiz-root",
            tabindex: "0",
            onkeydown: on_key,
            header { class: "quiz-header",
                button {
                    class: "btn btn-ghost",
                    id: "quiz-quit",
                    r#type: "button",
                    onclick: move |_| on_quit.call(()),
                    "Quit"
                }
                if speaking() {
                    span { class: "quiz-speaking", role: "status", "Reading aloud..." }
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(_) => rsx! {
                    if let Some(err) = session_error() {
                        p { "{err.message()}" }
                    } else if let Some(vm) = vm {
                        if let Some(done) = vm.completion.clone() {
                            div { class: "quiz-complete",
                                h2 { "Quiz Completed!" }
                                p { class: "quiz-complete__score", "{done.score_label}" }
                                if let Some(err) = record_error() {
                                    p { class: "quiz-complete__warning", "{err.message()}" }
                                } else {
                                    p { "Great effort! Your result has been added to your progress." }
                                }
                                div { class: "quiz-complete__actions",
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        onclick: move |_| on_quit.call(()),
                                        "Back Home"
                                    }
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "button",
                                        onclick: move |_| {
                                            let _ = navigator.push(Route::StudyContent { content_id });
                                        },
                                        "Review Material"
                                    }
                                }
                            }
                        } else {
                            QuestionPanel {
                                vm: vm.clone(),
                                on_select,
                                on_next,
                                on_listen,
                            }
                        }
                    } else {
                        p { "Loading..." }
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionPanel(
    vm: QuizVm,
    on_select: Callback<usize>,
    on_next: Callback<()>,
    on_listen: Callback<()>,
) -> Element {
    let enabled = vm.options_enabled();

    rsx! {
        div { class: "quiz-question",
            div { class: "quiz-question__heading",
                div {
                    span { class: "quiz-position", "{vm.position_label}" }
                    h2 { class: "quiz-prompt", "{vm.prompt}" }
                }
                button {
                    class: "btn btn-icon",
                    id: "quiz-listen",
                    r#type: "button",
                    title: "Listen to question",
                    aria_label: "Listen to question",
                    onclick: move |_| on_listen.call(()),
                    "🔊"
                }
            }
            div { class: "quiz-progress",
                div { class: "quiz-progress__bar", style: "width: {vm.progress_percent}%" }
            }
            div { class: "quiz-options",
                for option in vm.options.clone() {
                    OptionButton { key: "{option.index}", option, enabled, on_select }
                }
            }
        }
        if let Some(feedback) = vm.feedback {
            div { class: "quiz-feedback", role: "status",
                div { class: "quiz-feedback__text",
                    h4 { "{feedback.heading}" }
                    if !feedback.explanation.is_empty() {
                        p { "{feedback.explanation}" }
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "quiz-next",
                    r#type: "button",
                    onclick: move |_| on_next.call(()),
                    "{feedback.next_label}"
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, enabled: bool, on_select: Callback<usize>) -> Element {
    let index = option.index;
    rsx! {
        button {
            class: "{option.state.class()}",
            r#type: "button",
            disabled: !enabled,
            onclick: move |_| on_select.call(index),
            span { class: "quiz-option__key", "{option.key}" }
            span { class: "quiz-option__text", "{option.text}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    select: Rc<RefCell<Option<Callback<usize>>>>,
    next: Rc<RefCell<Option<Callback<()>>>>,
    session: Rc<RefCell<Option<Signal<Option<QuizSessionController>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        select: Callback<usize>,
        next: Callback<()>,
        session: Signal<Option<QuizSessionController>>,
    ) {
        *self.select.borrow_mut() = Some(select);
        *self.next.borrow_mut() = Some(next);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn select(&self) -> Callback<usize> {
        (*self.select.borrow()).expect("quiz select registered")
    }

    pub(crate) fn next(&self) -> Callback<()> {
        (*self.next.borrow()).expect("quiz next registered")
    }

    pub(crate) fn session(&self) -> Signal<Option<QuizSessionController>> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
