use dioxus::prelude::*;
use study_core::model::ProgressReport;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptRowVm, ProgressVm, map_progress};

const HISTORY_LIMIT: usize = 50;

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let attempts = progress
                .history(HISTORY_LIMIT)
                .await
                .map_err(|err| ViewError::from(&err))?;
            let report = ProgressReport::from_attempts(&attempts);
            Ok::<ProgressVm, ViewError>(map_progress(&report, &attempts))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page progress-page",
            h2 { "Your Progress" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    div { class: "stats",
                        div { class: "stat",
                            span { class: "stat__label", "Avg Mastery" }
                            span { class: "stat__value", "{vm.average_percent}%" }
                        }
                        div { class: "stat",
                            span { class: "stat__label", "Quizzes Taken" }
                            span { class: "stat__value", "{vm.quizzes_taken}" }
                        }
                        div { class: "stat",
                            span { class: "stat__label", "Best" }
                            span { class: "stat__value", "{vm.best_percent}%" }
                        }
                    }
                    if vm.rows.is_empty() {
                        p { class: "empty", "No quizzes taken yet." }
                    } else {
                        table { class: "history",
                            thead {
                                tr {
                                    th { "Topic" }
                                    th { "Score" }
                                    th { "Date" }
                                }
                            }
                            tbody {
                                for row in vm.rows {
                                    AttemptRow { row }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn AttemptRow(row: AttemptRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.topic}" }
            td { class: "history__score", "{row.score_label} ({row.percent}%)" }
            td { "{row.date}" }
        }
    }
}
