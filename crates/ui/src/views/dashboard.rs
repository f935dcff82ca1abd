use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ContentCardVm, map_content_cards};

const RECENT_CONTENT: usize = 50;
const REPORT_WINDOW: usize = 100;

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    cards: Vec<ContentCardVm>,
    average_percent: u32,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let study = ctx.study();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let study = study.clone();
        let progress = progress.clone();
        async move {
            let items = study
                .list_content(RECENT_CONTENT)
                .await
                .map_err(|err| ViewError::from(&err))?;
            let report = progress
                .report(REPORT_WINDOW)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok(DashboardData {
                cards: map_content_cards(&items),
                average_percent: report.average_percent,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard-page",
            header { class: "page-header",
                h2 { "Your Learning" }
                Link { class: "btn btn-primary", id: "dashboard-new", to: Route::Study {}, "Create New Module" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "stats",
                        div { class: "stat",
                            span { class: "stat__label", "Modules" }
                            span { class: "stat__value", "{data.cards.len()}" }
                        }
                        div { class: "stat",
                            span { class: "stat__label", "Avg Quiz Score" }
                            span { class: "stat__value", "{data.average_percent}%" }
                        }
                    }
                    if data.cards.is_empty() {
                        p { class: "empty", "No study modules yet. Paste some notes to get started." }
                    } else {
                        div { class: "content-grid",
                            for card in data.cards {
                                ContentCard { key: "{card.id}", card }
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
fn ContentCard(card: ContentCardVm) -> Element {
    rsx! {
        Link {
            class: "content-card",
            to: Route::StudyContent { content_id: card.id },
            h3 { class: "content-card__title", "{card.title}" }
            p { class: "content-card__preview", "{card.preview}" }
            span { class: "content-card__meta", "{card.question_count} quiz questions" }
        }
    }
}
