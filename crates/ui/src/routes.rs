use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use services::NarrationCoordinator;
use study_core::model::ContentId;

use crate::context::{AppContext, use_accessibility};
use crate::views::{
    DashboardView, EducatorView, NarrationPlayer, ProgressView, QuizView, StudyContentView,
    StudyView, VoiceNavigator,
};

const ACCESSIBILITY_ON: &str = "Accessibility mode enabled. Voice navigation active. Try saying go to study hub or open analytics.";

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/study", StudyView)] Study {},
        #[route("/study/:content_id", StudyContentView)] StudyContent { content_id: ContentId },
        #[route("/quiz/:content_id", QuizView)] Quiz { content_id: ContentId },
        #[route("/educator", EducatorView)] Educator {},
        #[route("/progress", ProgressView)] Progress {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            NarrationPlayer {}
            VoiceNavigator {}
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let mut accessibility = use_accessibility();
    let mut announcer = use_signal(|| NarrationCoordinator::new(ctx.narrator()));
    let enabled = accessibility();

    rsx! {
        nav { class: "sidebar",
            h1 { "Study" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Study {}, "Study Hub" } }
                li { Link { to: Route::Educator {}, "Educator Tools" } }
                li { Link { to: Route::Progress {}, "Analytics" } }
            }
            div { class: "sidebar__accessibility",
                span { "Accessibility" }
                button {
                    class: if enabled { "toggle toggle--on" } else { "toggle" },
                    id: "accessibility-toggle",
                    r#type: "button",
                    role: "switch",
                    aria_checked: "{enabled}",
                    onclick: move |_| {
                        let next = !accessibility();
                        accessibility.set(next);
                        if next {
                            announcer.write().announce(ACCESSIBILITY_ON);
                        } else {
                            announcer.write().cancel();
                        }
                    },
                    span { class: "toggle__knob" }
                }
            }
        }
    }
}
