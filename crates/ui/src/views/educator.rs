use dioxus::prelude::*;
use tracing::warn;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{ScheduleWeekVm, map_schedule};

const DEFAULT_WEEKS: u32 = 4;

#[component]
pub fn EducatorView() -> Element {
    let ctx = use_context::<AppContext>();
    let study = ctx.study();

    let mut topic = use_signal(String::new);
    let mut weeks = use_signal(|| DEFAULT_WEEKS);
    let mut generating = use_signal(|| false);
    let mut schedule = use_signal(Vec::<ScheduleWeekVm>::new);
    let mut error = use_signal(|| None::<ViewError>);

    let on_generate = use_callback(move |()| {
        if generating() {
            return;
        }
        let study = study.clone();
        let request_topic = topic();
        let request_weeks = weeks();
        generating.set(true);
        error.set(None);
        spawn(async move {
            let result = study.generate_schedule(&request_topic, request_weeks).await;
            generating.set(false);
            match result {
                Ok(items) => schedule.set(map_schedule(&items)),
                Err(err) => {
                    warn!(error = %err, "schedule not generated");
                    error.set(Some(ViewError::from(&err)));
                }
            }
        });
    });

    rsx! {
        div { class: "page educator-page",
            header { class: "page-header",
                h2 { "Course Planner" }
                p { "Generate a week-by-week teaching plan for any topic." }
            }
            div { class: "educator-form",
                input {
                    class: "input",
                    id: "educator-topic",
                    r#type: "text",
                    placeholder: "Topic, e.g. Introduction to Genetics",
                    value: "{topic}",
                    oninput: move |evt| topic.set(evt.value()),
                }
                input {
                    class: "input input--narrow",
                    id: "educator-weeks",
                    r#type: "number",
                    min: "1",
                    max: "12",
                    value: "{weeks}",
                    oninput: move |evt| weeks.set(evt.value().parse().unwrap_or(0)),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: generating(),
                    onclick: move |_| on_generate.call(()),
                    if generating() { "Planning..." } else { "Generate Plan" }
                }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err.message()}" }
            }
            div { class: "schedule",
                for week in schedule() {
                    WeekCard { key: "{week.heading}", week }
                }
            }
        }
    }
}

#[component]
fn WeekCard(week: ScheduleWeekVm) -> Element {
    rsx! {
        section { class: "schedule-week",
            h3 { "{week.heading}" }
            h4 { "Objectives" }
            ul {
                for objective in week.objectives {
                    li { "{objective}" }
                }
            }
            h4 { "Activities" }
            ul {
                for activity in week.activities {
                    li { "{activity}" }
                }
            }
        }
    }
}
