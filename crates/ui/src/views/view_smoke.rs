use dioxus::prelude::*;
use chrono::Duration;
use study_core::model::{ContentId, QuizAttempt};
use study_core::time::fixed_now;

use super::test_harness::{ViewHarness, ViewKind, drive_dom, sample_content, setup_view_harness};

fn answer(harness: &mut ViewHarness, index: usize) {
    let handles = harness.quiz_handles.clone().expect("quiz handles");
    harness.dom.in_runtime(|| handles.select().call(index));
    drive_dom(&mut harness.dom);
}

fn next(harness: &mut ViewHarness) {
    let handles = harness.quiz_handles.clone().expect("quiz handles");
    harness.dom.in_runtime(|| handles.next().call(()));
    drive_dom(&mut harness.dom);
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_lists_content() {
    let content = sample_content();
    let mut harness = setup_view_harness(ViewKind::Dashboard, &[content]).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Photosynthesis basics..."), "missing title in {html}");
    assert!(html.contains("3 quiz questions"), "missing question count in {html}");
    assert!(html.contains("Create New Module"), "missing create link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_content_view_smoke_renders_summary() {
    let content = sample_content();
    let content_id = content.id();
    let mut harness = setup_view_harness(ViewKind::StudyContent(content_id), &[content]).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("<strong>light</strong>"), "missing rendered markdown in {html}");
    assert!(html.contains("Listen to Content"), "missing listen button in {html}");
    assert!(html.contains("Take Personalized Quiz"), "missing quiz link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_records_one_attempt() {
    let content = sample_content();
    let content_id = content.id();
    let mut harness = setup_view_harness(ViewKind::Quiz(content_id), &[content]).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("First?"), "missing prompt in {html}");

    answer(&mut harness, 0);
    let html = harness.render();
    assert!(html.contains("Correct!"), "missing feedback in {html}");
    assert!(html.contains("Next Question"), "missing next label in {html}");

    next(&mut harness);
    answer(&mut harness, 2);
    next(&mut harness);
    answer(&mut harness, 0);
    assert!(harness.render().contains("Keep Learning"));
    next(&mut harness);
    // A stray click after the summary is up must not record twice.
    next(&mut harness);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Quiz Completed!"), "missing completion in {html}");
    assert!(html.contains("2 / 3"), "missing score in {html}");

    let attempts = harness
        .storage
        .progress
        .list_attempts(10)
        .await
        .expect("list attempts");
    assert_eq!(attempts.len(), 1);
    assert_eq!((attempts[0].score, attempts[0].total), (2, 3));
    assert_eq!(attempts[0].content_id, content_id);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_ignores_second_answer() {
    let content = sample_content();
    let content_id = content.id();
    let mut harness = setup_view_harness(ViewKind::Quiz(content_id), &[content]).await;

    harness.rebuild();
    harness.settle().await;
    answer(&mut harness, 1);
    answer(&mut harness, 0);

    let handles = harness.quiz_handles.clone().expect("quiz handles");
    let score = harness.dom.in_runtime(|| {
        handles
            .session()
            .read()
            .as_ref()
            .map(|controller| controller.quiz().score())
    });
    assert_eq!(score, Some(0));
    assert!(harness.render().contains("Keep Learning"));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_missing_content_shows_not_found() {
    let mut harness = setup_view_harness(ViewKind::Quiz(ContentId::random()), &[]).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("no longer exists"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_history() {
    let content = sample_content();
    let mut harness = setup_view_harness(ViewKind::Progress, &[]).await;
    let attempts = [
        QuizAttempt::new(content.id(), content.title(), 1, 2, fixed_now()),
        QuizAttempt::new(
            content.id(),
            content.title(),
            3,
            3,
            fixed_now() + Duration::minutes(5),
        ),
    ];
    for attempt in &attempts {
        harness
            .storage
            .progress
            .append_attempt(attempt)
            .await
            .expect("append attempt");
    }

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Avg Mastery"), "missing mastery in {html}");
    assert!(html.contains("75%"), "missing average in {html}");
    assert!(html.contains("100%"), "missing best in {html}");
    assert!(html.contains("2023-11-14"), "missing date in {html}");
}
