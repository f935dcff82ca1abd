use std::sync::Arc;

use async_trait::async_trait;
use services::content_service::{FlashcardDraft, QuestionDraft};
use services::{
    Clock, ContentError, ContentProvider, NarrationTimings, ProgressService, QuizEvent,
    QuizSessionController, SilentNarrator, StudyMaterial, StudyService,
};
use storage::Storage;
use study_core::model::TeachingWeek;
use study_core::time::fixed_now;

struct CannedProvider;

#[async_trait]
impl ContentProvider for CannedProvider {
    async fn generate_material(&self, _text: &str) -> Result<StudyMaterial, ContentError> {
        let question = |prompt: &str, correct: f64| QuestionDraft {
            question: prompt.to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: correct,
            explanation: String::new(),
        };
        Ok(StudyMaterial {
            summary: "Summary".into(),
            flashcards: vec![FlashcardDraft {
                question: "Front".into(),
                answer: "Back".into(),
            }],
            quiz: vec![question("Q1", 0.0), question("Q2", 2.0), question("Q3", 1.0)],
        })
    }

    async fn generate_schedule(
        &self,
        _topic: &str,
        _weeks: u32,
    ) -> Result<Vec<TeachingWeek>, ContentError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn quiz_finish_is_recorded_once() {
    let storage = Storage::in_memory();
    let clock = Clock::fixed(fixed_now());
    let study = StudyService::new(clock, Arc::new(CannedProvider), storage.content.clone());
    let progress = ProgressService::new(clock, storage.progress.clone());

    let content = study.create_content("Cells\nare small").await.unwrap();
    let mut session = QuizSessionController::start(
        content.quiz().to_vec(),
        false,
        Arc::new(SilentNarrator),
        NarrationTimings::default(),
    )
    .unwrap();

    // Keyboard for the first two, pointer for the last.
    let mut finished = Vec::new();
    session.press_key("1").unwrap();
    session.advance().unwrap();
    session.press_key("2").unwrap();
    session.advance().unwrap();
    session.select(1).unwrap();
    if let QuizEvent::Finished { score, total } = session.advance().unwrap() {
        finished.push(progress.record_finish(&content, score, total).await.unwrap());
    }
    assert!(session.advance().is_err());

    assert_eq!(finished.len(), 1);
    assert_eq!((finished[0].score, finished[0].total), (2, 3));

    let report = progress.report(10).await.unwrap();
    assert_eq!(report.attempts, 1);
    assert_eq!(report.average_percent, 67);

    assert_eq!(
        session.exit(),
        QuizEvent::Exited {
            answered: 3,
            total: 3
        }
    );
}
