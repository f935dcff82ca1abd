use study_core::model::{ContentId, LearningContent, TeachingWeek};

use super::markdown_vm::{markdown_to_html, markdown_to_plain};

const PREVIEW_CHARS: usize = 120;

/// Dashboard list entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentCardVm {
    pub id: ContentId,
    pub title: String,
    pub preview: String,
    pub question_count: usize,
}

#[must_use]
pub fn map_content_cards(items: &[LearningContent]) -> Vec<ContentCardVm> {
    items
        .iter()
        .map(|content| ContentCardVm {
            id: content.id(),
            title: content.title().to_string(),
            preview: preview(content.summary()),
            question_count: content.quiz().len(),
        })
        .collect()
}

fn preview(summary: &str) -> String {
    let plain = markdown_to_plain(summary);
    if plain.chars().count() <= PREVIEW_CHARS {
        return plain;
    }
    let mut cut: String = plain.chars().take(PREVIEW_CHARS).collect();
    cut.push('…');
    cut
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardVm {
    pub label: String,
    pub question: String,
    pub answer: String,
}

/// Everything the study room renders for one piece of content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentDetailVm {
    pub id: ContentId,
    pub title: String,
    pub summary_html: String,
    pub flashcards: Vec<FlashcardVm>,
    pub question_count: usize,
}

#[must_use]
pub fn map_content_detail(content: &LearningContent) -> ContentDetailVm {
    ContentDetailVm {
        id: content.id(),
        title: content.title().to_string(),
        summary_html: markdown_to_html(content.summary()),
        flashcards: content
            .flashcards()
            .iter()
            .enumerate()
            .map(|(idx, card)| FlashcardVm {
                label: format!("Q{}", idx + 1),
                question: card.question().to_string(),
                answer: card.answer().to_string(),
            })
            .collect(),
        question_count: content.quiz().len(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleWeekVm {
    pub heading: String,
    pub objectives: Vec<String>,
    pub activities: Vec<String>,
}

#[must_use]
pub fn map_schedule(weeks: &[TeachingWeek]) -> Vec<ScheduleWeekVm> {
    weeks
        .iter()
        .map(|week| ScheduleWeekVm {
            heading: format!("{}: {}", week.week, week.topic),
            objectives: week.objectives.clone(),
            activities: week.activities.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::{Flashcard, QuizQuestion};
    use study_core::time::fixed_now;

    fn content(summary: &str) -> LearningContent {
        let question = QuizQuestion::new(
            "Q",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            0,
            "",
        )
        .unwrap();
        LearningContent::new(
            ContentId::random(),
            "Cells...",
            summary,
            vec![Flashcard::new("Unit of life?", "The cell").unwrap()],
            vec![question],
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn long_previews_are_cut() {
        let cards = map_content_cards(&[content(&"word ".repeat(60))]);
        assert_eq!(cards[0].preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(cards[0].preview.ends_with('…'));
    }

    #[test]
    fn detail_labels_flashcards() {
        let detail = map_content_detail(&content("**Cells** matter"));
        assert!(detail.summary_html.contains("<strong>Cells</strong>"));
        assert_eq!(detail.flashcards[0].label, "Q1");
        assert_eq!(detail.question_count, 1);
    }
}
