use study_core::model::{ProgressReport, QuizAttempt};

use super::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub topic: String,
    pub score_label: String,
    pub percent: u32,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub average_percent: u32,
    pub best_percent: u32,
    pub quizzes_taken: usize,
    pub rows: Vec<AttemptRowVm>,
}

#[must_use]
pub fn map_progress(report: &ProgressReport, attempts: &[QuizAttempt]) -> ProgressVm {
    ProgressVm {
        average_percent: report.average_percent,
        best_percent: report.best_percent,
        quizzes_taken: report.attempts,
        rows: attempts
            .iter()
            .map(|attempt| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let percent = attempt.percent().round() as u32;
                AttemptRowVm {
                    topic: attempt.topic.clone(),
                    score_label: format!("{} / {}", attempt.score, attempt.total),
                    percent,
                    date: format_date(attempt.completed_at),
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::ContentId;
    use study_core::time::fixed_now;

    #[test]
    fn maps_rows_and_report() {
        let attempts = vec![
            QuizAttempt::new(ContentId::random(), "Cells...", 2, 3, fixed_now()),
            QuizAttempt::new(ContentId::random(), "Atoms...", 1, 1, fixed_now()),
        ];
        let report = ProgressReport::from_attempts(&attempts);
        let vm = map_progress(&report, &attempts);

        assert_eq!(vm.quizzes_taken, 2);
        assert_eq!(vm.average_percent, 83);
        assert_eq!(vm.rows[0].score_label, "2 / 3");
        assert_eq!(vm.rows[0].percent, 67);
        assert_eq!(vm.rows[1].date, "2023-11-14");
    }
}
