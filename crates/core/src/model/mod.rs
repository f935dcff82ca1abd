mod flashcard;
mod ids;
mod material;
mod progress;
mod question;
mod schedule;

pub use flashcard::{Flashcard, FlashcardError};
pub use ids::{ContentId, ParseIdError};
pub use material::{ContentValidationError, LearningContent, TITLE_MAX_CHARS, derive_title};
pub use progress::{ProgressReport, QuizAttempt};
pub use question::{OPTION_COUNT, OptionIndex, QuestionError, QuizQuestion};
pub use schedule::{ScheduleError, TeachingWeek};
