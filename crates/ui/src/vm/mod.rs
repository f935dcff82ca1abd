mod content_vm;
mod markdown_vm;
mod progress_vm;
mod quiz_vm;
mod time_fmt;
mod voice_vm;

pub use content_vm::{
    ContentCardVm, ContentDetailVm, FlashcardVm, ScheduleWeekVm, map_content_cards,
    map_content_detail, map_schedule,
};
pub use markdown_vm::{markdown_to_html, markdown_to_plain, sanitize_html};
pub use progress_vm::{AttemptRowVm, ProgressVm, map_progress};
pub use quiz_vm::{CompletionVm, FeedbackVm, OptionState, OptionVm, QuizVm};
pub use time_fmt::format_date;
pub use voice_vm::{VoiceCommand, voice_command};
