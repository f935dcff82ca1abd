mod audio;
mod dashboard;
mod educator;
mod progress;
mod quiz;
mod state;
mod study;
mod voice;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use audio::NarrationPlayer;
pub use dashboard::DashboardView;
pub use educator::EducatorView;
pub use progress::ProgressView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study::{StudyContentView, StudyView};
pub use voice::VoiceNavigator;
