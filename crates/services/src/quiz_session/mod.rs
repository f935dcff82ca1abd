mod controller;
mod progress;

// Public API of the quiz session subsystem.
pub use controller::{QuizEvent, QuizSessionController};
pub use progress::QuizProgress;
