#![forbid(unsafe_code)]

pub mod model;
pub mod quiz;
pub mod script;
pub mod time;

pub use quiz::{Advance, Quiz, QuizError, QuizInput, QuizScore, QuizState, Selection};
pub use time::Clock;
