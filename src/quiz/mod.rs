//! Quiz module - eight-question type estimate and country recommendation

mod questions;
mod scorer;

pub use questions::{Question, QUESTIONS};
pub use scorer::{
    recommend, score_quiz, Axis, Polarity, PolarityTally, QuizError, QuizOutcome, QuizResponse,
};
