//! Quiz Scorer
//! Tallies polarity answers into a four-letter code and recommends countries.

use super::questions::QUESTIONS;
use crate::data::{top_k, CountryTable, ProcessorError, RankedEntry, RatioKey, SchemaError};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Please answer the questions first")]
    NoResponse,
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Polarity {
    pub const ALL: [Polarity; 8] = [
        Polarity::E,
        Polarity::I,
        Polarity::S,
        Polarity::N,
        Polarity::T,
        Polarity::F,
        Polarity::J,
        Polarity::P,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Polarity::E | Polarity::I => Axis::EI,
            Polarity::S | Polarity::N => Axis::SN,
            Polarity::T | Polarity::F => Axis::TF,
            Polarity::J | Polarity::P => Axis::JP,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Polarity::E => 'E',
            Polarity::I => 'I',
            Polarity::S => 'S',
            Polarity::N => 'N',
            Polarity::T => 'T',
            Polarity::F => 'F',
            Polarity::J => 'J',
            Polarity::P => 'P',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    /// In code order.
    pub const ALL: [Axis; 4] = [Axis::EI, Axis::SN, Axis::TF, Axis::JP];

    pub fn sides(self) -> (Polarity, Polarity) {
        match self {
            Axis::EI => (Polarity::E, Polarity::I),
            Axis::SN => (Polarity::S, Polarity::N),
            Axis::TF => (Polarity::T, Polarity::F),
            Axis::JP => (Polarity::J, Polarity::P),
        }
    }

    /// The side that wins a tie.
    pub fn canonical(self) -> Polarity {
        self.sides().0
    }
}

/// Eight counters, one per letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolarityTally {
    counts: [u32; 8],
}

impl PolarityTally {
    pub fn add(&mut self, polarity: Polarity) {
        self.counts[polarity.index()] += 1;
    }

    pub fn count(&self, polarity: Polarity) -> u32 {
        self.counts[polarity.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Strictly greater count wins; a tie goes to the canonical side.
    pub fn resolve(&self, axis: Axis) -> Polarity {
        let (first, second) = axis.sides();
        if self.count(second) > self.count(first) {
            second
        } else {
            first
        }
    }

    pub fn code(&self) -> String {
        Axis::ALL
            .iter()
            .map(|axis| self.resolve(*axis).letter())
            .collect()
    }
}

impl FromIterator<Polarity> for PolarityTally {
    fn from_iter<It: IntoIterator<Item = Polarity>>(iter: It) -> Self {
        let mut tally = PolarityTally::default();
        for p in iter {
            tally.add(p);
        }
        tally
    }
}

/// Score a set of answers. `None` entries are unanswered questions.
pub fn score_quiz(responses: &[Option<Polarity>]) -> Result<String, QuizError> {
    let tally: PolarityTally = responses.iter().flatten().copied().collect();
    if tally.total() == 0 {
        return Err(QuizError::NoResponse);
    }
    Ok(tally.code())
}

/// Answer sheet for the fixed question bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizResponse {
    answers: [Option<Polarity>; 8],
}

impl QuizResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick option 0 or 1 of question `question`. Out-of-range picks are ignored.
    pub fn choose(&mut self, question: usize, option: usize) -> bool {
        let Some(q) = QUESTIONS.get(question) else {
            return false;
        };
        let Some((_, polarity)) = q.options.get(option) else {
            return false;
        };
        self.answers[question] = Some(*polarity);
        true
    }

    pub fn clear(&mut self, question: usize) {
        if let Some(slot) = self.answers.get_mut(question) {
            *slot = None;
        }
    }

    pub fn reset(&mut self) {
        self.answers = [None; 8];
    }

    /// Index of the chosen option for `question`, if answered.
    pub fn selected(&self, question: usize) -> Option<usize> {
        let answer = (*self.answers.get(question)?)?;
        QUESTIONS[question]
            .options
            .iter()
            .position(|(_, p)| *p == answer)
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn polarities(&self) -> &[Option<Polarity>] {
        &self.answers
    }

    pub fn score(&self) -> Result<String, QuizError> {
        score_quiz(&self.answers)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub code: String,
    pub countries: Vec<RankedEntry>,
}

/// Score the answers and rank countries by the resulting type.
pub fn recommend(
    table: &CountryTable,
    responses: &[Option<Polarity>],
    k: usize,
) -> Result<QuizOutcome, QuizError> {
    let code = score_quiz(responses)?;
    if !table.has_type_column(&code) {
        return Err(SchemaError::MissingTypeColumn(code).into());
    }
    let countries = top_k(table, &RatioKey::Column(code.clone()), k)?;
    Ok(QuizOutcome { code, countries })
}
