//! Question type trait definition.
//!
//! Any question family that implements `QuestionType` can be generated,
//! answered, graded and explained through the same interface, and can be
//! registered in a [`QuestionRegistry`](crate::question::QuestionRegistry).

use std::fmt::Debug;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::question::config::{DetailLevel, Difficulty, GenerateOptions, QuestionError};

/// A generated question with its typed data and correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question<D, A> {
    /// Name of the question family (e.g. `"nash"`).
    pub kind: String,
    /// Difficulty the question was generated at.
    pub difficulty: Difficulty,
    /// Human-readable question prompt.
    pub text: String,
    /// Family-specific question data.
    pub data: D,
    /// Correct answer computed from `data`.
    pub answer: A,
}

/// Result of grading one free-text answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    value: f64,
    feedback: Vec<String>,
}

impl Score {
    /// Create a score, rounding the value to two decimal places.
    pub fn new(value: f64, feedback: Vec<String>) -> Self {
        Self {
            value: (value * 100.0).round() / 100.0,
            feedback,
        }
    }

    /// Score between 0 and 100.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Feedback lines in the order they were produced.
    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }
}

/// The capability set every question family provides.
///
/// # Type Parameters
/// - `Data`: the question structure (e.g. a payoff matrix)
/// - `Answer`: the computed ground truth for that structure
///
/// # Example
/// ```ignore
/// struct Minimax;
///
/// impl QuestionType for Minimax {
///     type Data = GameTree;
///     type Answer = MinimaxValue;
///
///     // ... implement required methods
/// }
/// ```
pub trait QuestionType: Send + Sync {
    /// The question structure shown to the student.
    type Data: Clone + Debug + Serialize + DeserializeOwned + Send + Sync;

    /// The ground truth derived from `Data`.
    type Answer: Clone + Debug + Serialize + DeserializeOwned + Send + Sync;

    /// Name the family is registered under.
    fn name(&self) -> &'static str;

    /// Generate a new random question.
    ///
    /// Fails with [`QuestionError::InvalidConfiguration`] before drawing any
    /// randomness when `options` are inconsistent.
    fn generate_question<R: Rng>(
        &self,
        difficulty: Difficulty,
        options: &GenerateOptions,
        rng: &mut R,
    ) -> Result<Question<Self::Data, Self::Answer>, QuestionError>;

    /// Compute the correct answer for some question data.
    fn generate_answer(&self, data: &Self::Data) -> Self::Answer;

    /// Grade a free-text answer against the correct one.
    ///
    /// Never fails: unreadable answers simply score low.
    fn evaluate_answer(&self, student_answer: &str, answer: &Self::Answer, data: &Self::Data) -> Score;

    /// Explain how the question is solved.
    fn explain(&self, data: &Self::Data, detail: DetailLevel) -> String;
}
