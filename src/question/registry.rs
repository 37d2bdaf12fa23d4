//! Registry of question families.
//!
//! The registry is an explicit factory map built once at startup and handed
//! to whatever layer stores and serves questions. Question data crosses the
//! registry as JSON so the caller can persist it without knowing the family.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::games::nash::NashEquilibrium;
use crate::question::config::{DetailLevel, Difficulty, GenerateOptions, QuestionError};
use crate::question::kind::QuestionType;

/// A question in the form an external store keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuestion {
    /// Name of the question family.
    pub kind: String,
    /// Difficulty the question was generated at.
    pub difficulty: Difficulty,
    /// Human-readable prompt.
    pub question_text: String,
    /// Family-specific data as JSON.
    pub question_data: serde_json::Value,
    /// Correct answer as JSON.
    pub correct_answer: serde_json::Value,
    /// Detailed explanation, rendered once at generation time.
    pub explanation: String,
}

/// Outcome of grading a stored question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Score between 0 and 100.
    pub score: f64,
    /// Ordered feedback lines.
    pub feedback: Vec<String>,
    /// The correct answer as JSON.
    pub correct_answer: serde_json::Value,
    /// Detailed explanation of the solution.
    pub explanation: String,
}

/// Object-safe view of a [`QuestionType`].
///
/// Implemented for every `QuestionType`, so families never implement it by hand.
pub trait DynQuestionType: Send + Sync {
    /// Name the family is registered under.
    fn kind(&self) -> &'static str;

    /// Generate a question and erase it to its stored form.
    fn generate(
        &self,
        difficulty: Difficulty,
        options: &GenerateOptions,
        rng: &mut dyn RngCore,
    ) -> Result<StoredQuestion, QuestionError>;

    /// Grade a free-text answer against a stored question.
    fn evaluate(&self, question: &StoredQuestion, student_answer: &str) -> Result<EvaluationReport, QuestionError>;

    /// Render an explanation for a stored question.
    fn explain(&self, question: &StoredQuestion, detail: DetailLevel) -> Result<String, QuestionError>;
}

impl<T: QuestionType> DynQuestionType for T {
    fn kind(&self) -> &'static str {
        QuestionType::name(self)
    }

    fn generate(
        &self,
        difficulty: Difficulty,
        options: &GenerateOptions,
        mut rng: &mut dyn RngCore,
    ) -> Result<StoredQuestion, QuestionError> {
        let question = self.generate_question(difficulty, options, &mut rng)?;
        let explanation = QuestionType::explain(self, &question.data, DetailLevel::Detailed);

        Ok(StoredQuestion {
            kind: question.kind,
            difficulty: question.difficulty,
            question_text: question.text,
            question_data: serde_json::to_value(&question.data)?,
            correct_answer: serde_json::to_value(&question.answer)?,
            explanation,
        })
    }

    fn evaluate(&self, question: &StoredQuestion, student_answer: &str) -> Result<EvaluationReport, QuestionError> {
        let data: T::Data = serde_json::from_value(question.question_data.clone())?;
        let answer: T::Answer = serde_json::from_value(question.correct_answer.clone())?;
        let score = self.evaluate_answer(student_answer, &answer, &data);

        Ok(EvaluationReport {
            score: score.value(),
            feedback: score.feedback().to_vec(),
            correct_answer: question.correct_answer.clone(),
            explanation: QuestionType::explain(self, &data, DetailLevel::Detailed),
        })
    }

    fn explain(&self, question: &StoredQuestion, detail: DetailLevel) -> Result<String, QuestionError> {
        if detail == DetailLevel::Detailed && !question.explanation.is_empty() {
            return Ok(question.explanation.clone());
        }
        let data: T::Data = serde_json::from_value(question.question_data.clone())?;
        Ok(QuestionType::explain(self, &data, detail))
    }
}

/// Factory map from family name to implementation.
///
/// # Example
/// ```
/// use matrix_game_quiz::question::{Difficulty, GenerateOptions, QuestionRegistry};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let registry = QuestionRegistry::with_defaults();
/// let mut rng = StdRng::seed_from_u64(42);
/// let question = registry
///     .generate("nash", Difficulty::Easy, &GenerateOptions::default(), &mut rng)
///     .unwrap();
/// assert_eq!(question.kind, "nash");
/// ```
#[derive(Default)]
pub struct QuestionRegistry {
    types: FxHashMap<&'static str, Box<dyn DynQuestionType>>,
}

impl QuestionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in family.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NashEquilibrium::new());
        registry
    }

    /// Register a family under its own name, replacing any previous one.
    pub fn register<T: QuestionType + 'static>(&mut self, question_type: T) {
        let name = QuestionType::name(&question_type);
        log::debug!("registering question type {}", name);
        self.types.insert(name, Box::new(question_type));
    }

    /// Look up a family by name.
    pub fn get(&self, kind: &str) -> Result<&dyn DynQuestionType, QuestionError> {
        self.types
            .get(kind)
            .map(|t| &**t)
            .ok_or_else(|| QuestionError::UnsupportedType(kind.to_string()))
    }

    /// Registered family names, sorted.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<&'static str> = self.types.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Generate one question of the given family.
    pub fn generate(
        &self,
        kind: &str,
        difficulty: Difficulty,
        options: &GenerateOptions,
        rng: &mut dyn RngCore,
    ) -> Result<StoredQuestion, QuestionError> {
        self.get(kind)?.generate(difficulty, options, rng)
    }

    /// Generate `count` questions in parallel.
    ///
    /// Question `k` is drawn from `StdRng::seed_from_u64(seed + k)`, so the
    /// batch is reproducible no matter how the work is scheduled.
    pub fn generate_batch(
        &self,
        kind: &str,
        count: usize,
        difficulty: Difficulty,
        options: &GenerateOptions,
        seed: u64,
    ) -> Result<Vec<StoredQuestion>, QuestionError> {
        self.generate_batch_with_callback(kind, count, difficulty, options, seed, |_| {})
    }

    /// Generate a batch with a callback for progress tracking.
    ///
    /// `callback` receives the number of questions completed so far and may
    /// be called from several threads.
    pub fn generate_batch_with_callback<F>(
        &self,
        kind: &str,
        count: usize,
        difficulty: Difficulty,
        options: &GenerateOptions,
        seed: u64,
        callback: F,
    ) -> Result<Vec<StoredQuestion>, QuestionError>
    where
        F: Fn(usize) + Sync,
    {
        let question_type = self.get(kind)?;
        options.validate()?;

        let completed = AtomicUsize::new(0);
        let questions = (0..count)
            .into_par_iter()
            .map(|k| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
                let question = question_type.generate(difficulty, options, &mut rng)?;
                callback(completed.fetch_add(1, Ordering::Relaxed) + 1);
                Ok(question)
            })
            .collect::<Result<Vec<_>, QuestionError>>()?;

        log::info!("generated {} {} questions ({})", questions.len(), kind, difficulty);
        Ok(questions)
    }

    /// Grade a free-text answer to a stored question.
    pub fn evaluate(&self, question: &StoredQuestion, student_answer: &str) -> Result<EvaluationReport, QuestionError> {
        self.get(&question.kind)?.evaluate(question, student_answer)
    }

    /// Explain a stored question at the requested detail level.
    pub fn explain(&self, question: &StoredQuestion, detail: DetailLevel) -> Result<String, QuestionError> {
        self.get(&question.kind)?.explain(question, detail)
    }
}
