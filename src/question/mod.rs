//! Question framework.
//!
//! This module provides the family-agnostic layer every question type plugs
//! into: difficulty and generation options, the [`QuestionType`] trait, and
//! the [`QuestionRegistry`] that dispatches by family name.
//!
//! # Lifecycle
//!
//! A question goes through four steps:
//!
//! 1. **Generate**: draw a random instance for a difficulty level
//! 2. **Solve**: compute the ground-truth answer from the instance alone
//! 3. **Evaluate**: grade a free-text answer with partial credit
//! 4. **Explain**: render the solution, concise or step by step
//!
//! # Example
//!
//! ```
//! use matrix_game_quiz::question::{rng_from_seed, DetailLevel, Difficulty, GenerateOptions, QuestionRegistry};
//!
//! let registry = QuestionRegistry::with_defaults();
//! let mut rng = rng_from_seed(Some(7));
//! let question = registry
//!     .generate("nash", Difficulty::Easy, &GenerateOptions::default(), &mut rng)
//!     .unwrap();
//!
//! let answer = registry.explain(&question, DetailLevel::Concise).unwrap();
//! let report = registry.evaluate(&question, &answer).unwrap();
//! assert!(report.score >= 50.0);
//! ```

pub mod config;
pub mod kind;
pub mod registry;

// Re-export main types for convenient access
pub use config::{rng_from_seed, DetailLevel, Difficulty, GenerateOptions, QuestionError};
pub use kind::{Question, QuestionType, Score};
pub use registry::{DynQuestionType, EvaluationReport, QuestionRegistry, StoredQuestion};
