//! # Matrix Game Quiz
//!
//! Generates randomized two-player matrix games, computes their exact pure
//! Nash equilibria, and grades free-text student answers with partial credit.
//!
//! ## Features
//!
//! - **Matrix Generation**: Random payoff matrices sized by difficulty, reproducible from a seed
//! - **Exact Solving**: Weak best-response check on every cell
//! - **Explanations**: Concise one-liners or per-cell step-by-step reasoning
//! - **Answer Interpretation**: Weighted pattern tables decide what a free-text answer claims
//! - **Partial Credit**: 50 points for existence, 50 for positions, with false-positive penalties
//!
//! ## Quick Start
//!
//! ```
//! use matrix_game_quiz::games::nash;
//! use matrix_game_quiz::question::{rng_from_seed, Difficulty, GenerateOptions};
//!
//! // 1. Generate a game
//! let mut rng = rng_from_seed(Some(42));
//! let game = nash::generate(Difficulty::Easy, &GenerateOptions::default(), &mut rng).unwrap();
//! println!("{}", game.question_text);
//!
//! // 2. Grade an answer
//! let score = nash::grade("Yes, at (U, L)", &game.instance, &game.solution);
//! println!("{:.2} {:?}", score.value(), score.feedback());
//! ```
//!
//! ## Modules
//!
//! - [`question`]: Difficulty, options, the `QuestionType` trait and the registry
//! - [`games`]: Question family implementations (Nash equilibrium)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  QuestionRegistry (Generic)                     │
//! │  - Dispatch by family name    - Parallel batch generation       │
//! │  - JSON storage form          - Evaluation reports              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements QuestionType trait
//!                               ▼
//!                        ┌─────────────┐
//!                        │    Nash     │
//!                        │ Equilibrium │
//!                        └─────────────┘
//!                               │
//!         ┌──────────┬──────────┼──────────┬──────────┐
//!         ▼          ▼          ▼          ▼          ▼
//!    generator    solver     explain   interpret    score
//! ```

#![warn(missing_docs)]

/// Question framework module.
///
/// Family-agnostic types, the `QuestionType` trait and the registry.
pub mod question;

/// Question family implementations module.
///
/// Contains the Nash equilibrium quiz.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use games::nash::{EquilibriumSet, GameInstance, NashEquilibrium, Position, StudentClaim};
pub use question::{
    DetailLevel, Difficulty, EvaluationReport, GenerateOptions, QuestionError, QuestionRegistry, QuestionType, Score,
    StoredQuestion,
};
