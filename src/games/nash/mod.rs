//! Pure Nash equilibrium questions for two-player matrix games.
//!
//! ## Question
//!
//! The student sees a random payoff matrix and is asked whether a pure
//! Nash equilibrium exists and, if so, where:
//!
//! ```text
//!              L         R
//!     --------------------
//!  U |  ( 7, 2)   ( 1, 9)
//!  D |  ( 4, 4)   ( 3, 8)
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! generate_instance ──► GameInstance ──► find_equilibria ──► EquilibriumSet
//!                            │                                    │
//!                            └───────────► render_* ◄─────────────┘
//!
//! answer text ──► interpret ──► StudentClaim ──► score ──► Score
//! ```
//!
//! Every stage is a pure function; randomness only enters through the RNG
//! passed to [`generate`].

pub mod explain;
pub mod generator;
pub mod instance;
pub mod interpret;
pub mod score;
pub mod solver;

use rand::Rng;

use crate::question::{DetailLevel, Difficulty, GenerateOptions, Question, QuestionError, QuestionType, Score};

pub use explain::{render, render_concise, render_detailed, render_question};
pub use generator::generate_instance;
pub use instance::{GameInstance, Payoffs, Position};
pub use interpret::{interpret, ClaimKind, StudentClaim};
pub use solver::{find_equilibria, EquilibriumSet, Response};

/// Everything produced when a game is generated.
#[derive(Debug, Clone)]
pub struct GeneratedGame {
    /// The payoff matrix.
    pub instance: GameInstance,
    /// Its pure Nash equilibria.
    pub solution: EquilibriumSet,
    /// Prompt shown to the student.
    pub question_text: String,
    /// Step-by-step solution.
    pub explanation: String,
}

/// Generate a game, solve it, and render its question and explanation.
pub fn generate<R: Rng>(
    difficulty: Difficulty,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<GeneratedGame, QuestionError> {
    let instance = generate_instance(difficulty, options, rng)?;
    let solution = find_equilibria(&instance);
    let question_text = render_question(&instance);
    let explanation = render_detailed(&instance, &solution);

    Ok(GeneratedGame {
        instance,
        solution,
        question_text,
        explanation,
    })
}

/// Grade a free-text answer against a solved game.
pub fn grade(answer_text: &str, instance: &GameInstance, solution: &EquilibriumSet) -> Score {
    let claim = interpret(answer_text, instance.row_labels(), instance.col_labels());
    score::score(&claim, solution, instance)
}

/// The pure Nash equilibrium question family.
#[derive(Debug, Clone, Copy, Default)]
pub struct NashEquilibrium;

impl NashEquilibrium {
    /// Name the family is registered under.
    pub const NAME: &'static str = "nash";

    /// Create the question family.
    pub fn new() -> Self {
        Self
    }
}

impl QuestionType for NashEquilibrium {
    type Data = GameInstance;
    type Answer = EquilibriumSet;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn generate_question<R: Rng>(
        &self,
        difficulty: Difficulty,
        options: &GenerateOptions,
        rng: &mut R,
    ) -> Result<Question<Self::Data, Self::Answer>, QuestionError> {
        let instance = generate_instance(difficulty, options, rng)?;
        let answer = self.generate_answer(&instance);

        Ok(Question {
            kind: Self::NAME.to_string(),
            difficulty,
            text: render_question(&instance),
            data: instance,
            answer,
        })
    }

    fn generate_answer(&self, data: &Self::Data) -> Self::Answer {
        find_equilibria(data)
    }

    fn evaluate_answer(&self, student_answer: &str, answer: &Self::Answer, data: &Self::Data) -> Score {
        grade(student_answer, data, answer)
    }

    fn explain(&self, data: &Self::Data, detail: DetailLevel) -> String {
        render(data, &self.generate_answer(data), detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_is_consistent() {
        let mut rng = StdRng::seed_from_u64(2024);
        let game = generate(Difficulty::Medium, &GenerateOptions::default(), &mut rng).unwrap();
        assert_eq!(game.solution, find_equilibria(&game.instance));
        assert_eq!(game.question_text, render_question(&game.instance));
        assert_eq!(game.explanation, render_detailed(&game.instance, &game.solution));
    }

    #[test]
    fn test_generate_rejects_bad_options() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = GenerateOptions::default().with_payoff_range(1, 0);
        assert!(matches!(
            generate(Difficulty::Easy, &options, &mut rng),
            Err(QuestionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_concise_answer_scores_all_available_points() {
        let mut rng = StdRng::seed_from_u64(77);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for _ in 0..30 {
                let game = generate(difficulty, &GenerateOptions::default(), &mut rng).unwrap();
                let answer = render_concise(&game.instance, &game.solution);
                let result = grade(&answer, &game.instance, &game.solution);
                // Without equilibria only the existence points are on offer.
                let expected = if game.solution.exists() { 100.0 } else { 50.0 };
                assert_eq!(result.value(), expected, "{}\n{:?}", answer, result.feedback());
            }
        }
    }

    #[test]
    fn test_grade_examples() {
        let instance = GameInstance::from_matrices(
            &[vec![2, 0], vec![0, 1]],
            &[vec![2, 0], vec![0, 1]],
            &["U", "D"],
            &["L", "R"],
        )
        .unwrap();
        let solution = find_equilibria(&instance);

        assert_eq!(grade("Yes: (U, L) and (D, R)", &instance, &solution).value(), 100.0);
        assert_eq!(grade("Nash equilibrium at (U, L)", &instance, &solution).value(), 75.0);
        assert_eq!(grade("There are equilibria", &instance, &solution).value(), 50.0);
        assert_eq!(grade("No equilibrium exists", &instance, &solution).value(), 0.0);
        assert_eq!(grade("", &instance, &solution).value(), 0.0);
    }

    #[test]
    fn test_question_type_capabilities() {
        let nash = NashEquilibrium::new();
        let mut rng = StdRng::seed_from_u64(8);
        let question = nash
            .generate_question(Difficulty::Hard, &GenerateOptions::default(), &mut rng)
            .unwrap();
        assert_eq!(question.kind, "nash");
        assert_eq!(question.difficulty, Difficulty::Hard);
        assert_eq!(question.answer, nash.generate_answer(&question.data));

        let concise = nash.explain(&question.data, DetailLevel::Concise);
        let score = nash.evaluate_answer(&concise, &question.answer, &question.data);
        let expected = if question.answer.exists() { 100.0 } else { 50.0 };
        assert_eq!(score.value(), expected);
        assert!(nash.explain(&question.data, DetailLevel::Detailed).contains("CONCLUSION:"));
    }
}
