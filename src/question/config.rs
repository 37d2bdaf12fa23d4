//! Configuration options for question generation.
//!
//! This module provides the difficulty levels, the generation overrides and
//! the error type shared by every question family.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Difficulty level of a generated question.
///
/// Each question family decides what a level means. For matrix games it
/// controls the default dimensions of the payoff matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Smallest instances.
    Easy,
    /// The default level.
    #[default]
    Medium,
    /// Largest instances.
    Hard,
}

/// Largest dimension any difficulty picks on its own.
pub const MAX_DEFAULT_DIMENSION: usize = 4;

impl Difficulty {
    /// Pick a matrix dimension for this difficulty.
    ///
    /// - Easy: always 2
    /// - Medium: 2 or 3
    /// - Hard: 3 or 4
    pub fn default_dimension<R: Rng>(self, rng: &mut R) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => rng.gen_range(2..=3),
            Difficulty::Hard => rng.gen_range(3..=MAX_DEFAULT_DIMENSION),
        }
    }

    /// Lowercase name used in stored questions.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuestionError::InvalidConfiguration(format!(
                "unknown difficulty '{}'",
                other
            ))),
        }
    }
}

/// How much detail an explanation should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// A single line stating the answer.
    Concise,
    /// Step-by-step reasoning followed by a summary.
    #[default]
    Detailed,
}

/// Overrides applied on top of the difficulty defaults.
///
/// # Example
/// ```
/// use matrix_game_quiz::question::GenerateOptions;
///
/// let options = GenerateOptions::default().with_rows(3).with_payoff_range(-5, 5);
/// assert!(options.validate().is_ok());
/// assert_eq!(options.cols, None); // still chosen from the difficulty
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Number of rows (player 1 strategies). `None` picks from the difficulty.
    pub rows: Option<usize>,

    /// Number of columns (player 2 strategies). `None` picks from the difficulty.
    pub cols: Option<usize>,

    /// Smallest payoff that can be drawn (inclusive).
    pub min_payoff: i32,

    /// Largest payoff that can be drawn (inclusive).
    pub max_payoff: i32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            min_payoff: 0,
            max_payoff: 10,
        }
    }
}

impl GenerateOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: fix the number of rows.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Builder method: fix the number of columns.
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Builder method: set the inclusive payoff range.
    pub fn with_payoff_range(mut self, min_payoff: i32, max_payoff: i32) -> Self {
        self.min_payoff = min_payoff;
        self.max_payoff = max_payoff;
        self
    }

    /// Validate the options and return the first inconsistency found.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.min_payoff > self.max_payoff {
            return Err(QuestionError::InvalidConfiguration(format!(
                "min payoff {} is greater than max payoff {}",
                self.min_payoff, self.max_payoff
            )));
        }

        if self.rows == Some(0) {
            return Err(QuestionError::InvalidConfiguration(
                "rows must be at least 1".to_string(),
            ));
        }

        if self.cols == Some(0) {
            return Err(QuestionError::InvalidConfiguration(
                "cols must be at least 1".to_string(),
            ));
        }

        let rows = self.rows.unwrap_or(MAX_DEFAULT_DIMENSION);
        let cols = self.cols.unwrap_or(MAX_DEFAULT_DIMENSION);
        if rows.checked_mul(cols).is_none() {
            return Err(QuestionError::InvalidConfiguration(format!(
                "a {}x{} matrix has too many cells",
                rows, cols
            )));
        }

        Ok(())
    }

    /// Load options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, QuestionError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| QuestionError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Parse options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, QuestionError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}

/// Build the random source for a generation run.
///
/// A fixed seed gives reproducible questions; `None` seeds from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Errors raised by question generation and the registry.
///
/// Grading free text never produces one of these.
#[derive(Debug, Error)]
pub enum QuestionError {
    /// Generation parameters are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A game instance violates its structural invariants.
    #[error("invalid game instance: {0}")]
    InvalidInstance(String),

    /// No question type is registered under this name.
    #[error("unsupported question type: {0}")]
    UnsupportedType(String),

    /// Stored question data could not be converted to or from JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An options file could not be read.
    #[error("io error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerateOptions::default();
        assert_eq!(options.rows, None);
        assert_eq!(options.cols, None);
        assert_eq!(options.min_payoff, 0);
        assert_eq!(options.max_payoff, 10);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_inverted_payoff_range_rejected() {
        let options = GenerateOptions::default().with_payoff_range(5, 1);
        assert!(matches!(
            options.validate(),
            Err(QuestionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(GenerateOptions::default().with_rows(0).validate().is_err());
        assert!(GenerateOptions::default().with_cols(0).validate().is_err());
        assert!(GenerateOptions::default().with_rows(1).with_cols(1).validate().is_ok());
    }

    #[test]
    fn test_cell_count_overflow_rejected() {
        let huge = 1usize << (usize::BITS / 2);
        let options = GenerateOptions::default().with_rows(huge).with_cols(huge);
        assert!(matches!(
            options.validate(),
            Err(QuestionError::InvalidConfiguration(_))
        ));

        // The difficulty may still pick up to four columns.
        let options = GenerateOptions::default().with_rows(usize::MAX);
        assert!(options.validate().is_err());

        let options = GenerateOptions::default().with_rows(usize::MAX / 4);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_from_json() {
        let options = GenerateOptions::from_json_str(r#"{"rows": 3, "max_payoff": 4}"#).unwrap();
        assert_eq!(options.rows, Some(3));
        assert_eq!(options.cols, None);
        assert_eq!(options.min_payoff, 0);
        assert_eq!(options.max_payoff, 4);

        let invalid = GenerateOptions::from_json_str(r#"{"min_payoff": 9, "max_payoff": 1}"#);
        assert!(matches!(invalid, Err(QuestionError::InvalidConfiguration(_))));

        let malformed = GenerateOptions::from_json_str("{rows: 3");
        assert!(matches!(malformed, Err(QuestionError::Serialization(_))));
    }

    #[test]
    fn test_difficulty_dimensions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(Difficulty::Easy.default_dimension(&mut rng), 2);
            let medium = Difficulty::Medium.default_dimension(&mut rng);
            assert!((2..=3).contains(&medium));
            let hard = Difficulty::Hard.default_dimension(&mut rng);
            assert!((3..=4).contains(&hard));
        }
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" Hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = rng_from_seed(Some(3));
        let mut b = rng_from_seed(Some(3));
        for _ in 0..5 {
            assert_eq!(a.gen::<u32>(), b.gen::<u32>());
        }
    }
}
