//! Strategic-form game instances.
//!
//! A [`GameInstance`] is a two-player payoff matrix with labelled strategies.
//! Player 1 picks a row, player 2 picks a column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::question::QuestionError;

/// Payoff pair `(player 1, player 2)` for one cell.
pub type Payoffs = (i32, i32);

/// A cell of the payoff matrix.
///
/// Ordering is row-major: by row, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index (player 1 strategy).
    pub row: usize,
    /// Column index (player 2 strategy).
    pub col: usize,
}

impl Position {
    /// Create a position from a row and a column index.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Serialized layout of a [`GameInstance`]; checked before it becomes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGameInstance {
    rows: usize,
    cols: usize,
    payoffs: Vec<Payoffs>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

/// An immutable two-player payoff matrix.
///
/// Invariants, checked on construction and on deserialization:
/// - `rows >= 1` and `cols >= 1`
/// - exactly one payoff pair per cell (stored row-major)
/// - `row_labels` / `col_labels` have one unique entry per row / column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameInstance", into = "RawGameInstance")]
pub struct GameInstance {
    rows: usize,
    cols: usize,
    payoffs: Vec<Payoffs>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

impl GameInstance {
    /// Create an instance from row-major payoffs and strategy labels.
    pub fn new(
        rows: usize,
        cols: usize,
        payoffs: Vec<Payoffs>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    ) -> Result<Self, QuestionError> {
        if rows == 0 || cols == 0 {
            return Err(QuestionError::InvalidInstance(format!(
                "dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        let cells = rows.checked_mul(cols).ok_or_else(|| {
            QuestionError::InvalidInstance(format!("a {}x{} game has too many cells", rows, cols))
        })?;
        if payoffs.len() != cells {
            return Err(QuestionError::InvalidInstance(format!(
                "expected {} payoff cells for a {}x{} game, got {}",
                cells,
                rows,
                cols,
                payoffs.len()
            )));
        }
        check_labels("row", &row_labels, rows)?;
        check_labels("column", &col_labels, cols)?;

        Ok(Self {
            rows,
            cols,
            payoffs,
            row_labels,
            col_labels,
        })
    }

    /// Create an instance from separate player 1 and player 2 matrices.
    ///
    /// Convenient for hand-written games:
    /// ```
    /// use matrix_game_quiz::games::nash::GameInstance;
    ///
    /// let game = GameInstance::from_matrices(
    ///     &[vec![3, 0], vec![5, 1]],
    ///     &[vec![3, 5], vec![0, 1]],
    ///     &["U", "D"],
    ///     &["L", "R"],
    /// )
    /// .unwrap();
    /// assert_eq!(game.payoffs_at(1, 0), (5, 0));
    /// ```
    pub fn from_matrices(
        player1: &[Vec<i32>],
        player2: &[Vec<i32>],
        row_labels: &[&str],
        col_labels: &[&str],
    ) -> Result<Self, QuestionError> {
        let rows = player1.len();
        let cols = player1.first().map_or(0, Vec::len);

        if player2.len() != rows
            || player1.iter().chain(player2.iter()).any(|row| row.len() != cols)
        {
            return Err(QuestionError::InvalidInstance(
                "player matrices must share the same rectangular shape".to_string(),
            ));
        }

        let payoffs = player1
            .iter()
            .zip(player2.iter())
            .flat_map(|(r1, r2)| r1.iter().copied().zip(r2.iter().copied()))
            .collect();

        Self::new(
            rows,
            cols,
            payoffs,
            row_labels.iter().map(|s| s.to_string()).collect(),
            col_labels.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Number of rows (player 1 strategies).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (player 2 strategies).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Payoff pair at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the cell is outside the matrix.
    pub fn payoffs_at(&self, row: usize, col: usize) -> Payoffs {
        assert!(row < self.rows && col < self.cols, "cell ({}, {}) out of bounds", row, col);
        self.payoffs[row * self.cols + col]
    }

    /// Payoff pair at a position.
    pub fn payoffs(&self, position: Position) -> Payoffs {
        self.payoffs_at(position.row, position.col)
    }

    /// Row labels, one per row.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Column labels, one per column.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Every cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Label a position as `(row, col)`, e.g. `(U, L)`.
    pub fn label(&self, position: Position) -> String {
        format!(
            "({}, {})",
            self.row_labels[position.row], self.col_labels[position.col]
        )
    }
}

impl TryFrom<RawGameInstance> for GameInstance {
    type Error = QuestionError;

    fn try_from(raw: RawGameInstance) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.cols, raw.payoffs, raw.row_labels, raw.col_labels)
    }
}

impl From<GameInstance> for RawGameInstance {
    fn from(instance: GameInstance) -> Self {
        Self {
            rows: instance.rows,
            cols: instance.cols,
            payoffs: instance.payoffs,
            row_labels: instance.row_labels,
            col_labels: instance.col_labels,
        }
    }
}

impl fmt::Display for GameInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}", "")?;
        for label in &self.col_labels {
            write!(f, "  {:>8}", label)?;
        }
        writeln!(f)?;
        writeln!(f, "{:>4}{}", "", "-".repeat(10 * self.cols))?;

        for (row, label) in self.row_labels.iter().enumerate() {
            write!(f, "{:>2} |", label)?;
            for col in 0..self.cols {
                let (p1, p2) = self.payoffs_at(row, col);
                let cell = format!("({:>2},{:>2})", p1, p2);
                write!(f, "  {:>8}", cell)?;
            }
            if row + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

fn check_labels(kind: &str, labels: &[String], expected: usize) -> Result<(), QuestionError> {
    if labels.len() != expected {
        return Err(QuestionError::InvalidInstance(format!(
            "expected {} {} labels, got {}",
            expected,
            kind,
            labels.len()
        )));
    }
    for (i, label) in labels.iter().enumerate() {
        if label.trim().is_empty() {
            return Err(QuestionError::InvalidInstance(format!("empty {} label", kind)));
        }
        if labels[..i].iter().any(|other| other.eq_ignore_ascii_case(label)) {
            return Err(QuestionError::InvalidInstance(format!(
                "duplicate {} label '{}'",
                kind, label
            )));
        }
    }
    Ok(())
}
