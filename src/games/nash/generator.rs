//! Random payoff matrix generation.

use rand::Rng;

use crate::games::nash::instance::GameInstance;
use crate::question::{Difficulty, GenerateOptions, QuestionError};

/// Default row labels for up to three rows.
const ROW_LABELS: [&str; 3] = ["U", "M", "D"];

/// Default column labels for up to three columns.
const COL_LABELS: [&str; 3] = ["L", "C", "R"];

/// Generate a random game instance.
///
/// Dimensions come from `options` when set, otherwise from `difficulty`
/// (rows are drawn before columns). Every payoff is drawn independently and
/// uniformly from `[min_payoff, max_payoff]`, player 1 before player 2,
/// cells in row-major order.
///
/// Options are validated before any random draw, so a failed call leaves
/// the generator untouched.
pub fn generate_instance<R: Rng>(
    difficulty: Difficulty,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<GameInstance, QuestionError> {
    options.validate()?;

    let rows = match options.rows {
        Some(rows) => rows,
        None => difficulty.default_dimension(rng),
    };
    let cols = match options.cols {
        Some(cols) => cols,
        None => difficulty.default_dimension(rng),
    };

    let cells = rows.checked_mul(cols).ok_or_else(|| {
        QuestionError::InvalidConfiguration(format!("a {}x{} matrix has too many cells", rows, cols))
    })?;

    let range = options.min_payoff..=options.max_payoff;
    let payoffs = (0..cells)
        .map(|_| {
            let p1 = rng.gen_range(range.clone());
            let p2 = rng.gen_range(range.clone());
            (p1, p2)
        })
        .collect();

    log::debug!(
        "generated {}x{} {} game with payoffs in [{}, {}]",
        rows,
        cols,
        difficulty,
        options.min_payoff,
        options.max_payoff
    );

    GameInstance::new(rows, cols, payoffs, row_labels(rows), col_labels(cols))
}

/// Labels for `count` rows: `U, M, D` truncated, or `R1..Rn` beyond three.
pub fn row_labels(count: usize) -> Vec<String> {
    labels(count, &ROW_LABELS, 'R')
}

/// Labels for `count` columns: `L, C, R` truncated, or `C1..Cn` beyond three.
pub fn col_labels(count: usize) -> Vec<String> {
    labels(count, &COL_LABELS, 'C')
}

fn labels(count: usize, short: &[&str], prefix: char) -> Vec<String> {
    if count <= short.len() {
        short[..count].iter().map(|s| s.to_string()).collect()
    } else {
        (1..=count).map(|i| format!("{}{}", prefix, i)).collect()
    }
}
