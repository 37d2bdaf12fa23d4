//! Partial-credit scoring of a student claim.
//!
//! ## Scoring
//!
//! - **Existence (50 points)**: the claim matches whether an equilibrium exists.
//! - **Positions (50 points)**: only when equilibria exist.
//!   - Exact match of the equilibrium set: full 50.
//!   - No positions named: 0.
//!   - Otherwise, with `C` the true equilibria and `S` the claimed cells:
//!
//! ```text
//! base    = |C ∩ S| / |C| * 50
//! penalty = min(|S \ C| / |C| * 25, base / 2)
//! points  = max(0, base - penalty)
//! ```

use std::collections::BTreeSet;

use crate::games::nash::instance::{GameInstance, Position};
use crate::games::nash::interpret::StudentClaim;
use crate::games::nash::solver::EquilibriumSet;
use crate::question::Score;

/// Points available for the existence verdict.
pub const EXISTENCE_POINTS: f64 = 50.0;

/// Points available for naming the equilibrium positions.
pub const POSITION_POINTS: f64 = 50.0;

/// Score a claim against the solved game.
///
/// Feedback starts with the existence verdict, followed by the position
/// verdict and details when equilibria exist.
pub fn score(claim: &StudentClaim, solution: &EquilibriumSet, instance: &GameInstance) -> Score {
    let mut feedback = Vec::new();
    let mut total = 0.0;

    let correct_exists = solution.exists();
    if claim.existence_claim == correct_exists {
        total += EXISTENCE_POINTS;
        if correct_exists {
            feedback.push("Correct: you identified that a pure Nash equilibrium exists".to_string());
        } else {
            feedback.push("Correct: you identified that no pure Nash equilibrium exists".to_string());
        }
    } else if claim.existence_claim {
        feedback.push("Incorrect: you said a pure Nash equilibrium exists, but none does".to_string());
    } else {
        feedback.push(
            "Incorrect: you said no pure Nash equilibrium exists, but at least one does".to_string(),
        );
    }

    if correct_exists {
        total += score_positions(claim, solution, instance, &mut feedback);
    }

    let score = Score::new(total, feedback);
    log::debug!("scored answer {:.2} ({} feedback lines)", score.value(), score.feedback().len());
    score
}

fn score_positions(
    claim: &StudentClaim,
    solution: &EquilibriumSet,
    instance: &GameInstance,
    feedback: &mut Vec<String>,
) -> f64 {
    let correct: BTreeSet<Position> = solution.positions().iter().copied().collect();
    let claimed = &claim.claimed_positions;

    if *claimed == correct {
        feedback.push("Perfect: all pure Nash equilibria identified with no errors".to_string());
        return POSITION_POINTS;
    }
    if claimed.is_empty() {
        feedback.push("No positions provided: you didn't specify where the equilibria are".to_string());
        return 0.0;
    }

    let found: Vec<Position> = claimed.intersection(&correct).copied().collect();
    let wrong: Vec<Position> = claimed.difference(&correct).copied().collect();
    let missed: Vec<Position> = correct.difference(claimed).copied().collect();
    let total = correct.len() as f64;

    let base = found.len() as f64 / total * POSITION_POINTS;
    let penalty = (wrong.len() as f64 / total * (POSITION_POINTS / 2.0)).min(base * 0.5);
    let points = (base - penalty).max(0.0);

    log::debug!(
        "positions: {} found, {} wrong, {} missed -> base {:.2}, penalty {:.2}",
        found.len(),
        wrong.len(),
        missed.len(),
        base,
        penalty
    );

    if !found.is_empty() {
        feedback.push(format!(
            "Partial: correctly found {}/{} equilibria: {}",
            found.len(),
            correct.len(),
            labels(instance, &found)
        ));
    }
    if !wrong.is_empty() {
        feedback.push(format!(
            "Error: incorrectly identified {} non-equilibria: {}",
            wrong.len(),
            labels(instance, &wrong)
        ));
    }
    if !missed.is_empty() {
        feedback.push(format!(
            "Missed: {} equilibria not found: {}",
            missed.len(),
            labels(instance, &missed)
        ));
    }

    points
}

/// Labels for positions inside the matrix; out-of-range cells are shown by index.
fn labels(instance: &GameInstance, positions: &[Position]) -> String {
    positions
        .iter()
        .map(|&p| {
            if p.row < instance.rows() && p.col < instance.cols() {
                instance.label(p)
            } else {
                format!("({}, {})", p.row, p.col)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
