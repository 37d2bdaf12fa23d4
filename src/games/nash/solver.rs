//! Pure-strategy Nash equilibrium detection.
//!
//! Every cell is checked by brute force: player 1 must be best responding
//! within its column and player 2 within its row. The cost is
//! `O(rows * cols * (rows + cols))`, which is trivial at quiz sizes.
//!
//! # Best response
//!
//! A player is best responding at a cell when no alternative strategy gives
//! a *strictly* greater payoff against the fixed opponent strategy. Ties do
//! not break best-response status, so several cells sharing the maximal
//! payoff can all be equilibria at once:
//!
//! ```text
//!          L        R
//!   U  ( 1, 1)  ( 1, 1)
//!   D  ( 1, 1)  ( 1, 1)    -> all four cells are equilibria
//! ```

use serde::{Deserialize, Serialize};

use crate::games::nash::instance::{GameInstance, Position};
use crate::question::QuestionError;

/// How a player fares at a cell when the opponent's strategy is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// No alternative is strictly better.
    Best,
    /// Switching to strategy `to` yields the strictly greater `payoff`.
    ///
    /// `to` is the lowest-indexed strictly better alternative.
    Deviation {
        /// Index of the better row (player 1) or column (player 2).
        to: usize,
        /// Payoff the player would get after switching.
        payoff: i32,
    },
}

impl Response {
    /// Whether the player is best responding.
    pub fn is_best(self) -> bool {
        matches!(self, Response::Best)
    }
}

/// Player 1's response at `position`: compare rows within the column.
pub fn row_player_response(instance: &GameInstance, position: Position) -> Response {
    let (current, _) = instance.payoffs(position);
    (0..instance.rows())
        .filter(|&row| row != position.row)
        .map(|row| (row, instance.payoffs_at(row, position.col).0))
        .find(|&(_, payoff)| payoff > current)
        .map_or(Response::Best, |(to, payoff)| Response::Deviation { to, payoff })
}

/// Player 2's response at `position`: compare columns within the row.
pub fn col_player_response(instance: &GameInstance, position: Position) -> Response {
    let (_, current) = instance.payoffs(position);
    (0..instance.cols())
        .filter(|&col| col != position.col)
        .map(|col| (col, instance.payoffs_at(position.row, col).1))
        .find(|&(_, payoff)| payoff > current)
        .map_or(Response::Best, |(to, payoff)| Response::Deviation { to, payoff })
}

/// Whether `position` is a pure Nash equilibrium.
pub fn is_equilibrium(instance: &GameInstance, position: Position) -> bool {
    row_player_response(instance, position).is_best() && col_player_response(instance, position).is_best()
}

/// Serialized layout of an [`EquilibriumSet`]; checked before it becomes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEquilibriumSet {
    exists: bool,
    positions: Vec<Position>,
}

/// All pure Nash equilibria of a game.
///
/// `exists` is true exactly when `positions` is non-empty. Positions are
/// kept in row-major order without duplicates. Both hold after
/// deserialization too: positions are normalized and a contradicting
/// `exists` flag is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEquilibriumSet", into = "RawEquilibriumSet")]
pub struct EquilibriumSet {
    exists: bool,
    positions: Vec<Position>,
}

impl TryFrom<RawEquilibriumSet> for EquilibriumSet {
    type Error = QuestionError;

    fn try_from(raw: RawEquilibriumSet) -> Result<Self, Self::Error> {
        if raw.exists == raw.positions.is_empty() {
            return Err(QuestionError::InvalidInstance(format!(
                "equilibrium set says exists = {} but lists {} positions",
                raw.exists,
                raw.positions.len()
            )));
        }
        Ok(Self::from_positions(raw.positions))
    }
}

impl From<EquilibriumSet> for RawEquilibriumSet {
    fn from(set: EquilibriumSet) -> Self {
        Self {
            exists: set.exists,
            positions: set.positions,
        }
    }
}

impl EquilibriumSet {
    /// Build a set from arbitrary positions, sorting and de-duplicating them.
    pub fn from_positions(mut positions: Vec<Position>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        Self {
            exists: !positions.is_empty(),
            positions,
        }
    }

    /// The empty set: no equilibrium exists.
    pub fn none() -> Self {
        Self::from_positions(Vec::new())
    }

    /// Whether at least one equilibrium exists.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Equilibrium cells in row-major order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of equilibria.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether `position` is one of the equilibria.
    pub fn contains(&self, position: Position) -> bool {
        self.positions.binary_search(&position).is_ok()
    }
}

/// Find every pure Nash equilibrium of `instance`.
///
/// Deterministic: the same instance always yields the same ordered result.
pub fn find_equilibria(instance: &GameInstance) -> EquilibriumSet {
    let positions: Vec<Position> = instance
        .positions()
        .filter(|&position| is_equilibrium(instance, position))
        .collect();

    log::debug!(
        "found {} pure equilibria in {}x{} game",
        positions.len(),
        instance.rows(),
        instance.cols()
    );

    EquilibriumSet {
        exists: !positions.is_empty(),
        positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nash::generator::generate_instance;
    use crate::question::{Difficulty, GenerateOptions};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn game(p1: &[Vec<i32>], p2: &[Vec<i32>], rows: &[&str], cols: &[&str]) -> GameInstance {
        GameInstance::from_matrices(p1, p2, rows, cols).unwrap()
    }

    /// Rebuild `instance` with rows reordered: new row `k` is old row `order[k]`.
    fn permute_rows(instance: &GameInstance, order: &[usize]) -> GameInstance {
        let payoffs = order
            .iter()
            .flat_map(|&old| (0..instance.cols()).map(move |col| instance.payoffs_at(old, col)))
            .collect();
        let labels = order.iter().map(|&old| instance.row_labels()[old].clone()).collect();
        GameInstance::new(instance.rows(), instance.cols(), payoffs, labels, instance.col_labels().to_vec()).unwrap()
    }

    /// Rebuild `instance` with columns reordered: new column `k` is old column `order[k]`.
    fn permute_cols(instance: &GameInstance, order: &[usize]) -> GameInstance {
        let payoffs = (0..instance.rows())
            .flat_map(|row| order.iter().map(move |&old| instance.payoffs_at(row, old)))
            .collect();
        let labels = order.iter().map(|&old| instance.col_labels()[old].clone()).collect();
        GameInstance::new(instance.rows(), instance.cols(), payoffs, instance.row_labels().to_vec(), labels).unwrap()
    }

    #[test]
    fn test_single_dominant_equilibrium() {
        let instance = game(&[vec![5, 0], vec![0, 0]], &[vec![5, 0], vec![0, 0]], &["U", "D"], &["L", "R"]);
        let solution = find_equilibria(&instance);
        assert!(solution.exists());
        assert!(solution.contains(Position::new(0, 0)));
        assert!(!solution.contains(Position::new(0, 1)));
        assert!(!solution.contains(Position::new(1, 0)));
        // (D, R) pays 0 to both and every deviation from it also pays 0, so
        // under the tie rule it is an equilibrium too.
        assert_eq!(solution.positions(), [Position::new(0, 0), Position::new(1, 1)]);
    }

    #[test]
    fn test_matching_pennies_has_no_equilibrium() {
        let instance = game(&[vec![1, -1], vec![-1, 1]], &[vec![-1, 1], vec![1, -1]], &["U", "D"], &["L", "R"]);
        let solution = find_equilibria(&instance);
        assert!(!solution.exists());
        assert!(solution.positions().is_empty());
        assert_eq!(solution, EquilibriumSet::none());
    }

    #[test]
    fn test_prisoners_dilemma() {
        let instance = game(&[vec![3, 0], vec![5, 1]], &[vec![3, 5], vec![0, 1]], &["U", "D"], &["L", "R"]);
        let solution = find_equilibria(&instance);
        assert_eq!(solution.positions(), [Position::new(1, 1)]);
    }

    #[test]
    fn test_ties_keep_best_response() {
        let instance = game(&[vec![1, 1], vec![1, 1]], &[vec![1, 1], vec![1, 1]], &["U", "D"], &["L", "R"]);
        let solution = find_equilibria(&instance);
        assert_eq!(solution.len(), 4);
        assert_eq!(
            solution.positions(),
            [Position::new(0, 0), Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_coordination_game_row_major_order() {
        let instance = game(
            &[vec![2, 0, 0], vec![0, 1, 0], vec![0, 0, 3]],
            &[vec![2, 0, 0], vec![0, 1, 0], vec![0, 0, 3]],
            &["U", "M", "D"],
            &["L", "C", "R"],
        );
        let solution = find_equilibria(&instance);
        assert_eq!(
            solution.positions(),
            [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)]
        );
    }

    #[test]
    fn test_responses_name_first_strict_improvement() {
        let instance = game(
            &[vec![1, 0], vec![4, 0], vec![9, 0]],
            &[vec![0, 2], vec![0, 0], vec![0, 0]],
            &["U", "M", "D"],
            &["L", "R"],
        );
        let at = Position::new(0, 0);
        assert_eq!(row_player_response(&instance, at), Response::Deviation { to: 1, payoff: 4 });
        assert_eq!(col_player_response(&instance, at), Response::Deviation { to: 1, payoff: 2 });
        assert_eq!(row_player_response(&instance, Position::new(2, 0)), Response::Best);
        assert_eq!(col_player_response(&instance, Position::new(1, 0)), Response::Best);
    }

    #[test]
    fn test_one_by_one_game() {
        let instance = game(&[vec![-4]], &[vec![2]], &["U"], &["L"]);
        assert_eq!(find_equilibria(&instance).positions(), [Position::new(0, 0)]);
    }

    #[test]
    fn test_idempotent() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let instance = generate_instance(Difficulty::Hard, &GenerateOptions::default(), &mut rng).unwrap();
            assert_eq!(find_equilibria(&instance), find_equilibria(&instance));
        }
    }

    #[test]
    fn test_matches_definition_on_random_games() {
        let mut rng = StdRng::seed_from_u64(23);
        let options = GenerateOptions::default().with_payoff_range(0, 3);
        for _ in 0..100 {
            let instance = generate_instance(Difficulty::Hard, &options, &mut rng).unwrap();
            let solution = find_equilibria(&instance);
            for position in instance.positions() {
                let (p1, p2) = instance.payoffs(position);
                let p1_best = (0..instance.rows()).all(|r| instance.payoffs_at(r, position.col).0 <= p1);
                let p2_best = (0..instance.cols()).all(|c| instance.payoffs_at(position.row, c).1 <= p2);
                assert_eq!(solution.contains(position), p1_best && p2_best);
            }
            assert_eq!(solution.exists(), !solution.is_empty());
        }
    }

    #[test]
    fn test_permutation_invariance() {
        let mut rng = StdRng::seed_from_u64(31);
        let options = GenerateOptions::default().with_payoff_range(0, 4);
        for _ in 0..50 {
            let instance = generate_instance(Difficulty::Hard, &options, &mut rng).unwrap();
            let solution = find_equilibria(&instance);

            let mut row_order: Vec<usize> = (0..instance.rows()).collect();
            row_order.shuffle(&mut rng);
            let permuted = permute_rows(&instance, &row_order);
            let expected = EquilibriumSet::from_positions(
                solution
                    .positions()
                    .iter()
                    .map(|p| {
                        let new_row = row_order.iter().position(|&old| old == p.row).unwrap();
                        Position::new(new_row, p.col)
                    })
                    .collect(),
            );
            assert_eq!(find_equilibria(&permuted), expected);

            let mut col_order: Vec<usize> = (0..instance.cols()).collect();
            col_order.shuffle(&mut rng);
            let permuted = permute_cols(&instance, &col_order);
            let expected = EquilibriumSet::from_positions(
                solution
                    .positions()
                    .iter()
                    .map(|p| {
                        let new_col = col_order.iter().position(|&old| old == p.col).unwrap();
                        Position::new(p.row, new_col)
                    })
                    .collect(),
            );
            assert_eq!(find_equilibria(&permuted), expected);
        }
    }

    #[test]
    fn test_serde_checks_invariants() {
        let set = EquilibriumSet::from_positions(vec![Position::new(0, 0), Position::new(1, 1)]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["exists"], true);
        assert_eq!(serde_json::from_value::<EquilibriumSet>(json).unwrap(), set);

        let claims_without_positions = serde_json::json!({ "exists": true, "positions": [] });
        assert!(serde_json::from_value::<EquilibriumSet>(claims_without_positions).is_err());

        let denies_with_positions = serde_json::json!({ "exists": false, "positions": [{ "row": 0, "col": 0 }] });
        assert!(serde_json::from_value::<EquilibriumSet>(denies_with_positions).is_err());

        let unsorted = serde_json::json!({
            "exists": true,
            "positions": [{ "row": 1, "col": 1 }, { "row": 0, "col": 0 }, { "row": 1, "col": 1 }]
        });
        let set: EquilibriumSet = serde_json::from_value(unsorted).unwrap();
        assert_eq!(set.positions(), [Position::new(0, 0), Position::new(1, 1)]);
        assert!(set.contains(Position::new(1, 1)));
    }

    #[test]
    fn test_from_positions_normalizes() {
        let set = EquilibriumSet::from_positions(vec![
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 0),
        ]);
        assert!(set.exists());
        assert_eq!(set.positions(), [Position::new(0, 1), Position::new(1, 0)]);
    }
}
