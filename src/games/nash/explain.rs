//! Question and explanation text.
//!
//! The detailed explanation walks every cell in row-major order using the
//! same best-response checks as the solver, so the reasoning shown to the
//! student can never disagree with the computed answer.

use crate::games::nash::instance::GameInstance;
use crate::games::nash::solver::{col_player_response, row_player_response, EquilibriumSet, Response};
use crate::question::DetailLevel;

const RULE_WIDTH: usize = 50;

/// Render the question prompt with its payoff table.
pub fn render_question(instance: &GameInstance) -> String {
    let mut text = String::new();
    text.push_str("Consider the following two-player game in normal form:\n\n");
    text.push_str("Player 1 chooses rows, Player 2 chooses columns.\n");
    text.push_str("Payoffs are shown as (Player 1, Player 2).\n\n");
    text.push_str(&instance.to_string());
    text.push_str("\n\n");
    text.push_str(
        "Question: Does a pure Nash equilibrium exist in this game? \
         If yes, identify all pure Nash equilibria.",
    );
    text
}

/// One-line answer, e.g. `Yes, pure Nash equilibrium exists at: (U, L), (D, R)`.
pub fn render_concise(instance: &GameInstance, solution: &EquilibriumSet) -> String {
    if solution.exists() {
        format!(
            "Yes, pure Nash equilibrium exists at: {}",
            label_list(instance, solution)
        )
    } else {
        "No pure Nash equilibrium exists in this game.".to_string()
    }
}

/// Step-by-step justification: every cell, both players, then a summary.
pub fn render_detailed(instance: &GameInstance, solution: &EquilibriumSet) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        "NASH EQUILIBRIUM ANALYSIS".to_string(),
        rule.clone(),
        String::new(),
        "A Nash equilibrium is a strategy profile where no player can improve".to_string(),
        "their payoff by unilaterally changing their strategy.".to_string(),
        String::new(),
        "Checking each cell (strategy profile):".to_string(),
        String::new(),
    ];

    for position in instance.positions() {
        let (p1, p2) = instance.payoffs(position);
        let label = instance.label(position);
        lines.push(format!("Cell {}: Payoffs = ({}, {})", label, p1, p2));

        let row_response = row_player_response(instance, position);
        lines.push(describe_response(1, row_response, instance.row_labels()));

        let col_response = col_player_response(instance, position);
        lines.push(describe_response(2, col_response, instance.col_labels()));

        if row_response.is_best() && col_response.is_best() {
            lines.push(format!("  >>> NASH EQUILIBRIUM at {}", label));
        } else {
            lines.push("  >>> Not a Nash equilibrium".to_string());
        }
        lines.push(String::new());
    }

    lines.push(rule);
    lines.push("CONCLUSION:".to_string());
    if solution.exists() {
        lines.push(format!(
            "Pure Nash equilibrium exists at: {}",
            label_list(instance, solution)
        ));
    } else {
        lines.push("No pure Nash equilibrium exists in this game.".to_string());
    }

    lines.join("\n")
}

fn describe_response(player: u8, response: Response, labels: &[String]) -> String {
    match response {
        Response::Best => format!("  Player {}: best response (no better alternative)", player),
        Response::Deviation { to, payoff } => format!(
            "  Player {}: NOT best response (can get {} by switching to {})",
            player, payoff, labels[to]
        ),
    }
}

/// Render at the requested level of detail.
pub fn render(instance: &GameInstance, solution: &EquilibriumSet, detail: DetailLevel) -> String {
    match detail {
        DetailLevel::Concise => render_concise(instance, solution),
        DetailLevel::Detailed => render_detailed(instance, solution),
    }
}

fn label_list(instance: &GameInstance, solution: &EquilibriumSet) -> String {
    solution
        .positions()
        .iter()
        .map(|&p| instance.label(p))
        .collect::<Vec<_>>()
        .join(", ")
}
