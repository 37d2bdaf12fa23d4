//! Free-text answer interpretation.
//!
//! Turns an unstructured answer such as
//! `"Yes, equilibrium exists at (U, L) and (D, R)"` into a [`StudentClaim`].
//! Two independent questions are answered:
//!
//! 1. **Existence**: does the student claim a pure equilibrium exists?
//!    The text is first classified (does it make a claim at all?), then a
//!    claim is scored against weighted negation and affirmation tables.
//! 2. **Positions**: which `(row, col)` label pairs does the text mention?
//!
//! Interpretation never fails. Text without any signal yields a claim that
//! no equilibrium exists and no positions.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder, RegexSet};
use serde::{Deserialize, Serialize};

use crate::games::nash::instance::Position;

/// Vocabulary showing the answer talks about equilibria.
pub const DOMAIN_PATTERNS: &[&str] = &[
    r"\bequilibrium\b",
    r"\bequilibria\b",
    r"\bnash\b",
    r"\bstrategy\s+profile\b",
];

/// Existence and quantifier words that imply a claim.
pub const QUANTIFIER_PATTERNS: &[&str] = &[
    r"\bexists?\b",
    r"\bthere\s+(?:is|are|isn't|aren't)\b",
    r"\bnone\b",
    r"\bfound\b",
    r"\bidentified\b",
];

/// A bare yes/no answer at the start of the text.
const DIRECT_ANSWER_PATTERN: &str = r"^\s*(?:yes|no)\b";

/// A yes/no anywhere in the text.
const YES_NO_PATTERN: &str = r"\b(?:yes|no)\b";

/// A leading "yes" settles the claim as affirmed.
const LEADING_YES_PATTERN: &str = r"^\s*yes\b";

/// Phrases denying that an equilibrium exists, with their weights.
pub const NEGATION_PATTERNS: &[(&str, u32)] = &[
    (r"^\s*no\b", 10),
    (r"\bthere\s+(?:is|are)\s+no\b", 10),
    (r"\bthere\s+(?:isn't|aren't)\b", 10),
    (r"\bdo(?:es)?n't\s+exist\b", 9),
    (r"\bdon't\s+exist\b", 9),
    (r"\bnot\s+exist\b", 9),
    (r"\bcannot\s+(?:find|be)\b", 8),
    (r"\bcan't\s+(?:find|be)\b", 8),
    (r"\bno\s+(?:pure\s+)?(?:nash\s+)?equilibri(?:um|a)\b", 9),
    (r"\bnone\b", 8),
    (r"\bneither\b", 7),
    (r"\bzero\s+equilibri", 8),
];

/// Phrases affirming that an equilibrium exists, with their weights.
pub const AFFIRMATION_PATTERNS: &[(&str, u32)] = &[
    (r"\bequilibri(?:um|a)\s+(?:does\s+)?exists?\b", 10),
    (r"\bthere\s+(?:is|are)\s+(?:a|an|one|two|equilibri)", 10),
    (r"\bexists?\s+at\b", 9),
    (r"\bexists?\b", 7),
    (r"\b(?:found|identified)\s+(?:a|an|equilibri)", 8),
    (r"\bhas\s+(?:a|an|equilibri)", 7),
];

/// A table of patterns whose weights add up when they match.
///
/// Uses a `RegexSet` so every pattern is tested in a single pass.
#[derive(Debug, Clone)]
pub struct WeightedPatterns {
    regex_set: RegexSet,
    /// Weight of each pattern (parallel to `regex_set` patterns).
    weights: Vec<u32>,
}

impl WeightedPatterns {
    /// Compile a table of `(pattern, weight)` pairs.
    pub fn new(table: &[(&str, u32)]) -> Result<Self, regex::Error> {
        let regex_set = RegexSet::new(table.iter().map(|(pattern, _)| *pattern))?;
        let weights = table.iter().map(|(_, weight)| *weight).collect();
        Ok(Self { regex_set, weights })
    }

    /// Sum of the weights of every matching pattern.
    pub fn score(&self, text: &str) -> u32 {
        self.regex_set
            .matches(text)
            .iter()
            .inspect(|&idx| log::trace!("pattern hit: {}", self.regex_set.patterns()[idx]))
            .map(|idx| self.weights[idx])
            .sum()
    }
}

struct Patterns {
    domain: RegexSet,
    quantifiers: RegexSet,
    direct_answer: Regex,
    yes_no: Regex,
    leading_yes: Regex,
    negation: WeightedPatterns,
    affirmation: WeightedPatterns,
}

// Built from the constant tables above, which the tests compile one by one.
static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    domain: RegexSet::new(DOMAIN_PATTERNS).expect("domain patterns compile"),
    quantifiers: RegexSet::new(QUANTIFIER_PATTERNS).expect("quantifier patterns compile"),
    direct_answer: Regex::new(DIRECT_ANSWER_PATTERN).expect("direct answer pattern compiles"),
    yes_no: Regex::new(YES_NO_PATTERN).expect("yes/no pattern compiles"),
    leading_yes: Regex::new(LEADING_YES_PATTERN).expect("leading yes pattern compiles"),
    negation: WeightedPatterns::new(NEGATION_PATTERNS).expect("negation patterns compile"),
    affirmation: WeightedPatterns::new(AFFIRMATION_PATTERNS).expect("affirmation patterns compile"),
});

/// What kind of statement an answer makes about existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimKind {
    /// The answer discusses equilibria or uses existence language.
    ClaimMade,
    /// The answer is just a leading "yes" or "no".
    DirectAnswer,
    /// Nothing in the answer speaks to existence.
    NoClaim,
}

/// Structured reading of a student's answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentClaim {
    /// Whether the student claims a pure equilibrium exists.
    pub existence_claim: bool,
    /// Cells the student names as equilibria.
    pub claimed_positions: BTreeSet<Position>,
}

/// Classify lowercased, trimmed text.
pub fn classify(lower: &str) -> ClaimKind {
    let patterns = &*PATTERNS;
    if patterns.domain.is_match(lower) || patterns.quantifiers.is_match(lower) {
        ClaimKind::ClaimMade
    } else if patterns.direct_answer.is_match(lower) {
        ClaimKind::DirectAnswer
    } else if patterns.yes_no.is_match(lower) {
        ClaimKind::ClaimMade
    } else {
        ClaimKind::NoClaim
    }
}

/// Whether a claim in lowercased text denies existence.
///
/// A leading "yes" always affirms. Otherwise the claim is negated only when
/// the negation weights strictly outweigh the affirmation weights.
pub fn is_negated(lower: &str) -> bool {
    let patterns = &*PATTERNS;
    if patterns.leading_yes.is_match(lower) {
        return false;
    }
    let negation = patterns.negation.score(lower);
    let affirmation = patterns.affirmation.score(lower);
    log::trace!("negation score {} vs affirmation score {}", negation, affirmation);
    negation > affirmation
}

/// Decide whether the answer claims an equilibrium exists.
pub fn extract_existence(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    let kind = classify(&lower);
    let exists = match kind {
        ClaimKind::ClaimMade => !is_negated(&lower),
        ClaimKind::DirectAnswer => lower.starts_with("yes"),
        ClaimKind::NoClaim => false,
    };
    log::debug!("answer classified as {:?}, existence claim {}", kind, exists);
    exists
}

/// Find every `(row, col)` label pair mentioned in the answer.
///
/// Matching is case-insensitive on the raw text. Pairs whose labels cannot
/// be resolved are skipped.
pub fn extract_positions(text: &str, row_labels: &[String], col_labels: &[String]) -> BTreeSet<Position> {
    let mut positions = BTreeSet::new();
    if row_labels.is_empty() || col_labels.is_empty() {
        return positions;
    }

    let pattern = format!(
        r"\(\s*({})\s*,\s*({})\s*\)",
        alternation(row_labels),
        alternation(col_labels)
    );
    let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(e) => {
            log::warn!("could not build position pattern: {}", e);
            return positions;
        }
    };

    for caps in regex.captures_iter(text) {
        let row = lookup(row_labels, &caps[1]);
        let col = lookup(col_labels, &caps[2]);
        if let (Some(row), Some(col)) = (row, col) {
            positions.insert(Position::new(row, col));
        }
    }
    positions
}

/// Interpret a free-text answer against the game's labels.
pub fn interpret(text: &str, row_labels: &[String], col_labels: &[String]) -> StudentClaim {
    StudentClaim {
        existence_claim: extract_existence(text),
        claimed_positions: extract_positions(text, row_labels, col_labels),
    }
}

/// Escaped labels, longest first so prefixes never shadow longer labels.
fn alternation(labels: &[String]) -> String {
    let mut escaped: Vec<String> = labels.iter().map(|label| regex::escape(label)).collect();
    escaped.sort_by(|a, b| b.len().cmp(&a.len()));
    escaped.join("|")
}

fn lookup(labels: &[String], found: &str) -> Option<usize> {
    let found = found.to_lowercase();
    labels.iter().position(|label| label.to_lowercase() == found)
}
