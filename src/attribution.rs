//! Ranking of per-feature attribution scores for display.
//!
//! Given the explainer's signed scores for one prediction, produces the
//! top-N rows ordered by how strongly each feature pushed the prediction,
//! regardless of direction.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Which way a feature pushed the prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    TowardsChurn,
    AwayFromChurn,
}

impl Direction {
    /// Classify a raw score. Exactly zero counts as away from churn.
    pub fn of_score(score: f64) -> Self {
        if score > 0.0 {
            Direction::TowardsChurn
        } else {
            Direction::AwayFromChurn
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TowardsChurn => "towards churn",
            Direction::AwayFromChurn => "away from churn",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the attribution table
#[derive(Debug, Clone, Serialize)]
pub struct AttributionRow {
    /// Feature name as shown to the user
    pub feature: String,
    /// Raw signed score from the explainer
    pub score: f64,
    /// Score rounded to two decimals for display
    pub rounded: f64,
    /// Push direction
    pub direction: Direction,
}

/// Round a score to two decimal digits for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rank attribution scores by descending absolute magnitude and keep the
/// top `top_n` rows.
///
/// The sort key is the magnitude of the raw score, not the rounded display
/// value. The sort is stable, so features with equal magnitude keep their
/// incoming (training column) order.
pub fn rank_attributions(names: &[&str], scores: &[f64], top_n: usize) -> Vec<AttributionRow> {
    let mut ranked: Vec<(f64, AttributionRow)> = names
        .iter()
        .zip(scores.iter())
        .map(|(name, &score)| {
            let row = AttributionRow {
                feature: name.to_string(),
                score,
                rounded: round2(score),
                direction: Direction::of_score(score),
            };
            (score.abs(), row)
        })
        .collect();

    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    ranked.truncate(top_n);

    ranked.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 11] = [
        "Age",
        "Gender",
        "Income",
        "Joining Designation",
        "Total Business Value",
        "Education_Level",
        "Last_grade",
        "Income_increased",
        "Last_rat",
        "Grade_improved",
        "Rating_change",
    ];

    #[test]
    fn test_sorted_by_descending_magnitude() {
        let scores = [0.4, -1.2, 0.9, -0.3, 2.1, -0.7, 0.05, 1.5, -1.9, 0.6, -0.01];
        let rows = rank_attributions(&NAMES, &scores, 5);

        assert_eq!(rows.len(), 5);
        for pair in rows.windows(2) {
            assert!(pair[0].score.abs() >= pair[1].score.abs());
        }
    }

    #[test]
    fn test_zero_score_is_away_from_churn() {
        assert_eq!(Direction::of_score(0.0), Direction::AwayFromChurn);
        assert_eq!(Direction::of_score(-0.5), Direction::AwayFromChurn);
        assert_eq!(Direction::of_score(0.01), Direction::TowardsChurn);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for value in [2.5, -0.1, 3.14159, -4.199, 0.005, -0.004] {
            let once = round2(value);
            assert_eq!(round2(once), once);
        }
    }

    #[test]
    fn test_sort_key_is_unrounded_magnitude() {
        // 0.104 and 0.1 both display as 0.10, but 0.104 must rank first.
        let names = ["a", "b"];
        let scores = [0.1, 0.104];
        let rows = rank_attributions(&names, &scores, 2);

        assert_eq!(rows[0].feature, "b");
        assert_eq!(rows[0].rounded, 0.1);
        assert_eq!(rows[1].rounded, 0.1);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let names = ["a", "b", "c"];
        let scores = [0.5, -0.5, 0.5];
        let rows = rank_attributions(&names, &scores, 3);

        assert_eq!(rows[0].feature, "a");
        assert_eq!(rows[1].feature, "b");
        assert_eq!(rows[2].feature, "c");
    }

    #[test]
    fn test_truncates_to_available_rows() {
        let names = ["a", "b"];
        let scores = [1.0, 2.0];
        assert_eq!(rank_attributions(&names, &scores, 5).len(), 2);
    }

    #[test]
    fn test_full_ranking_scenario() {
        let scores = [2.5, -0.1, 0.0, 3.7, -4.2, 0.3, 1.1, -0.05, 0.9, -2.0, 0.02];
        let rows = rank_attributions(&NAMES, &scores, 5);

        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].feature, "Total Business Value");
        assert_eq!(rows[0].rounded, -4.2);
        assert_eq!(rows[0].direction, Direction::AwayFromChurn);

        assert_eq!(rows[1].feature, "Joining Designation");
        assert_eq!(rows[1].rounded, 3.7);
        assert_eq!(rows[1].direction, Direction::TowardsChurn);

        assert_eq!(rows[2].feature, "Age");
        assert_eq!(rows[2].rounded, 2.5);
        assert_eq!(rows[2].direction, Direction::TowardsChurn);

        assert_eq!(rows[3].feature, "Grade_improved");
        assert_eq!(rows[3].rounded, -2.0);
        assert_eq!(rows[3].direction, Direction::AwayFromChurn);

        assert_eq!(rows[4].feature, "Last_grade");
        assert_eq!(rows[4].rounded, 1.1);
        assert_eq!(rows[4].direction, Direction::TowardsChurn);
    }
}
