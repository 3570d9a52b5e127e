use serde::{Deserialize, Serialize};

use crate::validation::round_div;
use crate::*;

/// Points awarded for a submission.
///
/// A submission earns `accuracy * max_points` minus `penalty_per_incorrect` for every wrongly selected cell,
/// rounded half away from zero and never below zero. An empty flashing set always scores zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub max_points: u32,
    pub penalty_per_incorrect: u32,
}

impl ScoreRules {
    pub const fn new(max_points: u32, penalty_per_incorrect: u32) -> Self {
        Self {
            max_points,
            penalty_per_incorrect,
        }
    }

    pub fn score(&self, feedback: &Feedback, truth_size: u8) -> u32 {
        if truth_size == 0 {
            return 0;
        }
        let found = u64::from(feedback.correct.len());
        let wrong = u64::from(feedback.incorrect.len());
        // the penalty is whole, so rounding the accuracy part alone is exact, and raw values below zero still clamp
        let earned = round_div(found * u64::from(self.max_points), u64::from(truth_size));
        let points = earned.saturating_sub(wrong * u64::from(self.penalty_per_incorrect));
        u32::try_from(points).unwrap_or(u32::MAX)
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::new(100, 10)
    }
}

/// Scores with the default rules.
pub fn score(feedback: &Feedback, truth_size: u8) -> u32 {
    ScoreRules::default().score(feedback, truth_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[CellIndex]) -> CellSet {
        CellSet::from_indices(indices.iter().copied()).unwrap()
    }

    fn score_for(selection: CellSet, truth: CellSet) -> u32 {
        score(&validate(selection, truth), truth.len())
    }

    #[test]
    fn perfect_even_indices_scores_full() {
        let truth = PatternRule::EvenIndices.generate();
        assert_eq!(truth.len(), 13);

        assert_eq!(score_for(truth, truth), 100);
    }

    #[test]
    fn one_of_five_scores_twenty() {
        let truth = PatternRule::CenterCluster.generate();

        assert_eq!(score_for(set(&[12]), truth), 20);
    }

    #[test]
    fn all_wrong_clamps_to_zero() {
        let truth = PatternRule::CenterCluster.generate();
        let feedback = validate(set(&[0, 1, 2, 3, 4]), truth);

        assert_eq!(feedback.incorrect.len(), 5);
        assert_eq!(feedback.missed.len(), 5);
        assert_eq!(score(&feedback, truth.len()), 0);
    }

    #[test]
    fn penalty_subtracts_ten_per_wrong_cell() {
        let truth = PatternRule::CenterCluster.generate();

        // 80 for four of five, minus 20
        assert_eq!(score_for(set(&[7, 11, 12, 13, 0, 1]), truth), 60);
    }

    #[test]
    fn half_points_round_up() {
        // 1 of 8 is 12.5, 3 of 8 is 37.5
        let truth = PatternRule::ModuloStripes.generate();

        assert_eq!(score_for(set(&[0]), truth), 13);
        assert_eq!(score_for(set(&[0, 3, 7]), truth), 38);
    }

    #[test]
    fn raw_just_below_zero_is_zero() {
        // 1 of 8 is 12.5, minus 20
        let truth = PatternRule::ModuloStripes.generate();

        assert_eq!(score_for(set(&[0, 1, 2]), truth), 0);
    }

    #[test]
    fn empty_truth_scores_zero() {
        let feedback = validate(set(&[1, 2, 3]), CellSet::empty());

        assert_eq!(score(&feedback, 0), 0);
        assert_eq!(score(&Feedback::default(), 0), 0);
    }

    #[test]
    fn custom_rules_scale_points() {
        let truth = PatternRule::CenterCluster.generate();
        let feedback = validate(set(&[12, 0]), truth);

        assert_eq!(ScoreRules::new(1000, 50).score(&feedback, truth.len()), 150);
    }
}
