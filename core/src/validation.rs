use serde::{Deserialize, Serialize};

use crate::*;

/// Three-way partition of a submitted selection against the flashing set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Selected and flashing
    pub correct: CellSet,
    /// Selected but not flashing
    pub incorrect: CellSet,
    /// Flashing but not selected
    pub missed: CellSet,
}

impl Feedback {
    /// Whether the selection matched the flashing set exactly.
    pub const fn is_perfect(&self) -> bool {
        self.incorrect.is_empty() && self.missed.is_empty()
    }

    /// The flashing set the selection was checked against.
    pub const fn truth(&self) -> CellSet {
        self.correct.union(self.missed)
    }

    /// The selection as submitted.
    pub const fn selection(&self) -> CellSet {
        self.correct.union(self.incorrect)
    }

    /// Share of flashing cells that were found, rounded to a whole percent.
    ///
    /// `None` when nothing was flashing.
    pub fn accuracy_percent(&self) -> Option<u8> {
        let total = u32::from(self.truth().len());
        if total == 0 {
            return None;
        }
        let found = u32::from(self.correct.len());
        // found <= total, so this never exceeds 100
        Some(round_div(u64::from(found) * 100, u64::from(total)) as u8)
    }
}

/// Partitions `selection` against `truth`.
pub const fn validate(selection: CellSet, truth: CellSet) -> Feedback {
    Feedback {
        correct: selection.intersection(truth),
        incorrect: selection.difference(truth),
        missed: truth.difference(selection),
    }
}

/// `numerator / denominator` rounded half away from zero, for non-negative inputs.
pub(crate) const fn round_div(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}
