use serde::Serialize;

use crate::*;

/// Read-only view of a [`GameSession`] handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub level_index: usize,
    pub level_count: usize,
    pub level_name: &'static str,
    pub level_description: &'static str,
    pub level_hint: &'static str,
    pub phase: Phase,
    pub flashing_set: CellSet,
    pub blink_on: bool,
    pub ticks_remaining: u8,
    pub selection: CellSet,
    pub feedback: Option<Feedback>,
    /// Points earned by the last submission of this level
    pub level_points: Option<u32>,
    pub score: u32,
}

/// How a single cell should be drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum CellView {
    #[default]
    Idle,
    /// Flashing and currently lit
    Lit,
    Selected,
    Correct,
    Incorrect,
    Missed,
}

impl SessionSnapshot {
    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 == self.level_count
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Cells drawn lit right now, empty while the blink is off.
    pub fn visible_flash(&self) -> CellSet {
        if self.phase == Phase::Flashing && self.blink_on {
            self.flashing_set
        } else {
            CellSet::empty()
        }
    }

    pub fn cell_view(&self, index: CellIndex) -> CellView {
        if let Some(feedback) = &self.feedback {
            if feedback.correct.contains(index) {
                return CellView::Correct;
            }
            if feedback.incorrect.contains(index) {
                return CellView::Incorrect;
            }
            if feedback.missed.contains(index) {
                return CellView::Missed;
            }
        }
        if self.visible_flash().contains(index) {
            CellView::Lit
        } else if self.selection.contains(index) {
            CellView::Selected
        } else {
            CellView::Idle
        }
    }

    /// Views for every cell in row-major order.
    pub fn cell_views(&self) -> impl Iterator<Item = (CellIndex, CellView)> + '_ {
        (0..CELL_COUNT).map(|index| (index, self.cell_view(index)))
    }
}
