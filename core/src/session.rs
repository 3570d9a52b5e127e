use serde::{Deserialize, Serialize};

use crate::*;

/// Result of the last submission of the current level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub feedback: Feedback,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Stage {
    Intro,
    Flashing(FlashingStage),
    Selecting,
    Feedback,
    Complete,
}

impl Stage {
    const fn phase(&self) -> Phase {
        match self {
            Self::Intro => Phase::Intro,
            Self::Flashing(_) => Phase::Flashing,
            Self::Selecting => Phase::Selecting,
            Self::Feedback => Phase::Feedback,
            Self::Complete => Phase::Complete,
        }
    }
}

/// Represents a game from the first level to the last.
///
/// All mutation goes through the action methods, each of which first checks [`Phase::accepts`] and does nothing
/// when the current phase does not take that action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    catalog: LevelCatalog,
    config: SessionConfig,
    level_index: usize,
    stage: Stage,
    flashing_set: CellSet,
    selection: CellSet,
    submission: Option<Submission>,
    score: u32,
}

impl GameSession {
    pub fn new(catalog: LevelCatalog, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            level_index: 0,
            stage: Stage::Intro,
            flashing_set: CellSet::empty(),
            selection: CellSet::empty(),
            submission: None,
            score: 0,
        })
    }

    pub fn with_config(config: SessionConfig) -> Result<Self> {
        Self::new(LevelCatalog::standard(), config)
    }

    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selection(&self) -> CellSet {
        self.selection
    }

    pub fn flashing_set(&self) -> CellSet {
        self.flashing_set
    }

    pub fn submission(&self) -> Option<Submission> {
        self.submission
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_level(&self) -> &Level {
        self.catalog
            .level_at(self.level_index)
            .unwrap_or_else(|| self.catalog.first())
    }

    /// Blink and countdown state, only present while flashing.
    pub fn flashing_stage(&self) -> Option<&FlashingStage> {
        match &self.stage {
            Stage::Flashing(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let level = self.current_level();
        let (blink_on, ticks_remaining) = self
            .flashing_stage()
            .map_or((false, 0), |stage| (stage.blink_on(), stage.ticks_remaining()));
        SessionSnapshot {
            level_index: self.level_index,
            level_count: self.catalog.count(),
            level_name: level.name,
            level_description: level.description,
            level_hint: level.hint,
            phase: self.phase(),
            flashing_set: self.flashing_set,
            blink_on,
            ticks_remaining,
            selection: self.selection,
            feedback: self.submission.map(|s| s.feedback),
            level_points: self.submission.map(|s| s.points),
            score: self.score,
        }
    }

    fn admit(&self, action: Action) -> bool {
        let phase = self.phase();
        let accepted = phase.accepts(action);
        if !accepted {
            log::trace!("ignoring {:?} during {:?}", action, phase);
        }
        accepted
    }

    /// Begins flashing the current level's pattern.
    pub fn start(&mut self) -> ActionOutcome {
        if !self.admit(Action::Start) {
            return ActionOutcome::NoChange;
        }

        self.flashing_set = self.current_level().pattern();
        self.selection = CellSet::empty();
        self.submission = None;
        self.stage = Stage::Flashing(FlashingStage::new(&self.config));
        log::debug!(
            "level {} flashing {} cells",
            self.level_index,
            self.flashing_set.len()
        );
        ActionOutcome::Changed
    }

    /// Flips `index` in the selection.
    ///
    /// An index off the grid is an error in every phase, otherwise this is ignored outside of selecting.
    pub fn toggle_cell(&mut self, index: CellIndex) -> Result<ActionOutcome> {
        let index = validate_index(index)?;
        if !self.admit(Action::ToggleCell) {
            return Ok(ActionOutcome::NoChange);
        }

        let selected = self.selection.toggle(index)?;
        log::trace!("cell {} selected: {}", index, selected);
        Ok(ActionOutcome::Changed)
    }

    /// Checks the selection against the flashing set and adds the points to the score.
    pub fn submit(&mut self) -> ActionOutcome {
        if !self.admit(Action::Submit) {
            return ActionOutcome::NoChange;
        }

        let feedback = validate(self.selection, self.flashing_set);
        let points = self
            .config
            .scoring
            .score(&feedback, self.flashing_set.len());
        self.score = self.score.saturating_add(points);
        self.submission = Some(Submission { feedback, points });
        self.stage = Stage::Feedback;
        log::debug!(
            "level {} submitted: {} correct, {} incorrect, {} missed, {} points, total {}",
            self.level_index,
            feedback.correct.len(),
            feedback.incorrect.len(),
            feedback.missed.len(),
            points,
            self.score
        );
        ActionOutcome::Changed
    }

    /// Moves to the next level, or completes the game after the last one.
    pub fn next(&mut self) -> ActionOutcome {
        if !self.admit(Action::Next) {
            return ActionOutcome::NoChange;
        }

        if self.catalog.is_last(self.level_index) {
            self.stage = Stage::Complete;
            log::debug!("game complete with score {}", self.score);
        } else {
            self.level_index += 1;
            self.flashing_set = CellSet::empty();
            self.selection = CellSet::empty();
            self.submission = None;
            self.stage = Stage::Intro;
            log::debug!("advanced to level {}", self.level_index);
        }
        ActionOutcome::Changed
    }

    /// Returns to the intro of the same level, keeping the score.
    pub fn retry(&mut self) -> ActionOutcome {
        if !self.admit(Action::Retry) {
            return ActionOutcome::NoChange;
        }

        self.selection = CellSet::empty();
        self.submission = None;
        self.stage = Stage::Intro;
        log::debug!("retrying level {}", self.level_index);
        ActionOutcome::Changed
    }

    /// Starts over from the first level with no score.
    pub fn reset(&mut self) -> ActionOutcome {
        if !self.admit(Action::Reset) {
            return ActionOutcome::NoChange;
        }

        // replacing the stage drops any flashing timers
        self.stage = Stage::Intro;
        self.level_index = 0;
        self.score = 0;
        self.flashing_set = CellSet::empty();
        self.selection = CellSet::empty();
        self.submission = None;
        log::debug!("game reset");
        ActionOutcome::Changed
    }

    /// Feeds `elapsed` milliseconds of host time to the flashing timers, ignored in every other phase.
    pub fn advance(&mut self, elapsed: Millis) -> TickOutcome {
        let Stage::Flashing(stage) = &mut self.stage else {
            return TickOutcome::NoChange;
        };

        let outcome = stage.advance(elapsed);
        if outcome.is_flash_ended() {
            self.stage = Stage::Selecting;
            log::debug!("level {} flashing ended", self.level_index);
        }
        outcome
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            catalog: LevelCatalog::standard(),
            config: SessionConfig::default(),
            level_index: 0,
            stage: Stage::Intro,
            flashing_set: CellSet::empty(),
            selection: CellSet::empty(),
            submission: None,
            score: 0,
        }
    }
}
