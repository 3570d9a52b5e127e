use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Stage of a level attempt.
///
/// Valid transitions:
/// - Intro -> Flashing (start)
/// - Flashing -> Selecting (countdown expired)
/// - Selecting -> Feedback (submit)
/// - Feedback -> Intro (retry, or next when more levels remain)
/// - Feedback -> Complete (next on the last level)
/// - any -> Intro (reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Intro,
    Flashing,
    Selecting,
    Feedback,
    Complete,
}

/// Player intents, without their arguments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Start,
    ToggleCell,
    Submit,
    Next,
    Retry,
    Reset,
}

impl Phase {
    /// Whether `action` is accepted in this phase, anything else is ignored.
    pub const fn accepts(self, action: Action) -> bool {
        use Action::*;
        use Phase::*;
        match (self, action) {
            (_, Reset) => true,
            (Intro, Start) => true,
            (Selecting, ToggleCell | Submit) => true,
            (Feedback, Next | Retry) => true,
            _ => false,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether the player may pick cells.
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Selecting)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    NoChange,
    Changed,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of feeding time to the session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Blinked,
    Counted,
    FlashEnded,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_flash_ended(self) -> bool {
        matches!(self, Self::FlashEnded)
    }
}

/// Used to merge outcomes when several timers fire in one advance
impl BitOr for TickOutcome {
    type Output = TickOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use TickOutcome::*;
        match (self, rhs) {
            (FlashEnded, _) => FlashEnded,
            (_, FlashEnded) => FlashEnded,
            (Counted, _) => Counted,
            (_, Counted) => Counted,
            (Blinked, _) => Blinked,
            (_, Blinked) => Blinked,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// State owned by one flashing phase, including both of its timers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashingStage {
    blink_on: bool,
    ticks_remaining: u8,
    clock: FlashClock,
}

impl FlashingStage {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            blink_on: false,
            ticks_remaining: config.flash_ticks,
            clock: FlashClock::new(config.blink_period_ms, config.tick_period_ms),
        }
    }

    pub const fn blink_on(&self) -> bool {
        self.blink_on
    }

    pub const fn ticks_remaining(&self) -> u8 {
        self.ticks_remaining
    }

    pub const fn elapsed_ms(&self) -> Millis {
        self.clock.now()
    }

    /// Runs every timer due within the next `elapsed` milliseconds.
    ///
    /// Stops at the countdown's last tick with the blink forced off; the rest of `elapsed` is dropped and the
    /// caller is expected to discard the stage.
    pub fn advance(&mut self, elapsed: Millis) -> TickOutcome {
        let deadline = self.clock.now().saturating_add(elapsed);
        let mut outcome = TickOutcome::NoChange;

        while let Some(event) = self.clock.pop_due(deadline) {
            match event {
                TimerEvent::Blink => {
                    self.blink_on = !self.blink_on;
                    log::trace!("blink {} at {}ms", self.blink_on, self.clock.now());
                    outcome = outcome | TickOutcome::Blinked;
                }
                TimerEvent::Countdown => {
                    self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
                    log::trace!(
                        "countdown {} at {}ms",
                        self.ticks_remaining,
                        self.clock.now()
                    );
                    if self.ticks_remaining == 0 {
                        self.blink_on = false;
                        return TickOutcome::FlashEnded;
                    }
                    outcome = outcome | TickOutcome::Counted;
                }
            }
        }

        outcome
    }
}
