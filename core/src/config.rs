use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown ticks a flashing phase lasts
    pub flash_ticks: u8,
    pub blink_period_ms: Millis,
    pub tick_period_ms: Millis,
    pub scoring: ScoreRules,
}

impl SessionConfig {
    pub const DEFAULT_FLASH_TICKS: u8 = 10;
    pub const DEFAULT_BLINK_PERIOD_MS: Millis = 500;
    pub const DEFAULT_TICK_PERIOD_MS: Millis = 1000;

    pub fn validate(&self) -> Result<()> {
        if self.flash_ticks == 0 {
            return Err(GameError::InvalidConfig("flash_ticks must be at least 1"));
        }
        if self.blink_period_ms == 0 {
            return Err(GameError::InvalidConfig("blink_period_ms must be at least 1"));
        }
        if self.tick_period_ms == 0 {
            return Err(GameError::InvalidConfig("tick_period_ms must be at least 1"));
        }
        Ok(())
    }

    pub fn with_flash_ticks(self, flash_ticks: u8) -> Self {
        Self {
            flash_ticks,
            ..self
        }
    }

    /// Total length of a flashing phase.
    pub const fn flash_duration_ms(&self) -> Millis {
        self.flash_ticks as Millis * self.tick_period_ms
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            flash_ticks: Self::DEFAULT_FLASH_TICKS,
            blink_period_ms: Self::DEFAULT_BLINK_PERIOD_MS,
            tick_period_ms: Self::DEFAULT_TICK_PERIOD_MS,
            scoring: ScoreRules::default(),
        }
    }
}
