use serde::{Deserialize, Serialize};

/// Milliseconds on a flashing phase's own clock, which starts at zero when the phase is entered.
pub type Millis = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    Blink,
    Countdown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PeriodicTimer {
    period: Millis,
    next_due: Millis,
}

impl PeriodicTimer {
    pub const fn new(period: Millis) -> Self {
        // a zero period would fire forever without the clock moving
        let period = if period == 0 { 1 } else { period };
        Self {
            period,
            next_due: period,
        }
    }

    pub const fn period(&self) -> Millis {
        self.period
    }

    pub const fn next_due(&self) -> Millis {
        self.next_due
    }

    fn fire(&mut self) -> Millis {
        let fired_at = self.next_due;
        self.next_due = self.next_due.saturating_add(self.period);
        fired_at
    }
}

/// The two periodic tasks of a single flashing phase.
///
/// The clock only moves when the owner feeds it time through [`FlashClock::pop_due`], and it has no handles living
/// anywhere else: dropping the clock is the cancellation of both timers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashClock {
    now: Millis,
    blink: PeriodicTimer,
    countdown: PeriodicTimer,
}

impl FlashClock {
    pub const fn new(blink_period: Millis, countdown_period: Millis) -> Self {
        Self {
            now: 0,
            blink: PeriodicTimer::new(blink_period),
            countdown: PeriodicTimer::new(countdown_period),
        }
    }

    pub const fn now(&self) -> Millis {
        self.now
    }

    /// Fires the earliest timer due at or before `deadline`.
    ///
    /// When both are due at the same instant the blink fires first. Returns `None` once nothing else is due, with
    /// the clock moved forward to `deadline`.
    pub fn pop_due(&mut self, deadline: Millis) -> Option<TimerEvent> {
        let (timer, event) = if self.blink.next_due() <= self.countdown.next_due() {
            (&mut self.blink, TimerEvent::Blink)
        } else {
            (&mut self.countdown, TimerEvent::Countdown)
        };

        if timer.next_due() > deadline {
            self.now = self.now.max(deadline);
            return None;
        }

        self.now = timer.fire();
        Some(event)
    }
}
