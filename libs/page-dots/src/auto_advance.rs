use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// What auto-advance does once the last page is selected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Go back to the first page
    #[default]
    Wrap,
    /// Stay on the last page
    Stop,
}

impl EndBehavior {
    /// Page that follows `current` out of `total`
    #[must_use]
    pub fn next(self, current: usize, total: usize) -> usize {
        if total == 0 {
            return 0;
        }

        let last = total - 1;
        if current < last {
            current + 1
        } else {
            match self {
                Self::Wrap => 0,
                Self::Stop => last,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// Cooperative auto-advance timer.
///
/// The timer owns no thread. The host loop asks for `next_deadline()`, waits
/// until then, and calls `poll()`, which reports at most one tick per call.
/// Once torn down, the timer never runs again.
#[derive(Debug)]
pub struct AutoAdvanceTimer {
    interval: Option<Duration>,
    state: TimerState,
    deadline: Option<Instant>,
    torn_down: bool,
}

impl AutoAdvanceTimer {
    /// A zero interval disables the timer, the same as `None`.
    #[must_use]
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval: interval.filter(|interval| !interval.is_zero()),
            state: TimerState::Stopped,
            deadline: None,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Interval from a seconds value, `None` unless finite and positive
    #[must_use]
    pub fn interval_from_secs(secs: f64) -> Option<Duration> {
        if secs.is_finite() && secs > 0.0 {
            Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|interval| !interval.is_zero())
        } else {
            None
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some() && !self.torn_down
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Stopped -> Running
    pub fn start(&mut self, now: Instant) {
        if self.state == TimerState::Stopped {
            self.run_from(now);
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            log::debug!("Auto-advance paused");
            self.state = TimerState::Paused;
            self.deadline = None;
        }
    }

    /// Paused -> Running. The next tick is a full interval away.
    pub fn resume(&mut self, now: Instant) {
        if self.state == TimerState::Paused {
            self.run_from(now);
        }
    }

    /// Any state -> Stopped, permanently. The deadline is released so no tick
    /// can fire afterwards.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            log::debug!("Auto-advance torn down (was {:?})", self.state);
        }
        self.torn_down = true;
        self.state = TimerState::Stopped;
        self.deadline = None;
    }

    /// When the host should call `poll()` next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if a tick is due at `now`, rescheduling the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        let (Some(deadline), Some(interval)) = (self.deadline, self.interval) else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.deadline = Some(now + interval);
        true
    }

    fn run_from(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        let Some(interval) = self.interval else {
            return;
        };

        log::debug!("Auto-advance running every {interval:?}");
        self.state = TimerState::Running;
        self.deadline = Some(now + interval);
    }
}
