//! Frame-driven animation time.


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Paused,
    /// Torn down. No further ticks are produced.
    Stopped,
}

/// Discrete frame counter owned by the render driver.
///
/// **Context**: Every surface is a pure function of the parameters and the
/// current time. The clock is the only state that survives from one tick to
/// the next.
///
/// **How it Works**: Each call to [`advance`](Self::advance) is one tick.
/// While running the counter increases by exactly one before the tick is
/// rendered. While paused it stays put, so the tick reproduces the previous
/// render exactly. After [`teardown`](Self::teardown) the clock refuses all
/// further ticks and ignores state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationClock {
    time: u64,
    state: ClockState,
}

impl AnimationClock {
    pub fn new(running: bool) -> Self {
        Self {
            time: 0,
            state: if running {
                ClockState::Running
            } else {
                ClockState::Paused
            },
        }
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn is_torn_down(&self) -> bool {
        self.state == ClockState::Stopped
    }

    pub fn set_running(&mut self, running: bool) {
        if self.is_torn_down() {
            return;
        }
        self.state = if running {
            ClockState::Running
        } else {
            ClockState::Paused
        };
    }

    pub fn toggle(&mut self) {
        let running = self.is_running();
        self.set_running(!running);
    }

    /// Starts one tick. Returns the time to render at, or `None` once torn down.
    pub fn advance(&mut self) -> Option<u64> {
        match self.state {
            ClockState::Running => {
                self.time += 1;
                Some(self.time)
            }
            ClockState::Paused => Some(self.time),
            ClockState::Stopped => None,
        }
    }

    /// Restarts time at zero without changing the run state.
    pub fn reset(&mut self) {
        if !self.is_torn_down() {
            self.time = 0;
        }
    }

    pub fn teardown(&mut self) {
        self.state = ClockState::Stopped;
    }
}
