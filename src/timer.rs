use std::time::{Duration, Instant};

/// Fixed-period interval handle driven by the event loop.
///
/// There is no background thread: the loop asks how many periods have
/// elapsed since the last poll. Dropping the handle cancels it, so no tick
/// can be observed after the owner lets go of it.
#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    next_due: Instant,
}

impl Countdown {
    pub fn start(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of whole periods that elapsed up to `now`. Each period is
    /// reported exactly once.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now >= self.next_due {
            ticks += 1;
            self.next_due += self.period;
        }
        ticks
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
