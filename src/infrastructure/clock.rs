use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
pub mod testing {
    use std::{cell::Cell, time::Duration};

    use super::Clock;

    /// Advances by a fixed step on every reading.
    #[derive(Debug)]
    pub struct SteppingClock {
        current: Cell<Duration>,
        step: Duration,
    }

    impl SteppingClock {
        pub fn new(step: Duration) -> Self {
            Self {
                current: Cell::new(Duration::ZERO),
                step,
            }
        }

        pub fn readings(&self) -> u32 {
            (self.current.get().as_nanos() / self.step.as_nanos().max(1)) as u32
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> Duration {
            let next = self.current.get() + self.step;
            self.current.set(next);
            next
        }
    }
}
