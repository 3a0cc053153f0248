/// Milliseconds on the simulation clock.
pub type Millis = f64;

/// Monotonic time source injected into the match.
///
/// Every delayed effect (goal overlay, bot thinking, relocation, collision
/// cooldown) compares timestamps taken from this clock, never wall time.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// A clock that only moves when told to.
/// The web runner advances it by the fixed timestep; tests advance it by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: Millis,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    pub fn starting_at(now: Millis) -> Self {
        Self { now }
    }

    /// Move time forward. Negative amounts are ignored to stay monotonic.
    pub fn advance(&mut self, ms: Millis) {
        if ms > 0.0 {
            self.now += ms;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now
    }
}

/// Fixed timestep accumulator.
/// Turns variable frame times into a whole number of simulation ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Length of one tick in milliseconds.
    dt: Millis,
    /// Frame time not yet consumed by a tick.
    accumulator: Millis,
    /// Upper bound on ticks per frame (avoids the spiral of death).
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: Millis) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_ms: Millis) -> u32 {
        if self.dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_ms.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f64);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    /// Interpolation alpha between the last tick and the next (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        if self.dt <= 0.0 {
            return 0.0;
        }
        self.accumulator / self.dt
    }

    /// The fixed tick length in milliseconds.
    pub fn dt(&self) -> Millis {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Millis = 1000.0 / 60.0;

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new();
        clock.advance(16.0);
        clock.advance(4.0);
        assert_eq!(clock.now(), 20.0);
    }

    #[test]
    fn manual_clock_never_goes_back() {
        let mut clock = ManualClock::starting_at(100.0);
        clock.advance(-50.0);
        assert_eq!(clock.now(), 100.0);
    }

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(FRAME);
        assert_eq!(ts.accumulate(FRAME), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(FRAME);
        assert_eq!(ts.accumulate(8.0), 0);
        assert_eq!(ts.accumulate(10.0), 1);
    }

    #[test]
    fn caps_at_max_steps() {
        let mut ts = FixedTimestep::new(FRAME).with_max_steps(4);
        assert_eq!(ts.accumulate(1000.0), 4);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::new(FRAME);
        ts.accumulate(8.0);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }
}
