//! Self-contained timers - advanced by the frame loop, no wall clock inside
//! Each timer accumulates elapsed time and decides when to fire

use std::time::Duration;

/// Repeating timer - fires once per whole period elapsed
#[derive(Debug, Clone, Copy)]
pub struct Repeating {
    period: Duration,
    elapsed: Duration,
    max_fires: u32,
}

impl Repeating {
    /// Create timer with the given period, firing at most `max_fires` per advance
    ///
    /// A zero period is bumped to one millisecond.
    pub fn new(period: Duration, max_fires: u32) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            max_fires: max_fires.max(1),
        }
    }

    /// Advance by `delta`, returns how many times the timer fired
    ///
    /// When more than `max_fires` periods are pending the extra backlog is
    /// dropped, keeping only the partial period in progress.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.elapsed = self.elapsed.saturating_add(delta);

        let mut fired = 0;
        while self.elapsed >= self.period && fired < self.max_fires {
            self.elapsed -= self.period;
            fired += 1;
        }

        if self.elapsed >= self.period {
            let period = self.period.as_nanos();
            let remainder = self.elapsed.as_nanos() % period;
            self.elapsed = Duration::from_nanos(remainder as u64);
        }

        fired
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next fire
    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }
}

/// Physics accumulator - yields fixed timesteps for deterministic simulation
#[derive(Debug, Clone)]
pub struct Accumulator {
    timestep: f32,
    accumulator: f32,
    max_steps: u8,
}

impl Accumulator {
    /// Create accumulator with fixed timestep
    pub fn new(hz: f32, max_steps: u8) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Update with delta, returns iterator of fixed timesteps to execute
    ///
    /// Steps beyond `max_steps` are discarded rather than carried over.
    pub fn tick(&mut self, delta: f32) -> impl Iterator<Item = f32> {
        self.accumulator += delta.max(0.0);

        let pending = (self.accumulator / self.timestep) as usize;
        let steps = pending.min(self.max_steps as usize);

        self.accumulator -= pending as f32 * self.timestep;
        self.accumulator = self.accumulator.max(0.0);

        std::iter::repeat(self.timestep).take(steps)
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Get interpolation alpha for rendering between physics steps
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn repeating_waits_full_period() {
        let mut timer = Repeating::new(ms(3000), 8);

        assert_eq!(timer.advance(ms(2999)), 0);
        assert_eq!(timer.advance(ms(1)), 1);
        assert_eq!(timer.advance(ms(1)), 0);
    }

    #[test]
    fn repeating_catches_up_in_one_advance() {
        let mut timer = Repeating::new(ms(3000), 8);

        assert_eq!(timer.advance(ms(9000)), 3);
        assert_eq!(timer.remaining(), ms(3000));
    }

    #[test]
    fn repeating_caps_backlog() {
        let mut timer = Repeating::new(ms(3000), 8);

        assert_eq!(timer.advance(ms(60_500)), 8);
        // Backlog dropped, the 500ms partial period survives
        assert_eq!(timer.remaining(), ms(2500));
    }

    #[test]
    fn repeating_survives_huge_delta() {
        let mut timer = Repeating::new(ms(3000), 8);

        assert_eq!(timer.advance(ms(1)), 0);
        assert_eq!(timer.advance(Duration::MAX), 8);
        assert!(timer.remaining() <= ms(3000));
        assert_eq!(timer.advance(Duration::MAX), 8);
    }

    #[test]
    fn repeating_accumulates_small_deltas() {
        let mut timer = Repeating::new(ms(100), 4);
        let fired: u32 = (0..30).map(|_| timer.advance(ms(10))).sum();
        assert_eq!(fired, 3);
    }

    #[test]
    fn accumulator_yields_fixed_steps() {
        let mut acc = Accumulator::new(60.0, 4);

        // Small delta - no steps
        let steps1: Vec<_> = acc.tick(0.01).collect();
        assert_eq!(steps1.len(), 0);

        // Enough for 1 step
        let steps2: Vec<_> = acc.tick(0.01).collect();
        assert_eq!(steps2.len(), 1);
        assert_eq!(steps2[0], 1.0 / 60.0);

        // Large delta - multiple steps (capped)
        let steps3: Vec<_> = acc.tick(0.1).collect();
        assert_eq!(steps3.len(), 4);
        assert!(acc.alpha() < 1.0);
    }
}
