use std::time::{Duration, Instant};

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started
    pub time: f32,
    pub delta: Duration,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: Duration) -> Self {
        Self { number, time, delta }
    }
}

/// Wall clock for the redraw loop
///
/// Call `tick()` once per redraw; the first frame has a zero delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            frame_number: 0,
            start_time: start,
            last_frame_time: start,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Frame info for a redraw happening now
    pub fn tick(&mut self) -> FrameInfo {
        self.tick_at(Instant::now())
    }

    /// Frame info for a redraw at `now`
    pub fn tick_at(&mut self, now: Instant) -> FrameInfo {
        let delta = now.saturating_duration_since(self.last_frame_time);
        let time = now.saturating_duration_since(self.start_time).as_secs_f32();
        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;
        info
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_measure_time_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.tick_at(start);
        assert_eq!(first.number, 0);
        assert_eq!(first.delta, Duration::ZERO);

        let second = clock.tick_at(start + Duration::from_millis(16));
        assert_eq!(second.number, 1);
        assert_eq!(second.delta, Duration::from_millis(16));

        let third = clock.tick_at(start + Duration::from_millis(50));
        assert_eq!(third.delta, Duration::from_millis(34));
        assert!((third.time - 0.05).abs() < 1e-6);
        assert_eq!(clock.frame_number(), 3);
    }
}
