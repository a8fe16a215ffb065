/// Turns variable frame times into a whole number of fixed ticks.
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
    max_ticks: u32,
}

impl FixedTimestep {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: 1.0 / ticks_per_second.max(1) as f64,
            accumulator: 0.0,
            // at most a quarter second of catch-up per frame
            max_ticks: (ticks_per_second / 4).max(1),
        }
    }

    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_ticks {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut ts = FixedTimestep::new(100);
        assert_eq!(ts.advance(0.004), 0);
        assert_eq!(ts.advance(0.004), 0);
        assert_eq!(ts.advance(0.004), 1);
        assert_eq!(ts.advance(0.025), 2);
    }

    #[test]
    fn stalls_are_capped() {
        let mut ts = FixedTimestep::new(120);
        assert_eq!(ts.advance(10.0), 30);
        assert!(ts.advance(0.0) <= 1);
    }

    #[test]
    fn negative_time_is_ignored() {
        let mut ts = FixedTimestep::new(60);
        assert_eq!(ts.advance(-1.0), 0);
    }
}
