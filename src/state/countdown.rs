// Midnight countdown, one step per timer tick.
use crate::config::CountdownRules;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownStep {
    Remaining(u8),
    /// Reached zero on this tick.
    Midnight,
    /// Already at zero; the timer should be stopped.
    Idle,
}

impl CountdownStep {
    /// Whether the driving timer should keep ticking after this step.
    pub fn keeps_running(self) -> bool {
        matches!(self, CountdownStep::Remaining(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    remaining: u8,
    tick_ms: u32,
}

impl Countdown {
    pub fn new(rules: CountdownRules) -> Self {
        Self { remaining: rules.start, tick_ms: rules.tick_ms }
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn is_midnight(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) -> CountdownStep {
        match self.remaining {
            0 => CountdownStep::Idle,
            1 => {
                self.remaining = 0;
                CountdownStep::Midnight
            }
            n => {
                self.remaining = n - 1;
                CountdownStep::Remaining(self.remaining)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_midnight_once() {
        let mut c = Countdown::new(CountdownRules { start: 3, tick_ms: 800 });
        assert_eq!(c.tick(), CountdownStep::Remaining(2));
        assert_eq!(c.tick(), CountdownStep::Remaining(1));
        assert_eq!(c.tick(), CountdownStep::Midnight);
        assert!(c.is_midnight());
        assert_eq!(c.tick(), CountdownStep::Idle);
    }

    #[test]
    fn timer_stops_at_midnight() {
        let mut c = Countdown::new(CountdownRules::default());
        let mut ticks = 0;
        loop {
            ticks += 1;
            if !c.tick().keeps_running() {
                break;
            }
        }
        assert_eq!(ticks, 10);
        assert!(c.is_midnight());
        assert!(!c.tick().keeps_running());
    }
}
