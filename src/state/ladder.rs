// Ladder rhythm state: turns timestamped climb inputs into rungs climbed.
use crate::config::LadderRules;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailReason {
    TooFast,
    TooSlow,
}

impl FailReason {
    pub fn message(self) -> &'static str {
        match self {
            FailReason::TooFast => "Too fast! Back to the bottom.",
            FailReason::TooSlow => "Too slow! Back to the bottom.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClimbOutcome {
    /// Input swallowed: still resolving the previous climb, or already at the top.
    Ignored,
    Climbed { progress: u8, reached_top: bool },
    Fell(FailReason),
}

#[derive(Debug, Clone)]
pub struct Ladder {
    rules: LadderRules,
    progress: u8,
    last_climb_at: Option<f64>,
    busy_until: f64,
}

impl Ladder {
    pub fn new(rules: LadderRules) -> Self {
        Self::resume(rules, 0)
    }

    /// Starts from a previously saved rung count (clamped to the goal).
    pub fn resume(rules: LadderRules, saved: u8) -> Self {
        Self {
            rules,
            progress: saved.min(rules.goal),
            last_climb_at: None,
            busy_until: f64::NEG_INFINITY,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn goal(&self) -> u8 {
        self.rules.goal
    }

    pub fn at_top(&self) -> bool {
        self.progress >= self.rules.goal
    }

    pub fn is_resolving(&self, now_ms: f64) -> bool {
        now_ms < self.busy_until
    }

    pub fn climb(&mut self, now_ms: f64) -> ClimbOutcome {
        if self.at_top() || self.is_resolving(now_ms) {
            return ClimbOutcome::Ignored;
        }
        self.busy_until = now_ms + self.rules.resolve_delay_ms;

        // A fresh run (or a resumed one with no timing reference) always takes the first step.
        if self.progress > 0 {
            if let Some(last) = self.last_climb_at {
                let gap = now_ms - last;
                let verdict = if gap < self.rules.min_interval_ms {
                    Some(FailReason::TooFast)
                } else if gap >= self.rules.max_interval_ms {
                    Some(FailReason::TooSlow)
                } else {
                    None
                };
                if let Some(reason) = verdict {
                    self.progress = 0;
                    self.last_climb_at = None;
                    return ClimbOutcome::Fell(reason);
                }
            }
        }

        self.progress += 1;
        self.last_climb_at = Some(now_ms);
        ClimbOutcome::Climbed {
            progress: self.progress,
            reached_top: self.at_top(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Ladder {
        Ladder::new(LadderRules::default())
    }

    #[test]
    fn too_slow_climb_resets_run() {
        let mut l = ladder();
        assert_eq!(
            l.climb(0.0),
            ClimbOutcome::Climbed { progress: 1, reached_top: false }
        );
        assert_eq!(
            l.climb(500.0),
            ClimbOutcome::Climbed { progress: 2, reached_top: false }
        );
        assert_eq!(l.climb(2000.0), ClimbOutcome::Fell(FailReason::TooSlow));
        assert_eq!(l.progress(), 0);
    }

    #[test]
    fn window_is_closed_open() {
        let mut l = ladder();
        l.climb(0.0);
        assert!(matches!(l.climb(400.0), ClimbOutcome::Climbed { progress: 2, .. }));
        assert_eq!(l.climb(1600.0), ClimbOutcome::Fell(FailReason::TooSlow));

        let mut l = ladder();
        l.climb(0.0);
        assert!(matches!(l.climb(1199.0), ClimbOutcome::Climbed { .. }));
    }

    #[test]
    fn too_fast_outside_resolve_delay_fails() {
        let mut l = ladder();
        l.climb(0.0);
        assert_eq!(l.climb(50.0), ClimbOutcome::Ignored);
        assert_eq!(l.progress(), 1);
        assert_eq!(l.climb(250.0), ClimbOutcome::Fell(FailReason::TooFast));
        // the next input after a fall starts a new run, whatever the gap
        assert!(matches!(l.climb(5000.0), ClimbOutcome::Climbed { progress: 1, .. }));
    }

    #[test]
    fn top_is_terminal() {
        let mut l = ladder();
        let mut t = 0.0;
        let mut last = ClimbOutcome::Ignored;
        for _ in 0..20 {
            last = l.climb(t);
            t += 600.0;
        }
        assert_eq!(last, ClimbOutcome::Climbed { progress: 20, reached_top: true });
        assert_eq!(l.climb(t), ClimbOutcome::Ignored);
        assert_eq!(l.climb(t + 10_000.0), ClimbOutcome::Ignored);
        assert_eq!(l.progress(), 20);
    }

    #[test]
    fn progress_matches_trailing_run_of_valid_gaps() {
        // first, ok, ok, fast (fall), first, ok, slow (fall), first, ok
        let times = [0.0, 500.0, 1100.0, 1300.0, 3000.0, 3800.0, 6000.0, 9000.0, 9700.0];
        let mut l = ladder();
        for t in times {
            l.climb(t);
        }
        assert_eq!(l.progress(), 2);
    }

    #[test]
    fn resume_clamps_saved_value() {
        let l = Ladder::resume(LadderRules::default(), 42);
        assert!(l.at_top());
        let mut l = Ladder::resume(LadderRules::default(), 5);
        assert!(matches!(l.climb(10.0), ClimbOutcome::Climbed { progress: 6, .. }));
    }
}
