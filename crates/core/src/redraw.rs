/// How the panel should be refreshed on flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawMode {
    /// Update changed pixels only: fast, but artifacts accumulate.
    Partial,
    /// Complete refresh: slow, clears accumulated ghosting.
    Full,
}

/// Forces a full redraw after `max_partial` consecutive partial redraws.
///
/// The counter starts at the threshold, so the first decision is always
/// [`RedrawMode::Full`].
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    max_partial: u32,
    partial_count: u32,
}

impl RedrawScheduler {
    pub fn new(max_partial: u32) -> Self {
        Self {
            max_partial,
            partial_count: max_partial,
        }
    }

    #[must_use]
    pub fn decide(&self) -> RedrawMode {
        if self.partial_count >= self.max_partial {
            RedrawMode::Full
        } else {
            RedrawMode::Partial
        }
    }

    /// Record that a flush in `mode` happened.
    pub fn record(&mut self, mode: RedrawMode) {
        match mode {
            RedrawMode::Full    => self.partial_count = 0,
            RedrawMode::Partial => self.partial_count = (self.partial_count + 1).min(self.max_partial),
        }
    }

    /// Partial redraws since the last full one.
    #[must_use]
    pub fn partial_count(&self) -> u32 {
        self.partial_count
    }

    #[must_use]
    pub fn max_partial(&self) -> u32 {
        self.max_partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RedrawMode::{Full, Partial};

    fn run(max_partial: u32, cycles: usize) -> Vec<RedrawMode> {
        let mut s = RedrawScheduler::new(max_partial);
        (0..cycles)
            .map(|_| {
                let mode = s.decide();
                s.record(mode);
                mode
            })
            .collect()
    }

    #[test]
    fn first_decision_is_full() {
        assert_eq!(RedrawScheduler::new(5).decide(), Full);
    }

    #[test]
    fn period_is_max_partial_plus_one() {
        assert_eq!(
            run(5, 8),
            vec![Full, Partial, Partial, Partial, Partial, Partial, Full, Partial]
        );
    }

    #[test]
    fn zero_threshold_always_full() {
        assert!(run(0, 4).into_iter().all(|m| m == Full));
    }

    #[test]
    fn counter_stays_in_range() {
        let mut s = RedrawScheduler::new(2);
        for _ in 0..10 {
            s.record(Partial);
            assert!(s.partial_count() <= s.max_partial());
        }
        s.record(Full);
        assert_eq!(s.partial_count(), 0);
    }
}
