//! Progress reporting for long-running parses
//!
//! Parsers in idfkit are pumped as iterators that yield a percentage after
//! every unit of work. `Progress` turns "work done out of total" into that
//! percentage, mapped onto a sub-range so that a multi-phase operation (object
//! ingestion followed by reference connection) can share a single 0-100
//! scale.

/// A monotonic percentage meter over a fixed amount of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    total: usize,
    done: usize,
    floor: u8,
    ceiling: u8,
    last: u8,
}

impl Progress {
    /// Creates a meter covering the full 0-100 range.
    #[must_use]
    pub const fn new(total: usize) -> Self {
        Self::with_range(total, 0, 100)
    }

    /// Creates a meter reporting within `floor..=ceiling`.
    ///
    /// # Panics
    ///
    /// Panics if `floor > ceiling` or `ceiling > 100`.
    #[must_use]
    pub const fn with_range(total: usize, floor: u8, ceiling: u8) -> Self {
        assert!(floor <= ceiling, "progress floor must not exceed ceiling");
        assert!(ceiling <= 100, "progress ceiling must not exceed 100");

        Self {
            total,
            done: 0,
            floor,
            ceiling,
            last: floor,
        }
    }

    /// Records `amount` more units of work and returns the new percentage.
    ///
    /// The returned value never decreases and never exceeds the ceiling.
    pub fn advance(&mut self, amount: usize) -> u8 {
        self.done = self.done.saturating_add(amount).min(self.total);
        let current = self.compute();
        self.last = self.last.max(current);
        self.last
    }

    /// Marks all work as done and returns the ceiling.
    pub fn finish(&mut self) -> u8 {
        self.done = self.total;
        self.last = self.ceiling;
        self.last
    }

    /// Returns the last reported percentage.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.last
    }

    /// Returns whether all work has been recorded.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.done >= self.total
    }

    fn compute(&self) -> u8 {
        if self.total == 0 {
            return self.floor;
        }

        let span = usize::from(self.ceiling - self.floor);
        let scaled = span * self.done / self.total;
        // scaled <= span <= 100
        self.floor + u8::try_from(scaled).unwrap_or(self.ceiling - self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_within_range() {
        let mut progress = Progress::with_range(4, 50, 100);
        assert_eq!(progress.percent(), 50);
        assert_eq!(progress.advance(1), 62);
        assert_eq!(progress.advance(1), 75);
        assert_eq!(progress.advance(2), 100);
        assert!(progress.is_finished());
    }

    #[test]
    fn never_exceeds_total() {
        let mut progress = Progress::new(10);
        assert_eq!(progress.advance(25), 100);
        assert_eq!(progress.advance(1), 100);
    }

    #[test]
    fn empty_work_stays_at_floor_until_finished() {
        let mut progress = Progress::with_range(0, 0, 50);
        assert_eq!(progress.advance(1), 0);
        assert_eq!(progress.finish(), 50);
    }
}
