//! Production-line option model.
//!
//! An option (sunroof, air conditioning, ...) is installed by a station
//! that can handle at most `max_per_window` cars out of any
//! `window_size` consecutive cars on the line.
//!
//! # Reference
//! Dincbas, Simonis & Van Hentenryck (1988), "Solving the Car-Sequencing
//! Problem in Constraint Logic Programming"

use serde::{Deserialize, Serialize};

/// Capacity rule for one option: at most `max_per_window` cars requiring
/// the option in any run of `window_size` consecutive positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarOption {
    /// Maximum cars with this option allowed in one window.
    pub max_per_window: usize,
    /// Length of the sliding window (positive).
    pub window_size: usize,
}

impl CarOption {
    /// Creates an option rule.
    pub fn new(max_per_window: usize, window_size: usize) -> Self {
        Self {
            max_per_window,
            window_size,
        }
    }

    /// Violation contributed by one window holding `count` option cars.
    #[inline]
    pub fn excess(&self, count: usize) -> usize {
        count.saturating_sub(self.max_per_window)
    }

    /// Number of windows that fit in a sequence of `position_count` cars.
    ///
    /// Zero when the window is longer than the sequence.
    #[inline]
    pub fn window_count(&self, position_count: usize) -> usize {
        if self.window_size == 0 || self.window_size > position_count {
            0
        } else {
            position_count - self.window_size + 1
        }
    }

    /// The `p/q` ratio notation used in benchmark libraries (e.g. `1/2`).
    pub fn ratio(&self) -> String {
        format!("{}/{}", self.max_per_window, self.window_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excess() {
        let opt = CarOption::new(2, 5);
        assert_eq!(opt.excess(0), 0);
        assert_eq!(opt.excess(2), 0);
        assert_eq!(opt.excess(4), 2);
    }

    #[test]
    fn test_window_count() {
        let opt = CarOption::new(1, 3);
        assert_eq!(opt.window_count(10), 8);
        assert_eq!(opt.window_count(3), 1);
        assert_eq!(opt.window_count(2), 0);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(CarOption::new(1, 2).ratio(), "1/2");
    }
}
