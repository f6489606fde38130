//! Car class model.

use serde::{Deserialize, Serialize};

/// A car class: the set of options every car of this class requires.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarClass {
    /// `requires[o]` is true when the class needs option `o`.
    pub requires: Vec<bool>,
}

impl CarClass {
    /// Creates a class from its per-option requirement flags.
    pub fn new(requires: Vec<bool>) -> Self {
        Self { requires }
    }

    /// Whether this class needs option `option`.
    ///
    /// Options beyond the row are treated as not required.
    #[inline]
    pub fn requires(&self, option: usize) -> bool {
        self.requires.get(option).copied().unwrap_or(false)
    }

    /// Number of options this class needs.
    pub fn required_count(&self) -> usize {
        self.requires.iter().filter(|&&r| r).count()
    }
}
