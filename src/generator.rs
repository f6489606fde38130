//! Synthetic instance generation.
//!
//! Produces random but structurally valid instances for tests and
//! benchmarks. Cars are assigned to classes uniformly at random and the
//! initial plan lists them grouped by class, as the text format does.
//!
//! # Example
//! ```
//! use u_carseq::generator::InstanceGenerator;
//!
//! let (instance, counts) = InstanceGenerator::new(50, 4, 8)
//!     .with_seed(42)
//!     .generate_with_counts()
//!     .unwrap();
//! assert_eq!(counts.iter().sum::<usize>(), 50);
//! assert_eq!(instance.class_counts(), counts);
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigurationError;
use crate::models::Instance;

/// Configuration for random instance generation.
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    /// Number of positions (cars).
    pub position_count: usize,
    /// Number of options.
    pub option_count: usize,
    /// Number of classes.
    pub class_count: usize,
    /// Probability that a class requires any given option.
    pub option_probability: f64,
    /// Largest window size drawn for an option.
    pub max_window: usize,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl InstanceGenerator {
    /// Creates a generator with the given dimensions.
    pub fn new(position_count: usize, option_count: usize, class_count: usize) -> Self {
        Self {
            position_count,
            option_count,
            class_count,
            option_probability: 0.3,
            max_window: 5,
            seed: None,
        }
    }

    /// Sets the per-option requirement probability (clamped to 0.0..=1.0).
    pub fn with_option_probability(mut self, p: f64) -> Self {
        self.option_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the largest window size (at least 1).
    pub fn with_max_window(mut self, w: usize) -> Self {
        self.max_window = w.max(1);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generates an instance.
    pub fn generate(&self) -> Result<Instance, ConfigurationError> {
        self.generate_with_counts().map(|(instance, _)| instance)
    }

    /// Generates an instance along with the per-class car counts used.
    ///
    /// # Errors
    /// [`ConfigurationError::Invalid`] when a dimension is zero.
    pub fn generate_with_counts(&self) -> Result<(Instance, Vec<usize>), ConfigurationError> {
        let mut rng = SmallRng::seed_from_u64(self.seed.unwrap_or_else(rand::random));
        let max_window = self.max_window.max(1);

        let mut max_per_window = Vec::with_capacity(self.option_count);
        let mut window_size = Vec::with_capacity(self.option_count);
        for _ in 0..self.option_count {
            let size = rng.random_range(1..=max_window);
            let max = if size > 1 { rng.random_range(1..size) } else { 1 };
            window_size.push(size);
            max_per_window.push(max);
        }

        let class_options: Vec<Vec<bool>> = (0..self.class_count)
            .map(|_| {
                (0..self.option_count)
                    .map(|_| rng.random_bool(self.option_probability))
                    .collect()
            })
            .collect();

        let mut counts = vec![0usize; self.class_count];
        if self.class_count > 0 {
            for _ in 0..self.position_count {
                counts[rng.random_range(0..self.class_count)] += 1;
            }
        }

        let initial_sequence: Vec<usize> = counts
            .iter()
            .enumerate()
            .flat_map(|(c, &n)| std::iter::repeat_n(c, n))
            .collect();

        let instance = Instance::from_parts(
            self.position_count,
            self.option_count,
            max_per_window,
            window_size,
            class_options,
            initial_sequence,
        )?;
        Ok((instance, counts))
    }
}
