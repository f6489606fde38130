//! Simulated annealing bridge for car sequencing.
//!
//! Implements `u_metaheur::sa::SaProblem` over candidates. Neighbors are
//! swap or insert moves, which keep every solution a valid permutation.
//!
//! # Reference
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

use rand::Rng;
use u_metaheur::sa::SaProblem;

use crate::evaluation::{random_candidate, score};
use crate::ga::{insert_mutation, swap_mutation};
use crate::models::Instance;

/// SA problem definition for car sequencing.
///
/// # Example
/// ```no_run
/// use u_carseq::models::Instance;
/// use u_carseq::sa::CarSequencingSaProblem;
/// use u_metaheur::sa::{SaConfig, SaRunner};
///
/// let instance: Instance = "4 1 2 1 2 0 2 1 1 2 0".parse().unwrap();
/// let problem = CarSequencingSaProblem::new(&instance);
/// let result = SaRunner::run(&problem, &SaConfig::default().with_seed(7));
/// println!("violations: {}", result.best_cost);
/// ```
#[derive(Debug, Clone)]
pub struct CarSequencingSaProblem<'a> {
    /// The instance being solved.
    pub instance: &'a Instance,
    /// Probability of an insert move instead of a swap (default: 0.5).
    pub insert_probability: f64,
}

impl<'a> CarSequencingSaProblem<'a> {
    /// Creates a problem with an even swap/insert mix.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            insert_probability: 0.5,
        }
    }

    /// Sets the insert-move probability (clamped to 0.0..=1.0).
    pub fn with_insert_probability(mut self, p: f64) -> Self {
        self.insert_probability = p.clamp(0.0, 1.0);
        self
    }
}

impl SaProblem for CarSequencingSaProblem<'_> {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        random_candidate(self.instance, rng)
    }

    fn cost(&self, solution: &Vec<usize>) -> f64 {
        score(self.instance, solution) as f64
    }

    fn neighbor<R: Rng>(&self, solution: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let mut next = solution.clone();
        if rng.random_bool(self.insert_probability) {
            insert_mutation(&mut next, rng);
        } else {
            swap_mutation(&mut next, rng);
        }
        next
    }
}
