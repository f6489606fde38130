//! Car-sequencing GA problem definition.
//!
//! Implements `u_metaheur::ga::GaProblem` so the framework's GA runner
//! can minimize total window violation. Bridges the instance model and
//! objective evaluator to the generic GA framework.
//!
//! # Reference
//! Warwick & Tsang (1995), "Tackling car sequencing problems using a
//! generic genetic algorithm"

use rand::Rng;
use u_metaheur::ga::GaProblem;

use super::chromosome::SequenceChromosome;
use super::operators::GeneticOperators;
use crate::evaluation::{reconstruct_sequence, score};
use crate::models::Instance;

/// GA problem definition for car sequencing.
///
/// Fitness is the evaluator's flat score as `f64`; an invalid chromosome
/// (which the built-in operators never produce) gets the penalty score.
///
/// # Example
/// ```no_run
/// use u_carseq::ga::CarSequencingGaProblem;
/// use u_carseq::models::Instance;
/// use u_metaheur::ga::{GaConfig, GaRunner};
///
/// let instance: Instance = "4 1 2 1 2 0 2 1 1 2 0".parse().unwrap();
/// let problem = CarSequencingGaProblem::new(&instance);
/// let result = GaRunner::run(&problem, &GaConfig::default()).unwrap();
/// println!("best: {:?} ({})", result.best.order, result.best_fitness);
/// ```
#[derive(Debug, Clone)]
pub struct CarSequencingGaProblem<'a> {
    /// The instance being solved.
    pub instance: &'a Instance,
    /// Crossover and mutation strategies.
    pub operators: GeneticOperators,
    /// Probability of seeding an individual with the initial plan
    /// instead of a random order (default: 0.0).
    pub identity_seed_rate: f64,
}

impl<'a> CarSequencingGaProblem<'a> {
    /// Creates a problem with default operators.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            operators: GeneticOperators::default(),
            identity_seed_rate: 0.0,
        }
    }

    /// Sets the genetic operators.
    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    /// Sets the identity seeding rate (clamped to 0.0..=1.0).
    pub fn with_identity_seed_rate(mut self, rate: f64) -> Self {
        self.identity_seed_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Decodes a chromosome into its class sequence.
    pub fn decode(&self, chromosome: &SequenceChromosome) -> Option<Vec<usize>> {
        reconstruct_sequence(self.instance, &chromosome.order)
    }
}

impl GaProblem for CarSequencingGaProblem<'_> {
    type Individual = SequenceChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> SequenceChromosome {
        if self.identity_seed_rate > 0.0 && rng.random_bool(self.identity_seed_rate) {
            SequenceChromosome::identity(self.instance)
        } else {
            SequenceChromosome::random(self.instance, rng)
        }
    }

    fn evaluate(&self, individual: &SequenceChromosome) -> f64 {
        score(self.instance, &individual.order) as f64
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &SequenceChromosome,
        parent2: &SequenceChromosome,
        rng: &mut R,
    ) -> Vec<SequenceChromosome> {
        let (c1, c2) = self.operators.crossover(parent1, parent2, rng);
        vec![c1, c2]
    }

    fn mutate<R: Rng>(&self, individual: &mut SequenceChromosome, rng: &mut R) {
        self.operators.mutate(individual, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        tracing::trace!(generation, best_fitness, "car-sequencing GA generation");
    }
}
