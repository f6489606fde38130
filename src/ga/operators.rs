//! Configurable genetic operators for car sequencing.
//!
//! Provides runtime-selectable crossover and mutation strategies
//! via [`GeneticOperators`].
//!
//! # Usage
//!
//! ```
//! use u_carseq::ga::operators::{GeneticOperators, CrossoverType, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::OX);
//! assert_eq!(ops.mutation_type, MutationType::Swap);
//! ```

use rand::Rng;

use super::chromosome::{
    SequenceChromosome, insert_mutation, invert_mutation, order_crossover, pmx_crossover,
    swap_mutation,
};

/// Crossover strategy for sequence chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverType {
    /// Order Crossover (Davis, 1985).
    OX,
    /// Partially Mapped Crossover (Goldberg & Lingle, 1985).
    PMX,
}

/// Mutation strategy for sequence chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    /// Swap two random positions.
    Swap,
    /// Remove and reinsert at a random position.
    Insert,
    /// Reverse a random segment.
    Invert,
}

/// Runtime-selectable genetic operators for car-sequencing GA.
///
/// # Example
///
/// ```
/// use u_carseq::ga::operators::{GeneticOperators, CrossoverType, MutationType};
///
/// let ops = GeneticOperators {
///     crossover_type: CrossoverType::PMX,
///     mutation_type: MutationType::Invert,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation strategy.
    pub mutation_type: MutationType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_type: CrossoverType::OX,
            mutation_type: MutationType::Swap,
        }
    }
}

impl GeneticOperators {
    /// Performs crossover using the configured strategy.
    pub fn crossover<R: Rng>(
        &self,
        p1: &SequenceChromosome,
        p2: &SequenceChromosome,
        rng: &mut R,
    ) -> (SequenceChromosome, SequenceChromosome) {
        match self.crossover_type {
            CrossoverType::OX => order_crossover(p1, p2, rng),
            CrossoverType::PMX => pmx_crossover(p1, p2, rng),
        }
    }

    /// Performs mutation using the configured strategy.
    pub fn mutate<R: Rng>(&self, chromosome: &mut SequenceChromosome, rng: &mut R) {
        match self.mutation_type {
            MutationType::Swap => swap_mutation(&mut chromosome.order, rng),
            MutationType::Insert => insert_mutation(&mut chromosome.order, rng),
            MutationType::Invert => invert_mutation(&mut chromosome.order, rng),
        }
    }
}
