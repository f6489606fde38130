//! GA-based car-sequencing optimization.
//!
//! Plugs the car-sequencing objective into `u-metaheur`'s generic GA
//! framework. The search itself lives in `u-metaheur`; this module only
//! supplies the encoding, the operators, and the fitness.
//!
//! # Encoding
//!
//! A chromosome is a candidate: a permutation of original car indices.
//! Gene `i` names the car placed at position `i`. All operators preserve
//! the permutation property, so every offspring scores without penalty.
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies
//!
//! # Reference
//! - Warwick & Tsang (1995), "Tackling car sequencing problems using a
//!   generic genetic algorithm"
//! - Goldberg & Lingle (1985), "Alleles, loci, and the traveling salesman problem"

mod chromosome;
pub mod operators;
mod problem;

pub use chromosome::{
    SequenceChromosome, insert_mutation, invert_mutation, order_crossover, pmx_crossover,
    swap_mutation,
};
pub use problem::CarSequencingGaProblem;
