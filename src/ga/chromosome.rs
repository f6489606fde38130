//! Permutation chromosome for car sequencing.
//!
//! # Encoding
//!
//! `order[i]` is the index (into the initial plan) of the car placed at
//! position `i`. The chromosome is a candidate in the evaluator's sense.
//!
//! # Reference
//! Goldberg & Lingle (1985), Davis (1985)

use rand::Rng;
use u_metaheur::ga::Individual;

use crate::evaluation::{identity_candidate, random_candidate};
use crate::models::Instance;
use crate::validation::is_permutation;

/// Permutation chromosome for car-sequencing GA.
///
/// Lower fitness = fewer violations (minimization convention).
#[derive(Debug, Clone)]
pub struct SequenceChromosome {
    /// Car index per position.
    pub order: Vec<usize>,
    /// Fitness value (lower = better).
    pub fitness: f64,
}

impl Individual for SequenceChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl SequenceChromosome {
    /// Wraps an order with unevaluated fitness.
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            fitness: f64::INFINITY,
        }
    }

    /// Creates a random chromosome.
    pub fn random<R: Rng>(instance: &Instance, rng: &mut R) -> Self {
        Self::new(random_candidate(instance, rng))
    }

    /// The chromosome that keeps the initial plan.
    pub fn identity(instance: &Instance) -> Self {
        Self::new(identity_candidate(instance))
    }

    /// Whether the order is a permutation of `0..position_count`.
    pub fn is_valid(&self, instance: &Instance) -> bool {
        is_permutation(&self.order, instance.position_count())
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Draws two cut points `lo <= hi` in `0..len`.
fn cut_points<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..len);
    let b = rng.random_range(0..len);
    (a.min(b), a.max(b))
}

// ======================== Crossover operators ========================

/// Performs OX (Order Crossover).
///
/// Copies a random segment from one parent and fills the remaining
/// positions, starting after the segment and wrapping around, with the
/// other parent's genes in their order of appearance.
///
/// # Reference
/// Davis (1985), "Applying adaptive algorithms to epistatic domains"
pub fn order_crossover<R: Rng>(
    p1: &SequenceChromosome,
    p2: &SequenceChromosome,
    rng: &mut R,
) -> (SequenceChromosome, SequenceChromosome) {
    let len = p1.order.len();
    if len < 2 || p2.order.len() != len {
        return (
            SequenceChromosome::new(p1.order.clone()),
            SequenceChromosome::new(p2.order.clone()),
        );
    }

    let (lo, hi) = cut_points(len, rng);
    let c1 = ox_build_child(&p1.order, &p2.order, lo, hi);
    let c2 = ox_build_child(&p2.order, &p1.order, lo, hi);
    (SequenceChromosome::new(c1), SequenceChromosome::new(c2))
}

fn ox_build_child(template: &[usize], donor: &[usize], lo: usize, hi: usize) -> Vec<usize> {
    let len = template.len();
    let mut child = vec![0; len];
    let mut used = vec![false; len];

    for i in lo..=hi {
        child[i] = template[i];
        used[template[i]] = true;
    }

    let mut write = (hi + 1) % len;
    for k in 0..len {
        let gene = donor[(hi + 1 + k) % len];
        if used[gene] {
            continue;
        }
        child[write] = gene;
        used[gene] = true;
        write = (write + 1) % len;
    }
    child
}

/// Performs PMX (Partially Mapped Crossover).
///
/// Copies a random segment from one parent; genes of the other parent
/// displaced by the segment are relocated through the segment's mapping,
/// and all other positions are inherited from the other parent directly.
///
/// # Reference
/// Goldberg & Lingle (1985)
pub fn pmx_crossover<R: Rng>(
    p1: &SequenceChromosome,
    p2: &SequenceChromosome,
    rng: &mut R,
) -> (SequenceChromosome, SequenceChromosome) {
    let len = p1.order.len();
    if len < 2 || p2.order.len() != len {
        return (
            SequenceChromosome::new(p1.order.clone()),
            SequenceChromosome::new(p2.order.clone()),
        );
    }

    let (lo, hi) = cut_points(len, rng);
    let c1 = pmx_build_child(&p1.order, &p2.order, lo, hi);
    let c2 = pmx_build_child(&p2.order, &p1.order, lo, hi);
    (SequenceChromosome::new(c1), SequenceChromosome::new(c2))
}

fn pmx_build_child(template: &[usize], donor: &[usize], lo: usize, hi: usize) -> Vec<usize> {
    let len = template.len();
    let mut child: Vec<Option<usize>> = vec![None; len];
    let mut placed = vec![false; len];
    let mut donor_pos = vec![0; len];
    for (i, &gene) in donor.iter().enumerate() {
        donor_pos[gene] = i;
    }

    for i in lo..=hi {
        child[i] = Some(template[i]);
        placed[template[i]] = true;
    }

    for i in lo..=hi {
        let gene = donor[i];
        if placed[gene] {
            continue;
        }
        // Follow the mapping until it leaves the segment
        let mut pos = donor_pos[template[i]];
        while (lo..=hi).contains(&pos) {
            pos = donor_pos[template[pos]];
        }
        child[pos] = Some(gene);
        placed[gene] = true;
    }

    child
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.unwrap_or(donor[i]))
        .collect()
}

// ======================== Mutation operators ========================

/// Swap mutation: exchanges the cars at two random positions.
pub fn swap_mutation<R: Rng>(order: &mut [usize], rng: &mut R) {
    let len = order.len();
    if len < 2 {
        return;
    }
    let i = rng.random_range(0..len);
    let j = rng.random_range(0..len);
    order.swap(i, j);
}

/// Insert mutation: removes a car and reinserts it at a random position.
pub fn insert_mutation<R: Rng>(order: &mut Vec<usize>, rng: &mut R) {
    let len = order.len();
    if len < 2 {
        return;
    }
    let from = rng.random_range(0..len);
    let to = rng.random_range(0..len);
    let car = order.remove(from);
    order.insert(to, car);
}

/// Invert mutation: reverses a random segment.
pub fn invert_mutation<R: Rng>(order: &mut [usize], rng: &mut R) {
    let len = order.len();
    if len < 2 {
        return;
    }
    let (i, j) = cut_points(len, rng);
    order[i..=j].reverse();
}
