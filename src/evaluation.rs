//! Objective evaluation for car-sequencing candidates.
//!
//! A candidate is a permutation of original car indices: `candidate[i]`
//! is the car (index into the initial plan) placed at position `i`. The
//! objective sums, over every option and every window of that option's
//! size, the number of option cars exceeding the window maximum.
//! Overlapping windows are counted independently.
//!
//! Evaluation is total: an invalid candidate yields
//! [`Evaluation::Invalid`] (score [`PENALTY`]) rather than an error, so a
//! search driver can keep going after proposing garbage.
//!
//! # Complexity
//! O(option_count × position_count) per call, using a running window count.
//!
//! # Reference
//! Gottlieb, Puchta & Solnon (2003), "A Study of Greedy, Local Search, and
//! Ant Colony Optimization Approaches for Car Sequencing Problems"

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{CarOption, Instance};
use crate::validation::is_permutation;

/// Score assigned to structurally invalid candidates.
pub const PENALTY: u64 = 1_000_000_000;

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluation {
    /// Valid permutation with its total violation.
    Scored(u64),
    /// Wrong length or not a permutation.
    Invalid,
}

impl Evaluation {
    /// Flat score: the violation total, or [`PENALTY`] when invalid.
    #[inline]
    pub fn score(self) -> u64 {
        match self {
            Evaluation::Scored(s) => s,
            Evaluation::Invalid => PENALTY,
        }
    }

    /// Whether the candidate was a valid permutation.
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Evaluation::Scored(_))
    }

    /// Whether the candidate was valid and violates nothing.
    #[inline]
    pub fn is_feasible(self) -> bool {
        self == Evaluation::Scored(0)
    }
}

/// Per-option breakdown of a candidate's violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationReport {
    /// Sum of excesses per option.
    pub excess_by_option: Vec<u64>,
    /// Number of windows over their maximum, per option.
    pub violated_windows_by_option: Vec<usize>,
    /// Sum over all options. Equals [`score`] for the same candidate.
    pub total: u64,
}

impl ViolationReport {
    /// Options with at least one violated window.
    pub fn violated_options(&self) -> Vec<usize> {
        self.excess_by_option
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e > 0)
            .map(|(o, _)| o)
            .collect()
    }
}

/// Evaluates a candidate against an instance.
///
/// # Example
/// ```
/// use u_carseq::evaluation::{evaluate, Evaluation};
/// use u_carseq::models::Instance;
///
/// let instance: Instance = "4 1 2  1  2  0 2 1  1 2 0".parse().unwrap();
/// assert_eq!(evaluate(&instance, &[0, 1, 2, 3]), Evaluation::Scored(1));
/// assert_eq!(evaluate(&instance, &[0, 2, 1, 3]), Evaluation::Scored(0));
/// assert_eq!(evaluate(&instance, &[0, 0, 1, 2]), Evaluation::Invalid);
/// ```
pub fn evaluate(instance: &Instance, candidate: &[usize]) -> Evaluation {
    let Some(sequence) = reconstruct_sequence(instance, candidate) else {
        return Evaluation::Invalid;
    };

    let mut flags = vec![false; sequence.len()];
    let total = instance
        .options()
        .iter()
        .enumerate()
        .map(|(o, option)| {
            fill_option_flags(instance, &sequence, o, &mut flags);
            scan_windows(option, &flags).0
        })
        .sum();

    Evaluation::Scored(total)
}

/// Flat score of a candidate: violation total, or [`PENALTY`] when invalid.
pub fn score(instance: &Instance, candidate: &[usize]) -> u64 {
    evaluate(instance, candidate).score()
}

/// Class sequence produced by a candidate.
///
/// Returns `sequence[i] = initial_sequence[candidate[i]]`, or `None` if
/// the candidate is not a permutation of `0..position_count`.
pub fn reconstruct_sequence(instance: &Instance, candidate: &[usize]) -> Option<Vec<usize>> {
    if !is_permutation(candidate, instance.position_count()) {
        return None;
    }
    let plan = instance.initial_sequence();
    Some(candidate.iter().map(|&car| plan[car]).collect())
}

/// Per-option violation breakdown, or `None` for an invalid candidate.
pub fn violation_report(instance: &Instance, candidate: &[usize]) -> Option<ViolationReport> {
    let sequence = reconstruct_sequence(instance, candidate)?;

    let option_count = instance.option_count();
    let mut excess_by_option = Vec::with_capacity(option_count);
    let mut violated_windows_by_option = Vec::with_capacity(option_count);
    let mut flags = vec![false; sequence.len()];

    for (o, option) in instance.options().iter().enumerate() {
        fill_option_flags(instance, &sequence, o, &mut flags);
        let (excess, violated) = scan_windows(option, &flags);
        excess_by_option.push(excess);
        violated_windows_by_option.push(violated);
    }

    let total = excess_by_option.iter().sum();
    Some(ViolationReport {
        excess_by_option,
        violated_windows_by_option,
        total,
    })
}

/// Evaluates a population of candidates.
///
/// With the `parallel` feature, candidates are evaluated concurrently.
pub fn evaluate_batch(instance: &Instance, candidates: &[Vec<usize>]) -> Vec<Evaluation> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        candidates
            .par_iter()
            .map(|c| evaluate(instance, c))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        candidates.iter().map(|c| evaluate(instance, c)).collect()
    }
}

/// Uniformly random candidate (Fisher-Yates shuffle of `0..position_count`).
pub fn random_candidate<R: Rng>(instance: &Instance, rng: &mut R) -> Vec<usize> {
    let mut candidate = identity_candidate(instance);
    candidate.shuffle(rng);
    candidate
}

/// The candidate that keeps the initial plan unchanged.
pub fn identity_candidate(instance: &Instance) -> Vec<usize> {
    (0..instance.position_count()).collect()
}

fn fill_option_flags(instance: &Instance, sequence: &[usize], option: usize, flags: &mut [bool]) {
    for (flag, &class) in flags.iter_mut().zip(sequence) {
        *flag = instance.requires(class, option);
    }
}

/// Slides one option's window across the flag vector.
///
/// Returns (total excess, number of violated windows).
fn scan_windows(option: &CarOption, flags: &[bool]) -> (u64, usize) {
    let windows = option.window_count(flags.len());
    if windows == 0 {
        return (0, 0);
    }
    let size = option.window_size;

    let mut count = flags[..size].iter().filter(|&&f| f).count();
    let mut excess = 0u64;
    let mut violated = 0usize;
    for start in 0..windows {
        if start > 0 {
            count -= usize::from(flags[start - 1]);
            count += usize::from(flags[start + size - 1]);
        }
        let over = option.excess(count);
        if over > 0 {
            excess += over as u64;
            violated += 1;
        }
    }
    (excess, violated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn two_class_instance() -> Instance {
        Instance::builder()
            .with_position_count(4)
            .with_option_count(1)
            .with_max_per_window(vec![1])
            .with_window_size(vec![2])
            .with_class_options(vec![vec![true], vec![false]])
            .with_initial_sequence(vec![0, 0, 1, 1])
            .build()
            .unwrap()
    }

    fn csplib_sample() -> Instance {
        "10 5 6
         1 2 1 2 1
         2 3 3 5 5
         0 1 1 0 1 1 0
         1 1 0 0 0 1 0
         2 2 0 1 0 0 1
         3 2 0 1 0 1 0
         4 2 1 0 1 0 0
         5 2 1 1 0 0 0"
            .parse()
            .unwrap()
    }

    /// Direct translation of the window definition, for cross-checking.
    fn naive_score(instance: &Instance, candidate: &[usize]) -> u64 {
        let seq: Vec<usize> = candidate
            .iter()
            .map(|&i| instance.initial_sequence()[i])
            .collect();
        let n = instance.position_count();
        let mut total = 0u64;
        for (o, opt) in instance.options().iter().enumerate() {
            if opt.window_size > n {
                continue;
            }
            for j in 0..=(n - opt.window_size) {
                let count = (j..j + opt.window_size)
                    .filter(|&k| instance.requires(seq[k], o))
                    .count();
                if count > opt.max_per_window {
                    total += (count - opt.max_per_window) as u64;
                }
            }
        }
        total
    }

    #[test]
    fn test_identity_scenario() {
        let instance = two_class_instance();
        assert_eq!(evaluate(&instance, &[0, 1, 2, 3]), Evaluation::Scored(1));
    }

    #[test]
    fn test_interleaved_scenario() {
        let instance = two_class_instance();
        let eval = evaluate(&instance, &[0, 2, 1, 3]);
        assert_eq!(eval, Evaluation::Scored(0));
        assert!(eval.is_feasible());
    }

    #[test]
    fn test_identity_reconstructs_plan() {
        let instance = csplib_sample();
        let seq = reconstruct_sequence(&instance, &identity_candidate(&instance)).unwrap();
        assert_eq!(seq, instance.initial_sequence());
    }

    #[test]
    fn test_reconstruction_reorders_cars() {
        let instance = two_class_instance();
        let seq = reconstruct_sequence(&instance, &[2, 0, 3, 1]).unwrap();
        assert_eq!(seq, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_invalid_candidates() {
        let instance = two_class_instance();
        for bad in [
            vec![],
            vec![0, 1, 2],
            vec![0, 1, 2, 3, 4],
            vec![0, 1, 1, 3],
            vec![0, 1, 2, 4],
        ] {
            let eval = evaluate(&instance, &bad);
            assert_eq!(eval, Evaluation::Invalid, "candidate {bad:?}");
            assert_eq!(eval.score(), PENALTY);
            assert!(!eval.is_valid());
            assert!(violation_report(&instance, &bad).is_none());
        }
    }

    #[test]
    fn test_overlapping_windows_counted_separately() {
        // Three option cars in a row, max 1 per window of 2:
        // windows (0,1) and (1,2) each exceed by 1.
        let instance = Instance::builder()
            .with_position_count(3)
            .with_option_count(1)
            .with_max_per_window(vec![1])
            .with_window_size(vec![2])
            .with_class_options(vec![vec![true]])
            .with_initial_sequence(vec![0, 0, 0])
            .build()
            .unwrap();
        assert_eq!(score(&instance, &[0, 1, 2]), 2);
    }

    #[test]
    fn test_window_longer_than_sequence() {
        let instance = Instance::builder()
            .with_position_count(3)
            .with_option_count(1)
            .with_max_per_window(vec![0])
            .with_window_size(vec![5])
            .with_class_options(vec![vec![true]])
            .with_initial_sequence(vec![0, 0, 0])
            .build()
            .unwrap();
        assert_eq!(evaluate(&instance, &[2, 1, 0]), Evaluation::Scored(0));
    }

    #[test]
    fn test_window_equal_to_sequence() {
        let instance = Instance::builder()
            .with_position_count(3)
            .with_option_count(1)
            .with_max_per_window(vec![1])
            .with_window_size(vec![3])
            .with_class_options(vec![vec![true]])
            .with_initial_sequence(vec![0, 0, 0])
            .build()
            .unwrap();
        assert_eq!(score(&instance, &[0, 1, 2]), 2);
    }

    #[test]
    fn test_matches_naive_scan() {
        let instance = csplib_sample();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = random_candidate(&instance, &mut rng);
            assert_eq!(score(&instance, &c), naive_score(&instance, &c));
        }
    }

    #[test]
    fn test_known_feasible_sequence() {
        // Classes 0 1 5 2 4 3 3 4 2 5 is a published zero-violation order.
        let instance = csplib_sample();
        let order = [0, 1, 8, 2, 6, 4, 5, 7, 3, 9];
        let seq = reconstruct_sequence(&instance, &order).unwrap();
        assert_eq!(seq, vec![0, 1, 5, 2, 4, 3, 3, 4, 2, 5]);
        assert_eq!(evaluate(&instance, &order), Evaluation::Scored(0));
    }

    #[test]
    fn test_violation_report_matches_score() {
        let instance = csplib_sample();
        let identity = identity_candidate(&instance);
        let report = violation_report(&instance, &identity).unwrap();
        assert_eq!(report.total, score(&instance, &identity));
        assert_eq!(report.excess_by_option.len(), 5);
        assert_eq!(report.violated_windows_by_option.len(), 5);
        for (o, &excess) in report.excess_by_option.iter().enumerate() {
            assert_eq!(excess > 0, report.violated_windows_by_option[o] > 0);
        }
        assert!(report.total > 0);
        assert!(!report.violated_options().is_empty());
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let instance = csplib_sample();
        let mut rng = SmallRng::seed_from_u64(3);
        let c = random_candidate(&instance, &mut rng);
        let first = evaluate(&instance, &c);
        for _ in 0..10 {
            assert_eq!(evaluate(&instance, &c), first);
        }
    }

    #[test]
    fn test_random_candidate_is_permutation() {
        let instance = csplib_sample();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let c = random_candidate(&instance, &mut rng);
            assert!(is_permutation(&c, instance.position_count()));
        }
    }

    #[test]
    fn test_random_candidate_seeded() {
        let instance = csplib_sample();
        let a = random_candidate(&instance, &mut SmallRng::seed_from_u64(11));
        let b = random_candidate(&instance, &mut SmallRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_evaluate_batch() {
        let instance = two_class_instance();
        let batch = vec![vec![0, 1, 2, 3], vec![0, 2, 1, 3], vec![0, 0, 0, 0]];
        assert_eq!(
            evaluate_batch(&instance, &batch),
            vec![
                Evaluation::Scored(1),
                Evaluation::Scored(0),
                Evaluation::Invalid
            ]
        );
    }

    #[test]
    fn test_concurrent_evaluation() {
        let instance = csplib_sample();
        let identity = identity_candidate(&instance);
        let expected = evaluate(&instance, &identity);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| evaluate(&instance, &identity)))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::generator::InstanceGenerator;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn arb_instance() -> impl Strategy<Value = Instance> {
        (1usize..30, 1usize..5, 1usize..6, any::<u64>()).prop_map(|(n, o, c, seed)| {
            InstanceGenerator::new(n, o, c)
                .with_seed(seed)
                .generate()
                .expect("generator yields valid instances")
        })
    }

    proptest! {
        #[test]
        fn prop_permutations_always_scored(instance in arb_instance(), seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let c = random_candidate(&instance, &mut rng);
            prop_assert!(evaluate(&instance, &c).is_valid());
        }

        #[test]
        fn prop_invalid_iff_not_permutation(
            instance in arb_instance(),
            seed in any::<u64>(),
            edit in 0usize..5,
            pick in any::<usize>(),
        ) {
            let n = instance.position_count();
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut candidate = random_candidate(&instance, &mut rng);
            match edit {
                1 => {
                    let i = pick % n;
                    candidate[i] = candidate[(i + 1) % n];
                }
                2 => {
                    candidate.pop();
                }
                3 => candidate.push(pick % (n + 1)),
                4 => candidate[pick % n] = n + pick % 3,
                _ => {}
            }

            let mut sorted = candidate.clone();
            sorted.sort_unstable();
            let valid = sorted == (0..n).collect::<Vec<_>>();
            prop_assert_eq!(evaluate(&instance, &candidate).is_valid(), valid);
        }

        #[test]
        fn prop_identity_reconstructs_plan(instance in arb_instance()) {
            let seq = reconstruct_sequence(&instance, &identity_candidate(&instance));
            prop_assert_eq!(seq.as_deref(), Some(instance.initial_sequence()));
        }

        #[test]
        fn prop_raising_limit_never_increases_score(
            instance in arb_instance(),
            seed in any::<u64>(),
            option_pick in any::<usize>(),
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let c = random_candidate(&instance, &mut rng);
            let before = score(&instance, &c);

            let o = option_pick % instance.option_count();
            let mut max = instance.max_per_window();
            max[o] += 1;
            let relaxed = Instance::builder()
                .with_position_count(instance.position_count())
                .with_option_count(instance.option_count())
                .with_max_per_window(max)
                .with_window_size(instance.window_sizes())
                .with_class_options(instance.classes().iter().map(|class| class.requires.clone()).collect())
                .with_initial_sequence(instance.initial_sequence().to_vec())
                .build()
                .unwrap();

            prop_assert!(score(&relaxed, &c) <= before);
        }

        #[test]
        fn prop_description_roundtrip(
            n in 1usize..30,
            o in 1usize..5,
            c in 1usize..6,
            seed in any::<u64>(),
        ) {
            let (instance, counts) = InstanceGenerator::new(n, o, c)
                .with_seed(seed)
                .generate_with_counts()
                .unwrap();
            let parsed: Instance = instance.to_description().parse().unwrap();
            prop_assert_eq!(parsed.class_counts(), counts);
            prop_assert_eq!(parsed, instance);
        }

        #[test]
        fn prop_repeated_evaluation_identical(instance in arb_instance(), seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let c = random_candidate(&instance, &mut rng);
            prop_assert_eq!(evaluate(&instance, &c), evaluate(&instance, &c));
        }
    }
}
