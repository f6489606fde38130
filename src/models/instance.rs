//! Car-sequencing instance.
//!
//! An instance fixes the line (options and their window rules), the
//! catalogue of car classes, and the initial production plan. It is
//! validated once at construction and never mutated afterwards, so it can
//! be shared freely between threads evaluating candidates.

use serde::{Deserialize, Serialize};

use super::{CarClass, CarOption};
use crate::error::ConfigurationError;
use crate::validation::validate_instance;

/// The static definition of one car-sequencing problem.
///
/// Built through [`Instance::builder`], [`Instance::from_tokens`], text
/// parsing (`"...".parse::<Instance>()`), or serde deserialization. All
/// paths enforce the same invariants.
///
/// # Example
/// ```
/// use u_carseq::models::Instance;
///
/// let instance = Instance::builder()
///     .with_position_count(4)
///     .with_option_count(1)
///     .with_max_per_window(vec![1])
///     .with_window_size(vec![2])
///     .with_class_options(vec![vec![true], vec![false]])
///     .with_initial_sequence(vec![0, 0, 1, 1])
///     .build()
///     .unwrap();
///
/// assert_eq!(instance.class_counts(), vec![2, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "InstanceBuilder", try_from = "InstanceBuilder")]
pub struct Instance {
    position_count: usize,
    options: Vec<CarOption>,
    classes: Vec<CarClass>,
    initial_sequence: Vec<usize>,
}

impl Instance {
    /// Starts direct construction.
    pub fn builder() -> InstanceBuilder {
        InstanceBuilder::default()
    }

    /// Validates raw parts and assembles an instance.
    pub(crate) fn from_parts(
        position_count: usize,
        option_count: usize,
        max_per_window: Vec<usize>,
        window_size: Vec<usize>,
        class_options: Vec<Vec<bool>>,
        initial_sequence: Vec<usize>,
    ) -> Result<Self, ConfigurationError> {
        validate_instance(
            position_count,
            option_count,
            &max_per_window,
            &window_size,
            &class_options,
            &initial_sequence,
        )
        .map_err(ConfigurationError::Invalid)?;

        let options = max_per_window
            .into_iter()
            .zip(window_size)
            .map(|(max, size)| CarOption::new(max, size))
            .collect();
        let classes = class_options.into_iter().map(CarClass::new).collect();

        let instance = Self {
            position_count,
            options,
            classes,
            initial_sequence,
        };
        tracing::debug!(
            positions = instance.position_count,
            options = instance.option_count(),
            classes = instance.class_count(),
            "car-sequencing instance constructed"
        );
        Ok(instance)
    }

    /// Number of slots in the production sequence.
    #[inline]
    pub fn position_count(&self) -> usize {
        self.position_count
    }

    /// Number of distinct options.
    #[inline]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Number of car classes (rows of the option matrix).
    #[inline]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Window rules, one per option.
    pub fn options(&self) -> &[CarOption] {
        &self.options
    }

    /// Car classes, indexed by class id.
    pub fn classes(&self) -> &[CarClass] {
        &self.classes
    }

    /// Per-option window maximums.
    pub fn max_per_window(&self) -> Vec<usize> {
        self.options.iter().map(|o| o.max_per_window).collect()
    }

    /// Per-option window sizes.
    pub fn window_sizes(&self) -> Vec<usize> {
        self.options.iter().map(|o| o.window_size).collect()
    }

    /// Option requirement row for `class`, or `None` for an unknown class.
    pub fn class_options(&self, class: usize) -> Option<&[bool]> {
        self.classes.get(class).map(|c| c.requires.as_slice())
    }

    /// Whether cars of `class` need `option`.
    #[inline]
    pub fn requires(&self, class: usize, option: usize) -> bool {
        self.classes.get(class).is_some_and(|c| c.requires(option))
    }

    /// Class id of each car in the initial production plan.
    pub fn initial_sequence(&self) -> &[usize] {
        &self.initial_sequence
    }

    /// Number of cars of each class in the initial plan.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for &c in &self.initial_sequence {
            counts[c] += 1;
        }
        counts
    }

    /// Number of cars in the plan that need `option`.
    pub fn option_demand(&self, option: usize) -> usize {
        self.initial_sequence
            .iter()
            .filter(|&&c| self.requires(c, option))
            .count()
    }
}

/// Direct-construction builder for [`Instance`].
///
/// Every field is required; [`build`](Self::build) reports the first
/// missing one. Also serves as the serde representation of an instance,
/// so JSON input passes through the same checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceBuilder {
    /// Number of positions.
    pub position_count: Option<usize>,
    /// Number of options.
    pub option_count: Option<usize>,
    /// Per-option window maximums.
    pub max_per_window: Option<Vec<usize>>,
    /// Per-option window sizes.
    pub window_size: Option<Vec<usize>>,
    /// Per-class option requirement rows.
    pub class_options: Option<Vec<Vec<bool>>>,
    /// Class id per position in the initial plan.
    pub initial_sequence: Option<Vec<usize>>,
}

impl InstanceBuilder {
    /// Sets the number of positions.
    pub fn with_position_count(mut self, n: usize) -> Self {
        self.position_count = Some(n);
        self
    }

    /// Sets the number of options.
    pub fn with_option_count(mut self, n: usize) -> Self {
        self.option_count = Some(n);
        self
    }

    /// Sets the per-option window maximums.
    pub fn with_max_per_window(mut self, max: Vec<usize>) -> Self {
        self.max_per_window = Some(max);
        self
    }

    /// Sets the per-option window sizes.
    pub fn with_window_size(mut self, sizes: Vec<usize>) -> Self {
        self.window_size = Some(sizes);
        self
    }

    /// Sets the per-class option requirement rows.
    pub fn with_class_options(mut self, rows: Vec<Vec<bool>>) -> Self {
        self.class_options = Some(rows);
        self
    }

    /// Sets the initial plan.
    pub fn with_initial_sequence(mut self, sequence: Vec<usize>) -> Self {
        self.initial_sequence = Some(sequence);
        self
    }

    /// Validates and builds the instance.
    pub fn build(self) -> Result<Instance, ConfigurationError> {
        let position_count = self
            .position_count
            .ok_or(ConfigurationError::MissingField("position_count"))?;
        let option_count = self
            .option_count
            .ok_or(ConfigurationError::MissingField("option_count"))?;
        let max_per_window = self
            .max_per_window
            .ok_or(ConfigurationError::MissingField("max_per_window"))?;
        let window_size = self
            .window_size
            .ok_or(ConfigurationError::MissingField("window_size"))?;
        let class_options = self
            .class_options
            .ok_or(ConfigurationError::MissingField("class_options"))?;
        let initial_sequence = self
            .initial_sequence
            .ok_or(ConfigurationError::MissingField("initial_sequence"))?;

        Instance::from_parts(
            position_count,
            option_count,
            max_per_window,
            window_size,
            class_options,
            initial_sequence,
        )
    }
}

impl TryFrom<InstanceBuilder> for Instance {
    type Error = ConfigurationError;

    fn try_from(builder: InstanceBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<Instance> for InstanceBuilder {
    fn from(instance: Instance) -> Self {
        Self {
            position_count: Some(instance.position_count),
            option_count: Some(instance.options.len()),
            max_per_window: Some(instance.max_per_window()),
            window_size: Some(instance.window_sizes()),
            class_options: Some(instance.classes.into_iter().map(|c| c.requires).collect()),
            initial_sequence: Some(instance.initial_sequence),
        }
    }
}
