//! Structured instance description.
//!
//! The interchange format is a whitespace-delimited stream of integers:
//!
//! ```text
//! nb_positions nb_options nb_classes
//! max_cars_per_window[0] ... max_cars_per_window[nb_options-1]
//! window_size[0] ... window_size[nb_options-1]
//! for each class:
//!   class_index car_count option_indicator[0] ... option_indicator[nb_options-1]
//! ```
//!
//! The class index token is read and ignored; classes are numbered in file
//! order. Each class contributes `car_count` consecutive entries to the
//! initial plan. The stream must contain exactly
//! `3 + 2*nb_options + nb_classes*(2 + nb_options)` tokens.
//!
//! # Reference
//! CSPLib problem 001, "Car Sequencing" (data format)

use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::models::Instance;

/// Sequential reader over the integer stream.
struct TokenReader<'a> {
    tokens: &'a [i64],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    fn new(tokens: &'a [i64]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn next(&mut self, expected: impl FnOnce() -> String) -> Result<i64, ConfigurationError> {
        let value = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or_else(|| ConfigurationError::UnexpectedEnd {
                expected: expected(),
            })?;
        self.pos += 1;
        Ok(value)
    }

    fn next_count(&mut self, field: &'static str) -> Result<usize, ConfigurationError> {
        let value = self.next(|| field.to_string())?;
        usize::try_from(value).map_err(|_| ConfigurationError::NegativeValue { field, value })
    }

    fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }
}

impl Instance {
    /// Builds an instance from a parsed integer stream.
    ///
    /// # Errors
    /// - [`ConfigurationError::UnexpectedEnd`] if the stream is exhausted early
    /// - [`ConfigurationError::TrailingTokens`] if tokens remain afterwards
    /// - [`ConfigurationError::NegativeValue`] for negative counts or sizes
    /// - [`ConfigurationError::InvalidIndicator`] for indicators other than 0/1
    /// - [`ConfigurationError::CarCountMismatch`] if car counts do not sum
    ///   to the position count
    /// - [`ConfigurationError::Invalid`] for any remaining invariant failure
    pub fn from_tokens(tokens: &[i64]) -> Result<Self, ConfigurationError> {
        let mut reader = TokenReader::new(tokens);

        let position_count = reader.next_count("nb_positions")?;
        let option_count = reader.next_count("nb_options")?;
        let class_count = reader.next_count("nb_classes")?;

        let max_per_window = (0..option_count)
            .map(|_| reader.next_count("max_cars_per_window"))
            .collect::<Result<Vec<_>, _>>()?;
        let window_size = (0..option_count)
            .map(|_| reader.next_count("window_size"))
            .collect::<Result<Vec<_>, _>>()?;

        // Header counts are untrusted; never size buffers from them directly.
        let mut class_options = Vec::with_capacity(class_count.min(tokens.len()));
        let mut initial_sequence = Vec::new();
        let mut total_cars: usize = 0;
        for c in 0..class_count {
            reader.next(|| format!("class index for class {c}"))?;
            let count = reader.next_count("car_count")?;
            total_cars = total_cars
                .checked_add(count)
                .filter(|&total| total <= position_count)
                .ok_or(ConfigurationError::CarCountMismatch {
                    expected: position_count,
                    actual: total_cars.saturating_add(count),
                })?;

            let mut row = Vec::with_capacity(option_count.min(tokens.len()));
            for o in 0..option_count {
                let value = reader.next(|| format!("indicator {o} for class {c}"))?;
                match value {
                    0 => row.push(false),
                    1 => row.push(true),
                    _ => {
                        return Err(ConfigurationError::InvalidIndicator {
                            class: c,
                            option: o,
                            value,
                        })
                    }
                }
            }
            class_options.push(row);
            initial_sequence.extend(std::iter::repeat_n(c, count));
        }

        if reader.remaining() > 0 {
            return Err(ConfigurationError::TrailingTokens {
                count: reader.remaining(),
            });
        }

        if initial_sequence.len() != position_count {
            return Err(ConfigurationError::CarCountMismatch {
                expected: position_count,
                actual: initial_sequence.len(),
            });
        }

        Instance::from_parts(
            position_count,
            option_count,
            max_per_window,
            window_size,
            class_options,
            initial_sequence,
        )
    }

    /// Renders the instance in the structured text format.
    ///
    /// Classes are written in id order with their car counts from the
    /// initial plan, so parsing the output rebuilds the plan grouped by
    /// class.
    pub fn to_description(&self) -> String {
        let mut lines = vec![
            format!(
                "{} {} {}",
                self.position_count(),
                self.option_count(),
                self.class_count()
            ),
            join(&self.max_per_window()),
            join(&self.window_sizes()),
        ];

        for (c, (class, count)) in self.classes().iter().zip(self.class_counts()).enumerate() {
            let indicators: Vec<usize> = class.requires.iter().map(|&r| usize::from(r)).collect();
            lines.push(format!("{c} {count} {}", join(&indicators)));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits text on whitespace and parses every token as an integer.
pub fn tokenize(text: &str) -> Result<Vec<i64>, ConfigurationError> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse::<i64>().map_err(|_| {
                tracing::debug!(index, token, "non-integer token in instance description");
                ConfigurationError::InvalidToken {
                    index,
                    token: token.to_string(),
                }
            })
        })
        .collect()
}

impl FromStr for Instance {
    type Err = ConfigurationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(text)?;
        Instance::from_tokens(&tokens)
    }
}
