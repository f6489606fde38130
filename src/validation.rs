//! Input validation for car-sequencing instances and candidates.
//!
//! Instance checks run once at construction and report every problem
//! found. Detects:
//! - Zero positions or zero options
//! - Per-option vectors whose length differs from the option count
//! - Class rows whose length differs from the option count
//! - Zero-length windows
//! - Initial plans of the wrong length or referencing unknown classes
//!
//! Candidate checks run on every evaluation and are O(n): a length check
//! followed by a bitmap membership scan over `[0, position_count)`.

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Position count or option count is zero.
    EmptyDimension,
    /// A vector's length disagrees with the count it must match.
    LengthMismatch,
    /// An option has a window of size zero.
    ZeroWindow,
    /// The initial plan references a class with no option row.
    UnknownClass,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the raw parts of an instance.
///
/// Checks:
/// 1. `position_count > 0` and `option_count > 0`
/// 2. `max_per_window` and `window_size` both have `option_count` entries
/// 3. Every window size is positive
/// 4. Every class row has `option_count` entries
/// 5. `initial_sequence` has `position_count` entries
/// 6. Every class id in `initial_sequence` has a row in `class_options`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(
    position_count: usize,
    option_count: usize,
    max_per_window: &[usize],
    window_size: &[usize],
    class_options: &[Vec<bool>],
    initial_sequence: &[usize],
) -> ValidationResult {
    let mut errors = Vec::new();

    if position_count == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDimension,
            "position count must be positive",
        ));
    }
    if option_count == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDimension,
            "option count must be positive",
        ));
    }

    if max_per_window.len() != option_count {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "max_per_window has {} entries, expected {option_count}",
                max_per_window.len()
            ),
        ));
    }
    if window_size.len() != option_count {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "window_size has {} entries, expected {option_count}",
                window_size.len()
            ),
        ));
    }

    for (o, &w) in window_size.iter().enumerate() {
        if w == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroWindow,
                format!("option {o} has a window of size 0"),
            ));
        }
    }

    for (c, row) in class_options.iter().enumerate() {
        if row.len() != option_count {
            errors.push(ValidationError::new(
                ValidationErrorKind::LengthMismatch,
                format!(
                    "class {c} has {} option entries, expected {option_count}",
                    row.len()
                ),
            ));
        }
    }

    if initial_sequence.len() != position_count {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "initial_sequence has {} entries, expected {position_count}",
                initial_sequence.len()
            ),
        ));
    }

    // Report each unknown class once, at its first position
    let mut reported = Vec::new();
    for (i, &c) in initial_sequence.iter().enumerate() {
        if c >= class_options.len() && !reported.contains(&c) {
            reported.push(c);
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownClass,
                format!(
                    "position {i} references class {c}, but only {} classes are defined",
                    class_options.len()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether `candidate` is a permutation of `0..position_count`.
///
/// Duplicates, out-of-range values, and missing values all fail.
pub fn is_permutation(candidate: &[usize], position_count: usize) -> bool {
    if candidate.len() != position_count {
        return false;
    }
    let mut seen = vec![false; position_count];
    for &idx in candidate {
        match seen.get_mut(idx) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    // Length matches and no value repeated, so every slot is filled
    true
}
