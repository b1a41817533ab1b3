//! Field-level validation protocol shared by every state entity.
//!
//! Entities collect all of their failing fields into one
//! [`ValidationErrors`] value instead of failing one field at a time.
//! Composite entities merge the failures of their children into their own
//! collection, so a failure deep inside a nested sub-state surfaces
//! unmodified at the top.

use serde::Serialize;
use std::fmt;

/// One failing field on a state entity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFailure {
    /// Short machine key for the offending field, e.g. `detector_name`.
    pub field: &'static str,
    /// Human-readable description of the problem.
    pub message: String,
    /// The offending value, rendered for diagnostics.
    pub value: String,
}

/// Aggregate of every failing field on one entity (and its children).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    failures: Vec<ValidationFailure>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failing field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>, value: impl fmt::Display) {
        self.failures.push(ValidationFailure {
            field,
            message: message.into(),
            value: value.to_string(),
        });
    }

    /// Fold a child entity's failures into this collection.
    pub fn merge(&mut self, child: ValidationErrors) {
        self.failures.extend(child.failures);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// True if any failure names the given field.
    pub fn contains_field(&self, field: &str) -> bool {
        self.failures.iter().any(|f| f.field == field)
    }

    /// `Ok(())` when no failures were recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(
                f,
                "{}: {} (got {})",
                failure.field, failure.message, failure.value
            )?;
        }
        Ok(())
    }
}

/// Contract implemented by every state entity.
pub trait Validate {
    /// Check the entity, reporting every failing field at once.
    fn validate(&self) -> Result<(), ValidationErrors>;
}
