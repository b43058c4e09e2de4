//! Validation error aggregation and the warehouse quantity rule.
//!
//! Validation never fails fast: every violated rule is collected into a
//! field → messages map and surfaced together, mirroring a form-level
//! multi-error contract.

use std::collections::BTreeMap;

use serde::Serialize;

/// Date format used inside human-readable validation messages.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Field-keyed validation errors. Each field maps to one or more messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when no errors were collected, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::error::Error for ValidationErrors {}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A stock adjustment would drive an item's on-hand count below zero.
///
/// `needed` is how many units are missing, `available` the count before the
/// adjustment (excluding the row being edited, when applicable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientStock {
    pub field: &'static str,
    pub needed: i64,
    pub available: i64,
}

impl InsufficientStock {
    pub fn message(&self) -> String {
        format!(
            "Недостаточно единиц расходника. Требуется еще {} шт., имеется: {} шт.",
            self.needed, self.available
        )
    }
}

impl From<InsufficientStock> for ValidationErrors {
    fn from(err: InsufficientStock) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(err.field, err.message());
        errors
    }
}

/// Check that applying `delta` (positive for restocks, negative for uses)
/// to the current on-hand count keeps it non-negative.
pub fn validate_adjustment(
    current: i64,
    delta: i64,
    field: &'static str,
) -> Result<(), InsufficientStock> {
    let new_total = current + delta;
    if new_total < 0 {
        return Err(InsufficientStock {
            field,
            needed: -new_total,
            available: current,
        });
    }
    Ok(())
}
