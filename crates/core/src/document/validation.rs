//! Aggregated validation reporting.
//!
//! Line-level violations for a single document are collected and
//! returned together, not fail-fast, so the caller can fix every
//! problem in one round trip. Each issue carries the field path of the
//! offending value (e.g. `items[2].qty`).

use serde::Serialize;

/// A single validation failure with its field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path of the offending field, e.g. `items[0].dr_amount`.
    pub path: String,
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Collects validation issues across a whole document payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an issue.
    pub fn push(&mut self, path: impl Into<String>, code: &'static str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            code,
            message: message.into(),
        });
    }

    /// Merges another report's issues into this one.
    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    /// Returns true if no issues were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the recorded issues.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Returns `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", issue.path, issue.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Builds the field path for a line attribute, e.g. `items[3].rate`.
#[must_use]
pub fn line_path(index: usize, field: &str) -> String {
    format!("items[{index}].{field}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_ok() {
        assert!(ValidationReport::new().into_result().is_ok());
    }

    #[test]
    fn test_issues_are_collected_not_fail_fast() {
        let mut report = ValidationReport::new();
        report.push(line_path(0, "qty"), "NEGATIVE_QTY", "Quantity cannot be negative");
        report.push(line_path(2, "rate"), "NEGATIVE_RATE", "Rate cannot be negative");

        let err = report.into_result().unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert_eq!(err.issues()[0].path, "items[0].qty");
        assert_eq!(err.issues()[1].path, "items[2].rate");
    }

    #[test]
    fn test_display_joins_issues() {
        let mut report = ValidationReport::new();
        report.push("items[0].qty", "NEGATIVE_QTY", "Quantity cannot be negative");
        report.push("items[1].rate", "NEGATIVE_RATE", "Rate cannot be negative");

        assert_eq!(
            report.to_string(),
            "items[0].qty: Quantity cannot be negative; items[1].rate: Rate cannot be negative"
        );
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut first = ValidationReport::new();
        first.push("a", "A", "first");
        let mut second = ValidationReport::new();
        second.push("b", "B", "second");

        first.merge(second);
        assert_eq!(first.issues()[0].path, "a");
        assert_eq!(first.issues()[1].path, "b");
    }
}
