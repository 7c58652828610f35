//! Violation reports produced by rules

use crate::edit::EditSet;
use std::fmt;

/// Severity of a reported violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// One violation at one source range, with an optional auto-fix.
#[derive(Debug, Clone)]
pub struct LintError {
    pub severity: Severity,

    /// Stable short identifier for the report kind within its rule
    /// (e.g. `"missing"` / `"unexpected"`), for consumers that dispatch on
    /// the kind rather than the rendered message.
    pub code: Option<&'static str>,

    /// Human-readable message
    pub message: String,

    /// Start byte offset of the reported range
    pub start_offset: usize,

    /// End byte offset (exclusive)
    pub end_offset: usize,

    /// Edits that would make this violation disappear
    pub fix: Option<EditSet>,

    /// Name of the rule that produced this report
    pub linter_name: &'static str,
}

impl LintError {
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        start_offset: usize,
        end_offset: usize,
        linter_name: &'static str,
    ) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            start_offset,
            end_offset,
            fix: None,
            linter_name,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_fix(mut self, fix: EditSet) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}..{}): {}",
            self.linter_name, self.severity, self.start_offset, self.end_offset, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{Edit, EditSet};

    #[test]
    fn severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn builder() {
        let error = LintError::new(Severity::Warning, "msg", 3, 4, "some-rule")
            .with_code("missing")
            .with_fix(EditSet::from(Edit::insert(4, " ")));
        assert_eq!(error.code, Some("missing"));
        assert!(error.has_fix());
        assert_eq!(format!("{error}"), "[some-rule] WARNING (3..4): msg");
    }
}
