//! Linter trait and registry

use crate::context::LintContext;
use crate::error::LintError;

/// A single lint rule.
///
/// Rules analyze one file through its [`LintContext`] and report violations,
/// optionally with auto-fixes. Rule-specific options are plain fields on the
/// implementing struct, deserialized by the caller before registration.
pub trait Linter: Send + Sync {
    /// Unique kebab-case name
    fn name(&self) -> &'static str;

    /// One-line description of what this rule checks
    fn description(&self) -> &'static str {
        ""
    }

    /// Check one file and return all violations found
    fn lint(&self, ctx: &LintContext<'_>) -> Vec<LintError>;

    /// Whether this rule constructs fixes for its violations
    fn supports_auto_fix(&self) -> bool {
        false
    }
}

/// Lookup table of registered rules.
#[derive(Default)]
pub struct LinterRegistry {
    linters: Vec<Box<dyn Linter>>,
}

impl LinterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, linter: Box<dyn Linter>) {
        self.linters.push(linter);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Linter> {
        self.linters
            .iter()
            .find(|l| l.name() == name)
            .map(|l| l.as_ref())
    }

    pub fn all(&self) -> &[Box<dyn Linter>] {
        &self.linters
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.linters.iter().map(|l| l.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nop;

    impl Linter for Nop {
        fn name(&self) -> &'static str {
            "nop"
        }

        fn lint(&self, _ctx: &LintContext<'_>) -> Vec<LintError> {
            vec![]
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = LinterRegistry::new();
        registry.register(Box::new(Nop));
        assert!(registry.get("nop").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["nop"]);
    }
}
