//! Built-in rules

pub mod comma_spacing;
pub mod no_trailing_whitespace;

pub use comma_spacing::{CommaSpacingLinter, CommaSpacingOptions};
pub use no_trailing_whitespace::NoTrailingWhitespaceLinter;

/// All built-in rules, each with its default options.
pub fn builtin_linters() -> Vec<Box<dyn crate::Linter>> {
    vec![
        Box::new(CommaSpacingLinter::new()),
        Box::new(NoTrailingWhitespaceLinter::new()),
    ]
}
