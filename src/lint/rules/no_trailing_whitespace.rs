//! Rule: no trailing whitespace at the end of a line

use crate::context::LintContext;
use crate::edit::{Edit, EditSet};
use crate::error::{LintError, Severity};
use crate::linter::Linter;

pub struct NoTrailingWhitespaceLinter;

impl NoTrailingWhitespaceLinter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoTrailingWhitespaceLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Linter for NoTrailingWhitespaceLinter {
    fn name(&self) -> &'static str {
        "no-trailing-whitespace"
    }

    fn description(&self) -> &'static str {
        "Detects and removes whitespace at the end of lines"
    }

    fn supports_auto_fix(&self) -> bool {
        true
    }

    fn lint(&self, ctx: &LintContext<'_>) -> Vec<LintError> {
        let mut errors = Vec::new();
        let mut line_start = 0;

        for line in ctx.source.split('\n') {
            let line_end = line_start + line.len();
            // A carriage return before the newline is line ending, not
            // trailing whitespace.
            let content = line.strip_suffix('\r').unwrap_or(line);
            let content_end = line_start + content.len();

            let trimmed = content.trim_end_matches([' ', '\t']);
            let ws_start = line_start + trimmed.len();

            if ws_start < content_end {
                let mut error = LintError::new(
                    Severity::Warning,
                    "Line has trailing whitespace",
                    ws_start,
                    content_end,
                    self.name(),
                );
                if ctx.allow_auto_fix {
                    error = error.with_fix(EditSet::from(Edit::delete(ws_start, content_end)));
                }
                errors.push(error);
            }

            line_start = line_end + 1;
        }

        errors
    }
}
