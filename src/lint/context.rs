//! Per-file context handed to every rule

use crate::source::LineMap;
use crate::syntax::SyntaxIndex;
use crate::token::{self, Token};
use std::path::Path;

/// Everything a rule may look at while checking one file.
///
/// All of it is read-only and scoped to a single `run_linters` call; nothing
/// here survives into the next file.
pub struct LintContext<'a> {
    /// Full source text
    pub source: &'a str,

    /// Path of the file being checked
    pub file_path: &'a Path,

    /// The complete token+comment stream, in source order
    pub tokens: &'a [Token],

    /// Structural index over the same stream
    pub syntax: &'a SyntaxIndex,

    /// Line table for the same source
    pub lines: &'a LineMap,

    /// Whether rules should construct fixes
    pub allow_auto_fix: bool,
}

impl<'a> LintContext<'a> {
    pub fn new(
        source: &'a str,
        file_path: &'a Path,
        tokens: &'a [Token],
        syntax: &'a SyntaxIndex,
        lines: &'a LineMap,
        allow_auto_fix: bool,
    ) -> Self {
        Self {
            source,
            file_path,
            tokens,
            syntax,
            lines,
            allow_auto_fix,
        }
    }

    pub fn token_text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    /// Index of the nearest non-comment token after `idx`, if any.
    ///
    /// Structural lookups (what follows an element, a parameter, an opening
    /// bracket) skip comments; the raw stream neighbors used for spacing
    /// checks do not.
    pub fn next_code_token(&self, idx: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(_, token)| !token.kind.is_comment())
            .map(|(i, _)| i)
    }

    /// True when the comma at `idx` is a comma punctuator.
    pub fn is_comma_at(&self, idx: usize) -> bool {
        token::is_comma(&self.tokens[idx], self.source)
    }

    /// True when `left` ends on the line `right` starts on.
    ///
    /// Uses the end of the left token, so a block comment spanning lines
    /// compares by where it stops, not where it starts.
    pub fn on_same_line(&self, left: &Token, right: &Token) -> bool {
        let left_end = left.end.saturating_sub(1).max(left.start);
        self.lines.line_of(left_end) == self.lines.line_of(right.start)
    }

    /// 1-based (line, column) of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.lines.line_col(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::syntax;

    fn with_context<R>(source: &str, f: impl FnOnce(&LintContext<'_>) -> R) -> R {
        let lines = LineMap::new(source);
        let tokens = tokenize(source, &lines);
        let index = syntax::scan(&tokens, source);
        let ctx = LintContext::new(
            source,
            Path::new("test.ts"),
            &tokens,
            &index,
            &lines,
            true,
        );
        f(&ctx)
    }

    #[test]
    fn next_code_token_skips_comments() {
        with_context("a /* x */ , b", |ctx| {
            // tokens: a, block comment, comma, b
            assert_eq!(ctx.next_code_token(0), Some(2));
            assert!(ctx.is_comma_at(2));
            assert_eq!(ctx.next_code_token(2), Some(3));
            assert_eq!(ctx.next_code_token(3), None);
        });
    }

    #[test]
    fn same_line_uses_token_ends() {
        with_context("a /* one\ntwo */ , b\n, c", |ctx| {
            let comment = &ctx.tokens[1];
            let comma = &ctx.tokens[2];
            // The comment starts on line 1 but ends on line 2, where the
            // comma sits.
            assert!(ctx.on_same_line(comment, comma));

            let b = &ctx.tokens[3];
            let second_comma = &ctx.tokens[4];
            assert!(!ctx.on_same_line(b, second_comma));
        });
    }
}
