//! Rule: consistent spacing before and after commas
//!
//! Scans the full token+comment stream once and checks each comma's two
//! sides independently against the configured policy. Two comma positions
//! are exempt because they do not separate two written elements: commas
//! consumed by array holes (`[, , x]`) and the trailing comma of a
//! type-parameter list (`function f<T,>`). Those are collected into an
//! ignore set (keyed by token index, never by text) before the scan.

use crate::context::LintContext;
use crate::edit::{Edit, EditSet};
use crate::error::{LintError, Severity};
use crate::linter::Linter;
use crate::syntax::{ArrayNode, TypeParamList};
use crate::token::{self, Token, TokenKind};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spacing policy for one comma side: `true` requires a space, `false`
/// forbids one. Only consulted when the comma and its neighbor share a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommaSpacingOptions {
    pub before: bool,
    pub after: bool,
}

impl Default for CommaSpacingOptions {
    fn default() -> Self {
        Self {
            before: false,
            after: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Before,
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Before => write!(f, "before"),
            Side::After => write!(f, "after"),
        }
    }
}

pub struct CommaSpacingLinter {
    options: CommaSpacingOptions,
}

impl CommaSpacingLinter {
    pub fn new() -> Self {
        Self::with_options(CommaSpacingOptions::default())
    }

    pub fn with_options(options: CommaSpacingOptions) -> Self {
        Self { options }
    }

    /// Build from a raw config value. Unknown properties are an error.
    pub fn from_value(value: &serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value.clone()).map(Self::with_options)
    }

    pub fn options(&self) -> CommaSpacingOptions {
        self.options
    }
}

impl Default for CommaSpacingLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Linter for CommaSpacingLinter {
    fn name(&self) -> &'static str {
        "comma-spacing"
    }

    fn description(&self) -> &'static str {
        "Enforces consistent spacing before and after commas"
    }

    fn supports_auto_fix(&self) -> bool {
        true
    }

    fn lint(&self, ctx: &LintContext<'_>) -> Vec<LintError> {
        let mut ignored: FxHashSet<usize> = FxHashSet::default();
        for array in &ctx.syntax.arrays {
            mark_elision_commas(ctx, array, &mut ignored);
        }
        for list in &ctx.syntax.type_param_lists {
            mark_trailing_param_comma(ctx, list, &mut ignored);
        }

        let mut errors = Vec::new();
        for (i, comma) in ctx.tokens.iter().enumerate() {
            if !token::is_comma(comma, ctx.source) {
                continue;
            }
            let exempt = ignored.contains(&i);

            // A neighboring comma means this side has no real boundary
            // (the neighbor is itself an elision or will be checked on its
            // own); exempt commas get no neighbors at all.
            let prev = match i.checked_sub(1).map(|p| &ctx.tokens[p]) {
                Some(p) if !exempt && !token::is_comma(p, ctx.source) => Some(p),
                _ => None,
            };
            let next = match ctx.tokens.get(i + 1) {
                Some(n) if !exempt && !token::is_comma(n, ctx.source) => Some(n),
                _ => None,
            };

            self.validate(ctx, comma, prev, next, &mut errors);
        }
        errors
    }
}

impl CommaSpacingLinter {
    /// Check both sides of one comma against its (possibly absent)
    /// neighbors. Each side independently passes, is skipped, or produces
    /// exactly one report.
    fn validate(
        &self,
        ctx: &LintContext<'_>,
        comma: &Token,
        prev: Option<&Token>,
        next: Option<&Token>,
        errors: &mut Vec<LintError>,
    ) {
        if let Some(prev) = prev {
            if ctx.on_same_line(prev, comma)
                && token::has_gap(prev, comma) != self.options.before
            {
                let fix = if self.options.before {
                    Edit::insert(comma.start, " ")
                } else {
                    Edit::delete(prev.end, comma.start)
                };
                errors.push(self.report(ctx, comma, Side::Before, self.options.before, fix));
            }
        }

        let Some(next) = next else {
            return;
        };

        // Trailing position in an argument/parameter list: a space between
        // the comma and `)` is never meaningful, under either policy.
        if token::is_closing_paren(next, ctx.source) {
            return;
        }

        // A comma directly followed by a `//` comment is left alone when the
        // policy forbids a space; closing that gap would run the comma into
        // the comment. No analogous exemption exists when a space is
        // required. Kept asymmetric on purpose.
        if !self.options.after && next.kind == TokenKind::LineComment {
            return;
        }

        if ctx.on_same_line(comma, next) && token::has_gap(comma, next) != self.options.after {
            let fix = if self.options.after {
                Edit::insert(comma.end, " ")
            } else {
                Edit::delete(comma.end, next.start)
            };
            errors.push(self.report(ctx, comma, Side::After, self.options.after, fix));
        }
    }

    fn report(
        &self,
        ctx: &LintContext<'_>,
        comma: &Token,
        side: Side,
        space_required: bool,
        fix: Edit,
    ) -> LintError {
        let (code, message) = if space_required {
            ("missing", format!("A space is required {side} ','."))
        } else {
            ("unexpected", format!("There should be no space {side} ','."))
        };

        let mut error = LintError::new(
            Severity::Warning,
            message,
            comma.start,
            comma.end,
            self.name(),
        )
        .with_code(code);

        if ctx.allow_auto_fix {
            error = error.with_fix(EditSet::from(fix));
        }
        error
    }
}

/// Add the comma consumed by each array hole to the ignore set.
///
/// Walks the element list tracking the code token after the previous
/// position: for a hole that token is the hole's own comma (it has no
/// left-hand element); for a written element it is whatever follows the
/// element. If the stream disagrees with the index at any point the walk
/// just stops adding, and the scan checks those commas under normal rules.
fn mark_elision_commas(ctx: &LintContext<'_>, array: &ArrayNode, ignored: &mut FxHashSet<usize>) {
    let mut prev = Some(array.open);
    for element in &array.elements {
        let next = match element {
            None => {
                let Some(p) = prev else {
                    break;
                };
                let after = ctx.next_code_token(p);
                if let Some(idx) = after {
                    if ctx.is_comma_at(idx) {
                        ignored.insert(idx);
                    }
                }
                after
            }
            Some(span) => ctx.next_code_token(span.last),
        };
        prev = next;
    }
}

/// Add a type-parameter list's trailing comma, if present, to the ignore
/// set. Such a comma has no following parameter, so "after" spacing does not
/// apply in the normal sense.
fn mark_trailing_param_comma(
    ctx: &LintContext<'_>,
    list: &TypeParamList,
    ignored: &mut FxHashSet<usize>,
) {
    if let Some(last) = list.params.last() {
        if let Some(idx) = ctx.next_code_token(last.last) {
            if ctx.is_comma_at(idx) {
                ignored.insert(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::source::LineMap;
    use crate::syntax;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn check(source: &str, options: CommaSpacingOptions) -> Vec<LintError> {
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
        CommaSpacingLinter::with_options(options).lint(&ctx)
    }

    fn check_default(source: &str) -> Vec<LintError> {
        check(source, CommaSpacingOptions::default())
    }

    fn apply_fixes(source: &str, errors: &[LintError]) -> String {
        let mut edits = EditSet::new();
        for error in errors {
            edits.extend(error.fix.clone().expect("fix").edits());
        }
        edits.apply(source).unwrap()
    }

    fn codes(errors: &[LintError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.code.unwrap()).collect()
    }

    #[test]
    fn clean_code_produces_nothing() {
        for src in [
            "foo(a, b)",
            "var arr = [1, 2];",
            "var obj = { a: 1, b: 2 };",
            "f(a, b, c, d);",
        ] {
            assert_eq!(check_default(src).len(), 0, "{src}");
        }
    }

    #[test]
    fn missing_space_after() {
        let errors = check_default("foo(a,b)");
        assert_eq!(codes(&errors), vec!["missing"]);
        assert_eq!(errors[0].message, "A space is required after ','.");
        assert_eq!(apply_fixes("foo(a,b)", &errors), "foo(a, b)");
    }

    #[test]
    fn report_range_is_the_comma() {
        let errors = check_default("foo(a,b)");
        assert_eq!((errors[0].start_offset, errors[0].end_offset), (5, 6));
    }

    #[test]
    fn space_before_and_missing_after() {
        let source = "foo(a ,b)";
        let errors = check_default(source);
        assert_eq!(codes(&errors), vec!["unexpected", "missing"]);
        assert_eq!(errors[0].message, "There should be no space before ','.");
        assert_eq!(apply_fixes(source, &errors), "foo(a, b)");
    }

    #[test]
    fn space_required_before() {
        let options = CommaSpacingOptions {
            before: true,
            after: true,
        };
        let errors = check("foo(a, b)", options);
        assert_eq!(codes(&errors), vec!["missing"]);
        assert_eq!(errors[0].message, "A space is required before ','.");
        assert_eq!(apply_fixes("foo(a, b)", &errors), "foo(a , b)");
    }

    #[test]
    fn no_space_either_side() {
        let options = CommaSpacingOptions {
            before: false,
            after: false,
        };
        let errors = check("foo(a, b)", options);
        assert_eq!(codes(&errors), vec!["unexpected"]);
        assert_eq!(errors[0].message, "There should be no space after ','.");
        assert_eq!(apply_fixes("foo(a, b)", &errors), "foo(a,b)");
    }

    #[test]
    fn multiline_before_is_never_checked() {
        // Comma opens the line: the before side crosses a line boundary and
        // is skipped; the after side is still on one line and checked.
        let errors = check_default("foo(a\n,b)");
        assert_eq!(codes(&errors), vec!["missing"]);
    }

    #[test]
    fn multiline_after_is_never_checked() {
        assert_eq!(check_default("foo(a,\n b)").len(), 0);
        let no_space = CommaSpacingOptions {
            before: false,
            after: false,
        };
        assert_eq!(check("foo(a,\n b)", no_space).len(), 0);
    }

    #[test]
    fn comma_before_closing_paren_is_exempt_after() {
        assert_eq!(check_default("foo(a,)").len(), 0);
        // The before side is still live in trailing position.
        let errors = check_default("foo(a ,)");
        assert_eq!(codes(&errors), vec!["unexpected"]);
    }

    #[test]
    fn array_holes_are_fully_exempt() {
        for options in [
            CommaSpacingOptions::default(),
            CommaSpacingOptions {
                before: true,
                after: false,
            },
            CommaSpacingOptions {
                before: false,
                after: false,
            },
        ] {
            assert_eq!(check("const [, , x] = arr;", options).len(), 0, "{options:?}");
        }
    }

    #[test]
    fn commas_after_holes_are_still_checked() {
        // First comma is an elision; the one between x and y is ordinary.
        assert_eq!(check_default("const [, x, y] = arr;").len(), 0);
        let errors = check_default("const [, x ,y] = arr;");
        assert_eq!(codes(&errors), vec!["unexpected", "missing"]);
    }

    #[test]
    fn trailing_type_param_comma_is_exempt() {
        for options in [
            CommaSpacingOptions::default(),
            CommaSpacingOptions {
                before: false,
                after: false,
            },
            CommaSpacingOptions {
                before: true,
                after: true,
            },
        ] {
            assert_eq!(check("function f<T,>(x: T) {}", options).len(), 0, "{options:?}");
        }
    }

    #[test]
    fn ordinary_type_param_commas_are_checked() {
        assert_eq!(check_default("function f<T, U>(x: T, y: U) {}").len(), 0);
        let errors = check_default("function f<T ,U>(x: T) {}");
        assert_eq!(codes(&errors), vec!["unexpected", "missing"]);
    }

    #[test]
    fn line_comment_carve_out_when_no_space_wanted() {
        let no_space_after = CommaSpacingOptions {
            before: false,
            after: false,
        };
        assert_eq!(check("foo(a, // comment\n b)", no_space_after).len(), 0);
    }

    #[test]
    fn line_comment_is_a_normal_neighbor_when_space_wanted() {
        // Space already there: fine.
        assert_eq!(check_default("foo(a, // comment\n b)").len(), 0);
        // Comma runs straight into the comment: the usual missing report.
        let source = "foo(a,// comment\n b)";
        let errors = check_default(source);
        assert_eq!(codes(&errors), vec!["missing"]);
        assert_eq!(apply_fixes(source, &errors), "foo(a, // comment\n b)");
    }

    #[test]
    fn block_comment_in_gap_counts_as_space() {
        // No gap between comma and the comment: a space is still required.
        let errors = check_default("foo(a,/* x */b)");
        assert_eq!(codes(&errors), vec!["missing"]);

        // The comment itself sits flush against the comma on the left.
        assert_eq!(check_default("foo(a/* x */, b)").len(), 0);

        // Gap before the comma is real whitespace; only that gap is deleted.
        let source = "foo(a ,/* x */ b)";
        let errors = check_default(source);
        assert_eq!(codes(&errors), vec!["unexpected", "missing"]);
        assert_eq!(apply_fixes(source, &errors), "foo(a, /* x */ b)");
    }

    #[test]
    fn stream_boundaries_yield_no_neighbor() {
        // Comma as the very first token: no before side.
        assert_eq!(codes(&check_default(",a")), vec!["missing"]);
        // Comma as the very last token: no after side.
        assert_eq!(check_default("a,").len(), 0);
        // Both at once.
        assert_eq!(check_default(",").len(), 0);
    }

    #[test]
    fn consecutive_commas_unbind_the_shared_side() {
        // comma1 has no after-check (next is a comma), comma2 no
        // before-check (prev is a comma); comma2's after side still fires.
        let errors = check_default("foo(a,,b)");
        assert_eq!(codes(&errors), vec!["missing"]);
        assert_eq!(apply_fixes("foo(a,,b)", &errors), "foo(a,, b)");
    }

    #[test]
    fn fixes_are_idempotent() {
        let source = "foo(a ,b);\nconst [p ,q] = [1 ,2];\nbar(c , d)";
        let errors = check_default(source);
        assert!(!errors.is_empty());
        let fixed = apply_fixes(source, &errors);
        assert_eq!(check_default(&fixed).len(), 0, "fixed: {fixed}");
    }

    #[test]
    fn options_default_and_deserialize() {
        let options = CommaSpacingOptions::default();
        assert!(!options.before);
        assert!(options.after);

        let linter = CommaSpacingLinter::from_value(&serde_json::json!({})).unwrap();
        assert_eq!(linter.options(), CommaSpacingOptions::default());

        let linter =
            CommaSpacingLinter::from_value(&serde_json::json!({ "before": true })).unwrap();
        assert_eq!(
            linter.options(),
            CommaSpacingOptions {
                before: true,
                after: true
            }
        );
    }

    #[test]
    fn unknown_option_properties_are_rejected() {
        assert!(CommaSpacingLinter::from_value(&serde_json::json!({ "beffore": true })).is_err());
    }
}
