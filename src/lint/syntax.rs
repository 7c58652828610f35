//! Structural index over the token stream
//!
//! Rules that need more than token neighbors get it from here, not from a
//! full parse tree. The index records exactly two node kinds:
//!
//! - array-like bracket regions (`[` ... `]`) with their element list, where
//!   an elided element (a hole, as in `[, , x]`) is represented as `None`;
//! - type-parameter declaration lists (`function f<T, U>`, `class C<T>`,
//!   `interface I<T>`, `type A<T>`), with one span per parameter.
//!
//! Spans are token-index ranges over code tokens only. Comments never count
//! as element content and never separate elements. Regions that do not close
//! before end of file produce no node at all.

use crate::token::{Token, TokenKind};

/// Inclusive range of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub first: usize,
    pub last: usize,
}

/// A `[` ... `]` region with its element segmentation.
///
/// Subscripts like `a[i]` are indexed too; they carry no holes, so rules
/// keyed on holes never react to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayNode {
    /// Token index of the opening bracket
    pub open: usize,
    /// Token index of the closing bracket
    pub close: usize,
    /// Elements in order; `None` is a hole
    pub elements: Vec<Option<TokenSpan>>,
}

/// A type-parameter list in declaration position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamList {
    /// Token index of the opening `<`
    pub open: usize,
    /// Token index of the closing `>` (or `>>`/`>>>` that folds this level)
    pub close: usize,
    /// One span per written parameter; a trailing comma adds no entry
    pub params: Vec<TokenSpan>,
}

#[derive(Debug, Clone, Default)]
pub struct SyntaxIndex {
    pub arrays: Vec<ArrayNode>,
    pub type_param_lists: Vec<TypeParamList>,
}

/// Keywords that can introduce a named declaration with type parameters.
const TYPE_PARAM_KEYWORDS: &[&str] = &["function", "class", "interface", "type"];

/// Build the syntax index for a token stream.
pub fn scan(tokens: &[Token], source: &str) -> SyntaxIndex {
    let mut index = SyntaxIndex::default();
    scan_arrays(tokens, source, &mut index);
    scan_type_params(tokens, source, &mut index);
    index
}

struct ArrayFrame {
    open: usize,
    elements: Vec<Option<TokenSpan>>,
    segment: Option<TokenSpan>,
    /// Parens/braces opened inside this bracket region
    inner: usize,
}

fn extend_segment(stack: &mut [ArrayFrame], idx: usize) {
    if let Some(top) = stack.last_mut() {
        match &mut top.segment {
            Some(span) => span.last = idx,
            None => top.segment = Some(TokenSpan { first: idx, last: idx }),
        }
    }
}

fn scan_arrays(tokens: &[Token], source: &str, index: &mut SyntaxIndex) {
    let mut stack: Vec<ArrayFrame> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if token.kind.is_comment() {
            continue;
        }

        let text = if token.kind == TokenKind::Punct {
            token.text(source)
        } else {
            ""
        };

        match text {
            "[" => {
                extend_segment(&mut stack, i);
                stack.push(ArrayFrame {
                    open: i,
                    elements: Vec::new(),
                    segment: None,
                    inner: 0,
                });
            }
            "]" => {
                let closes_frame = stack.last().is_some_and(|top| top.inner == 0);
                if closes_frame {
                    let mut frame = stack.pop().unwrap();
                    // An empty final segment is a trailing comma, not a hole:
                    // `[a,]` has one element, while `[,]` recorded its hole at
                    // the comma already.
                    if let Some(segment) = frame.segment.take() {
                        frame.elements.push(Some(segment));
                    }
                    index.arrays.push(ArrayNode {
                        open: frame.open,
                        close: i,
                        elements: frame.elements,
                    });
                    extend_segment(&mut stack, i);
                } else {
                    // `]` inside an unbalanced paren run; treat as content
                    extend_segment(&mut stack, i);
                }
            }
            "(" | "{" => {
                if let Some(top) = stack.last_mut() {
                    top.inner += 1;
                }
                extend_segment(&mut stack, i);
            }
            ")" | "}" => {
                if let Some(top) = stack.last_mut() {
                    top.inner = top.inner.saturating_sub(1);
                }
                extend_segment(&mut stack, i);
            }
            "," => {
                let splits = stack.last().is_some_and(|top| top.inner == 0);
                if splits {
                    let top = stack.last_mut().unwrap();
                    top.elements.push(top.segment.take());
                } else {
                    extend_segment(&mut stack, i);
                }
            }
            _ => extend_segment(&mut stack, i),
        }
    }
    // Frames still open at end of file never become nodes.
}

/// Nearest code token strictly before `idx`.
fn prev_code_token(tokens: &[Token], idx: usize) -> Option<usize> {
    tokens[..idx]
        .iter()
        .rposition(|token| !token.kind.is_comment())
}

fn scan_type_params(tokens: &[Token], source: &str, index: &mut SyntaxIndex) {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Punct || token.text(source) != "<" {
            continue;
        }

        // Declaration position: `<` directly after an identifier that itself
        // follows one of the introducing keywords.
        let Some(name) = prev_code_token(tokens, i) else {
            continue;
        };
        if tokens[name].kind != TokenKind::Ident {
            continue;
        }
        let Some(kw) = prev_code_token(tokens, name) else {
            continue;
        };
        if tokens[kw].kind != TokenKind::Keyword
            || !TYPE_PARAM_KEYWORDS.contains(&tokens[kw].text(source))
        {
            continue;
        }

        if let Some(list) = scan_type_param_list(tokens, source, i) {
            index.type_param_lists.push(list);
        }
    }
}

/// Scan one candidate list starting at the `<` at `open`. Returns `None`
/// when the list never closes or turns out not to be a parameter list.
fn scan_type_param_list(tokens: &[Token], source: &str, open: usize) -> Option<TypeParamList> {
    let mut depth = 1usize;
    let mut inner = 0usize;
    let mut params: Vec<TokenSpan> = Vec::new();
    let mut segment: Option<TokenSpan> = None;

    let extend = |segment: &mut Option<TokenSpan>, idx: usize| match segment {
        Some(span) => span.last = idx,
        None => *segment = Some(TokenSpan { first: idx, last: idx }),
    };

    for (j, token) in tokens.iter().enumerate().skip(open + 1) {
        if token.kind.is_comment() {
            continue;
        }
        let text = if token.kind == TokenKind::Punct {
            token.text(source)
        } else {
            ""
        };

        match text {
            "<" => {
                depth += 1;
                extend(&mut segment, j);
            }
            ">" | ">>" | ">>>" => {
                // `Foo<Bar<T>>` lexes the final `>>` as one punctuator that
                // folds two angle levels.
                let folds = text.len();
                if depth <= folds {
                    if let Some(span) = segment.take() {
                        params.push(span);
                    }
                    return Some(TypeParamList {
                        open,
                        close: j,
                        params,
                    });
                }
                depth -= folds;
                extend(&mut segment, j);
            }
            "(" | "{" | "[" => {
                inner += 1;
                extend(&mut segment, j);
            }
            ")" | "}" | "]" => {
                if inner == 0 {
                    // Closed a bracket we never opened: this `<` was a
                    // comparison, not a parameter list.
                    return None;
                }
                inner -= 1;
                extend(&mut segment, j);
            }
            ";" if inner == 0 => return None,
            "," if inner == 0 && depth == 1 => {
                if let Some(span) = segment.take() {
                    params.push(span);
                }
            }
            _ => extend(&mut segment, j),
        }
    }

    None
}
