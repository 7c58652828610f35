//! Token model shared by the lexer, the syntax index and the rules

/// Kind of a lexed token.
///
/// Comments are part of the stream: rules that care about adjacency (spacing
/// around punctuation) see them as ordinary neighbors, and rules that only
/// care about code skip them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved word (`function`, `class`, `return`, ...)
    Keyword,
    /// Identifier
    Ident,
    /// Numeric literal
    Number,
    /// String literal (single or double quoted)
    Str,
    /// Template literal (backtick quoted, may span lines)
    Template,
    /// Punctuator (`,`, `(`, `=>`, `>>>`, ...)
    Punct,
    /// `//` comment, up to but not including the newline
    LineComment,
    /// `/* ... */` comment
    BlockComment,
    /// Byte sequence the lexer could not classify
    Error,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A single token with its byte range and the position of its first byte.
///
/// Tokens are produced once per file and treated as read-only; all text
/// access goes through the source slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
    /// 1-based line of `start`
    pub line: usize,
    /// 1-based byte column of `start`
    pub column: usize,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }

    /// Width in bytes.
    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

/// True when `token` is a punctuator whose text is exactly `","`.
///
/// Commas are identified by value, never by position in any tree.
pub fn is_comma(token: &Token, source: &str) -> bool {
    token.kind == TokenKind::Punct && token.text(source) == ","
}

/// True when `token` is a closing parenthesis.
pub fn is_closing_paren(token: &Token, source: &str) -> bool {
    token.kind == TokenKind::Punct && token.text(source) == ")"
}

/// True when any bytes separate `left` from `right`.
///
/// Whatever occupies the gap counts: a block comment sitting between two
/// tokens is "space" for adjacency purposes, exactly like a run of blanks.
pub fn has_gap(left: &Token, right: &Token) -> bool {
    right.start > left.end
}
