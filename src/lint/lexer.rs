//! Tokenizer producing the token+comment stream the rules scan
//!
//! The alphabet is the C-family token set shared by JavaScript and
//! TypeScript sources: words, numbers, strings, template literals,
//! punctuators and both comment forms. Comments are kept in the stream;
//! whitespace is dropped, but every token carries its byte range so the gap
//! between two neighbors is always recoverable.
//!
//! Lexing never fails: bytes that fit no pattern become `Error` tokens and
//! linting proceeds around them.

use crate::source::LineMap;
use crate::token::{Token, TokenKind};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0b\x0c]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    BlockComment,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    Str,

    #[regex(r"`(?:[^`\\]|\\.)*`")]
    Template,

    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*")]
    #[regex(r"0[bB][01][01_]*")]
    #[regex(r"0[oO][0-7][0-7_]*")]
    #[regex(r"[0-9][0-9_]*(?:\.[0-9][0-9_]*)?(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9][0-9_]*(?:[eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Word,

    #[regex(r"\.\.\.|=>|===|!==|==|!=|<=|>=|&&=|&&|\|\|=|\|\||\?\?=|\?\?|\?\.|\+\+|--|\+=|-=|\*=|/=|%=|&=|\|=|\^=|\*\*=|\*\*|<<=|<<|>>>=|>>>|>>=|>>")]
    #[regex(r"[{}()\[\];,.<>:?~!%^&*+=|/@#-]")]
    Punct,
}

/// Words that lex as keywords rather than identifiers.
///
/// Only the subset the syntax index keys off needs to be reserved, plus the
/// common ones so token dumps read sensibly.
const KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "default", "delete",
    "do", "else", "enum", "export", "extends", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "of", "return", "static", "super",
    "switch", "this", "throw", "try", "type", "typeof", "var", "void", "while", "yield",
];

/// Lex `source` into the full token+comment stream.
pub fn tokenize(source: &str, lines: &LineMap) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(RawToken::LineComment) => TokenKind::LineComment,
            Ok(RawToken::BlockComment) => TokenKind::BlockComment,
            Ok(RawToken::Str) => TokenKind::Str,
            Ok(RawToken::Template) => TokenKind::Template,
            Ok(RawToken::Number) => TokenKind::Number,
            Ok(RawToken::Word) => {
                if KEYWORDS.contains(&lexer.slice()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Ident
                }
            }
            Ok(RawToken::Punct) => TokenKind::Punct,
            Err(()) => TokenKind::Error,
        };

        let (line, column) = lines.line_col(span.start);
        tokens.push(Token {
            kind,
            start: span.start,
            end: span.end,
            line,
            column,
        });
    }

    tokens
}
