//! Token-level linting framework for toklint
//!
//! Rules here operate on the full token+comment stream of a file. Every
//! token keeps its byte range, so the gaps between neighbors (the thing
//! layout rules actually care about) are always recoverable. A small
//! structural index covers the few places where token neighbors are not
//! enough; there is no full parse tree.
//!
//! # Architecture
//!
//! - **Rules** ([`Linter`]) analyze one file and report violations,
//!   optionally with auto-fixes
//! - **Edits** ([`Edit`], [`EditSet`]) describe fixes as byte-range
//!   replacements; application rejects overlaps
//! - **Runner** ([`run_linters`]) lexes, indexes, runs the selected rules,
//!   filters `lint-ignore` suppressions and applies fixes when asked
//! - **Config** ([`ProjectConfig`]) is the `toklint.json` file: enabled
//!   rules and per-rule options
//!
//! # Example
//!
//! ```rust
//! use toklint_lint::rules::CommaSpacingLinter;
//! use toklint_lint::{run_linters, LintConfig, Linter};
//! use std::path::Path;
//!
//! let linter = CommaSpacingLinter::new();
//! let linters: Vec<&dyn Linter> = vec![&linter];
//! let result = run_linters(
//!     Path::new("demo.ts"),
//!     "foo(a,b)\n",
//!     &linters,
//!     &LintConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(result.errors.len(), 1);
//! ```

pub mod config;
pub mod context;
pub mod edit;
pub mod error;
pub mod lexer;
pub mod linter;
pub mod rules;
pub mod runner;
pub mod source;
pub mod syntax;
pub mod token;

pub use config::{ConfigError, ProjectConfig, CONFIG_FILE_NAME};
pub use context::LintContext;
pub use edit::{Edit, EditError, EditSet};
pub use error::{LintError, Severity};
pub use linter::{Linter, LinterRegistry};
pub use runner::{run_linters, LintConfig, LintResult, RunError};
pub use source::LineMap;
pub use syntax::SyntaxIndex;
pub use token::{Token, TokenKind};
