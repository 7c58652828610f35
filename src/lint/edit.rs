//! Text edits backing auto-fixes
//!
//! A rule never rewrites source itself; it describes each fix as a byte
//! range plus replacement text. Applying the collected edits is the caller's
//! job, and fails loudly on overlap rather than guessing an order.

use std::fmt;
use thiserror::Error;

/// A single replacement of the byte range `start..end`.
///
/// Insertions use an empty range, deletions an empty replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn replace(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset, offset, text)
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::replace(start, end, "")
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} -> {:?}", self.start, self.end, self.replacement)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("overlapping edits: {0} and {1}")]
    Overlap(Edit, Edit),
}

/// A collection of edits applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// The edits in application order.
    pub fn edits(&self) -> Vec<Edit> {
        let mut sorted = self.edits.clone();
        sorted.sort_by_key(|e| (e.start, e.end));
        sorted
    }

    /// Splice all edits into `source`.
    ///
    /// Two edits overlap when one starts before the previous one ends; that
    /// is an error in the rule that produced them, not something to paper
    /// over here.
    pub fn apply(&self, source: &str) -> Result<String, EditError> {
        let sorted = self.edits();

        for pair in sorted.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(EditError::Overlap(pair[0].clone(), pair[1].clone()));
            }
        }

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in &sorted {
            out.push_str(&source[cursor..edit.start]);
            out.push_str(&edit.replacement);
            cursor = edit.end;
        }
        out.push_str(&source[cursor..]);
        Ok(out)
    }
}

impl From<Edit> for EditSet {
    fn from(edit: Edit) -> Self {
        Self { edits: vec![edit] }
    }
}

impl Extend<Edit> for EditSet {
    fn extend<T: IntoIterator<Item = Edit>>(&mut self, iter: T) {
        self.edits.extend(iter);
    }
}
