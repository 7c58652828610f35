//! Per-file execution: lex, index, run rules, filter suppressions, fix

use crate::config::ProjectConfig;
use crate::context::LintContext;
use crate::edit::{EditError, EditSet};
use crate::error::LintError;
use crate::lexer;
use crate::linter::Linter;
use crate::source::LineMap;
use crate::syntax;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How a single `run_linters` call should behave.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Whether rules should construct fixes at all
    pub allow_auto_fix: bool,

    /// Whether collected fixes should be applied to the source
    pub apply_auto_fix: bool,

    /// Rules to run (empty = all registered)
    pub enabled_linters: Vec<String>,

    /// Rules to skip
    pub disabled_linters: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            allow_auto_fix: true,
            apply_auto_fix: false,
            enabled_linters: Vec::new(),
            disabled_linters: Vec::new(),
        }
    }
}

impl LintConfig {
    /// Derive a run config from a project config file.
    pub fn from_project(project: &ProjectConfig) -> Self {
        Self {
            disabled_linters: project.disabled_linters.clone(),
            ..Self::default()
        }
    }
}

/// Outcome of linting one file.
#[derive(Debug)]
pub struct LintResult {
    pub file_path: PathBuf,

    /// Violations that survived suppression filtering
    pub errors: Vec<LintError>,

    /// Whether any fixes were applied
    pub fixes_applied: bool,

    /// The fixed source, when fixes were applied
    pub modified_source: Option<String>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to apply fixes: {0}")]
    Fix(#[from] EditError),
}

/// Marker stored in suppression sets meaning "all rules".
const ALL_RULES: &str = "";

/// Suppression directives found in the source.
///
/// Two forms:
///
/// - `lint-ignore-file[rule-name]` anywhere in the file suppresses that rule
///   for the whole file (`lint-ignore-file` alone suppresses everything);
/// - `lint-ignore[rule-name]` suppresses the rule on its own line and the
///   line after it.
#[derive(Debug, Default)]
struct Suppressions {
    whole_file: FxHashSet<String>,
    by_line: FxHashMap<usize, FxHashSet<String>>,
}

fn parse_suppressions(source: &str) -> Suppressions {
    let mut suppressions = Suppressions::default();

    for (line_idx, line) in source.lines().enumerate() {
        let line_num = line_idx + 1;

        let (whole_file, rest) = if let Some(pos) = line.find("lint-ignore-file") {
            (true, &line[pos + "lint-ignore-file".len()..])
        } else if let Some(pos) = line.find("lint-ignore") {
            (false, &line[pos + "lint-ignore".len()..])
        } else {
            continue;
        };

        let rule = rest
            .strip_prefix('[')
            .and_then(|r| r.split_once(']'))
            .map(|(name, _)| name.trim().to_string())
            .unwrap_or_else(|| ALL_RULES.to_string());

        if whole_file {
            suppressions.whole_file.insert(rule);
        } else {
            suppressions.by_line.entry(line_num).or_default().insert(rule);
        }
    }

    suppressions
}

fn set_suppresses(set: &FxHashSet<String>, linter_name: &str) -> bool {
    set.contains(ALL_RULES) || set.contains(linter_name)
}

fn is_suppressed(error: &LintError, lines: &LineMap, suppressions: &Suppressions) -> bool {
    if set_suppresses(&suppressions.whole_file, error.linter_name) {
        return true;
    }

    let start_line = lines.line_of(error.start_offset);
    let end_line = lines.line_of(error.end_offset.max(error.start_offset));

    for line in start_line..=end_line {
        // Same line (inline comment) or the line above.
        for candidate in [line, line.saturating_sub(1)] {
            if candidate == 0 {
                continue;
            }
            if let Some(set) = suppressions.by_line.get(&candidate) {
                if set_suppresses(set, error.linter_name) {
                    return true;
                }
            }
        }
    }

    false
}

/// Run a set of rules over one file's contents.
///
/// All per-file state (tokens, syntax index, line map, each rule's working
/// sets) is created here and dropped when this returns.
pub fn run_linters(
    file_path: &Path,
    contents: &str,
    linters: &[&dyn Linter],
    config: &LintConfig,
) -> Result<LintResult, RunError> {
    let lines = LineMap::new(contents);
    let tokens = lexer::tokenize(contents, &lines);
    let index = syntax::scan(&tokens, contents);

    let ctx = LintContext::new(
        contents,
        file_path,
        &tokens,
        &index,
        &lines,
        config.allow_auto_fix,
    );

    let suppressions = parse_suppressions(contents);

    let mut all_errors = Vec::new();
    for linter in linters {
        let name = linter.name();
        if !config.enabled_linters.is_empty()
            && !config.enabled_linters.iter().any(|n| n == name)
        {
            continue;
        }
        if config.disabled_linters.iter().any(|n| n == name) {
            continue;
        }

        for error in linter.lint(&ctx) {
            if !is_suppressed(&error, &lines, &suppressions) {
                all_errors.push(error);
            }
        }
    }

    let mut fixes_applied = false;
    let mut modified_source = None;

    if config.apply_auto_fix && config.allow_auto_fix {
        let mut edits = EditSet::new();
        for error in &all_errors {
            if let Some(fix) = &error.fix {
                edits.extend(fix.edits());
            }
        }

        if !edits.is_empty() {
            modified_source = Some(edits.apply(contents)?);
            fixes_applied = true;
        }
    }

    Ok(LintResult {
        file_path: file_path.to_path_buf(),
        errors: all_errors,
        fixes_applied,
        modified_source,
    })
}
