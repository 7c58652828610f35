use clap::{Command, arg};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::{Arc, Mutex};
use toklint_lint::rules::{CommaSpacingLinter, NoTrailingWhitespaceLinter};
use toklint_lint::{
    CONFIG_FILE_NAME, LineMap, LintConfig, Linter, LinterRegistry, ProjectConfig, run_linters,
};
use walkdir::WalkDir;

/// File extensions picked up when walking directories.
const LINTABLE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

pub fn init(custom_linters: Vec<Box<dyn Linter>>, header: &str) {
    env_logger::init();
    println!("{}\n", header);

    let matches = Command::new("toklint")
        .about("A token-level layout linter for JavaScript and TypeScript")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("lint")
                .about("Runs lint rules over source files")
                .arg(
                    arg!(--"root" <PATH>)
                        .required(false)
                        .help("Project root, defaults to the current directory"),
                )
                .arg(
                    arg!(--"config" <PATH>)
                        .required(false)
                        .help("Config path, defaults to <root>/toklint.json"),
                )
                .arg(
                    arg!(--"threads" <COUNT>)
                        .required(false)
                        .help("How many threads to use"),
                )
                .arg(
                    arg!(--"fix")
                        .required(false)
                        .help("Apply auto-fixes where available"),
                )
                .arg(
                    arg!(--"diff")
                        .required(false)
                        .help("Print fixes as a unified diff instead of writing files"),
                )
                .arg(
                    arg!(--"linter" <NAME>)
                        .required(false)
                        .multiple(true)
                        .help("Run specific rule(s) by name"),
                )
                .arg(
                    arg!([PATH] "Optional files or directories to lint (defaults to config roots)")
                        .required(false)
                        .multiple(true),
                ),
        )
        .subcommand(Command::new("linters").about("Lists the available rules"))
        .get_matches();

    let mut had_error = false;

    match matches.subcommand() {
        Some(("lint", sub_matches)) => {
            let root_dir = sub_matches.value_of("root").unwrap_or(".").to_string();
            do_lint(sub_matches, &root_dir, &mut had_error, custom_linters);
        }
        Some(("linters", _)) => {
            list_linters(custom_linters, &mut had_error);
        }
        _ => unreachable!(),
    }

    if had_error {
        exit(1);
    }
}

/// Build the registry: built-in rules configured from the project config,
/// then any caller-supplied custom rules.
fn build_registry(
    project: &ProjectConfig,
    custom_linters: Vec<Box<dyn Linter>>,
) -> Result<LinterRegistry, String> {
    let mut registry = LinterRegistry::new();

    let comma_spacing = match project.options_for("comma-spacing") {
        Some(value) => CommaSpacingLinter::from_value(value)
            .map_err(|e| format!("Invalid options for comma-spacing: {e}"))?,
        None => CommaSpacingLinter::new(),
    };
    registry.register(Box::new(comma_spacing));
    registry.register(Box::new(NoTrailingWhitespaceLinter::new()));

    for linter in custom_linters {
        registry.register(linter);
    }

    Ok(registry)
}

fn is_lintable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LINTABLE_EXTENSIONS.contains(&ext))
}

fn list_linters(custom_linters: Vec<Box<dyn Linter>>, had_error: &mut bool) {
    let registry = match build_registry(&ProjectConfig::default(), custom_linters) {
        Ok(registry) => registry,
        Err(e) => {
            println!("{e}");
            *had_error = true;
            return;
        }
    };

    for linter in registry.all() {
        let fixable = if linter.supports_auto_fix() {
            " (fixable)"
        } else {
            ""
        };
        println!("{}{} - {}", linter.name(), fixable, linter.description());
    }
}

fn do_lint(
    sub_matches: &clap::ArgMatches,
    root_dir: &str,
    had_error: &mut bool,
    custom_linters: Vec<Box<dyn Linter>>,
) {
    let config_path = sub_matches
        .value_of("config")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}/{}", root_dir, CONFIG_FILE_NAME));

    let apply_fixes = sub_matches.is_present("fix");
    let diff_mode = sub_matches.is_present("diff");

    let project = if Path::new(&config_path).exists() {
        match ProjectConfig::from_file(Path::new(&config_path)) {
            Ok(config) => config,
            Err(e) => {
                println!("Error loading lint config: {e}");
                *had_error = true;
                return;
            }
        }
    } else {
        log::debug!("no config file at {config_path}, using defaults");
        ProjectConfig::default()
    };

    let registry = match build_registry(&project, custom_linters) {
        Ok(registry) => registry,
        Err(e) => {
            println!("{e}");
            *had_error = true;
            return;
        }
    };

    // Specific rules requested on the command line
    let specific_linters: Option<FxHashSet<String>> = sub_matches
        .values_of("linter")
        .map(|values| values.map(|s| s.to_string()).collect());

    if let Some(requested) = &specific_linters {
        for name in requested {
            if registry.get(name).is_none() {
                println!("Warning: unknown rule '{}'", name);
            }
        }
    }

    // Determine files to lint
    let paths_to_lint: Vec<String> = if let Some(paths) = sub_matches.values_of("PATH") {
        paths.map(|s| s.to_string()).collect()
    } else if !project.roots.is_empty() {
        project
            .roots
            .iter()
            .map(|r| format!("{}/{}", root_dir, r))
            .collect()
    } else {
        vec![root_dir.to_string()]
    };

    let mut files_to_lint = Vec::new();
    for base_path in paths_to_lint {
        for entry in WalkDir::new(&base_path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_lintable(path) {
                files_to_lint.push(path.to_path_buf());
            }
        }
    }

    if files_to_lint.is_empty() {
        println!("\nNo files to lint.");
        return;
    }

    let total_errors = Arc::new(Mutex::new(0usize));
    let total_files = Arc::new(Mutex::new(0usize));
    let total_fixed = Arc::new(Mutex::new(0usize));
    let lint_output = Arc::new(Mutex::new(Vec::new()));

    let threads = sub_matches
        .value_of("threads")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(8);

    let mut group_size = threads;
    if files_to_lint.len() < 4 * group_size {
        group_size = 1;
    }

    let mut path_groups: FxHashMap<usize, Vec<PathBuf>> = FxHashMap::default();
    for (i, path) in files_to_lint.into_iter().enumerate() {
        path_groups.entry(i % group_size).or_default().push(path);
    }

    let registry = Arc::new(registry);
    let project = Arc::new(project);
    let specific_linters = Arc::new(specific_linters);
    let root_dir = root_dir.to_string();

    let mut handles = vec![];

    for (_, path_group) in path_groups {
        let registry = registry.clone();
        let project = project.clone();
        let specific_linters = specific_linters.clone();
        let total_errors = total_errors.clone();
        let total_files = total_files.clone();
        let total_fixed = total_fixed.clone();
        let lint_output = lint_output.clone();
        let root_dir = root_dir.clone();

        let handle = std::thread::spawn(move || {
            let lint_config = LintConfig {
                allow_auto_fix: apply_fixes || diff_mode,
                apply_auto_fix: apply_fixes || diff_mode,
                ..LintConfig::from_project(&project)
            };

            for path in path_group {
                let relative_path = match path.strip_prefix(&root_dir) {
                    Ok(rel) => rel.to_string_lossy().to_string(),
                    Err(_) => path.to_string_lossy().to_string(),
                };

                let file_linters: Vec<&dyn Linter> = registry
                    .all()
                    .iter()
                    .filter(|l| {
                        specific_linters
                            .as_ref()
                            .as_ref()
                            .is_none_or(|requested| requested.contains(l.name()))
                    })
                    .map(|l| l.as_ref())
                    .collect();

                if file_linters.is_empty() {
                    continue;
                }

                let contents = match fs::read_to_string(&path) {
                    Ok(c) => c,
                    Err(e) => {
                        lint_output
                            .lock()
                            .unwrap()
                            .push(format!("Error reading {}: {}", path.display(), e));
                        continue;
                    }
                };

                *total_files.lock().unwrap() += 1;
                log::debug!("linting {}", path.display());

                match run_linters(&path, &contents, &file_linters, &lint_config) {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            *total_errors.lock().unwrap() += result.errors.len();
                            let lines = LineMap::new(&contents);
                            for error in &result.errors {
                                let (line, column) = lines.line_col(error.start_offset);
                                lint_output.lock().unwrap().push(format!(
                                    "{}:{}:{}: {} [{}] {}",
                                    relative_path,
                                    line,
                                    column,
                                    error.severity,
                                    error.linter_name,
                                    error.message
                                ));
                            }
                        }

                        if let Some(fixed_source) = result.modified_source {
                            if diff_mode {
                                lint_output.lock().unwrap().push(render_diff(
                                    &relative_path,
                                    &contents,
                                    &fixed_source,
                                ));
                            } else if apply_fixes {
                                match fs::write(&path, fixed_source) {
                                    Ok(_) => {
                                        *total_fixed.lock().unwrap() += 1;
                                        lint_output
                                            .lock()
                                            .unwrap()
                                            .push(format!("Fixed: {}", relative_path));
                                    }
                                    Err(e) => {
                                        lint_output.lock().unwrap().push(format!(
                                            "Error writing fixes to {}: {}",
                                            path.display(),
                                            e
                                        ));
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        lint_output
                            .lock()
                            .unwrap()
                            .push(format!("Error linting {}: {}", path.display(), e));
                    }
                }
            }
        });

        handles.push(handle);
    }

    for handle in handles {
        let _ = handle.join();
    }

    for line in lint_output.lock().unwrap().iter() {
        println!("{}", line);
    }

    let total_errors = *total_errors.lock().unwrap();
    let total_files = *total_files.lock().unwrap();
    let total_fixed = *total_fixed.lock().unwrap();

    println!("\n{} file(s) checked, {} issue(s) found", total_files, total_errors);
    if total_fixed > 0 {
        println!("{} file(s) fixed", total_fixed);
    }

    if total_errors > 0 && !apply_fixes {
        *had_error = true;
    }
}

fn render_diff(relative_path: &str, original: &str, fixed: &str) -> String {
    let diff = similar::TextDiff::from_lines(original, fixed);
    diff.unified_diff()
        .context_radius(3)
        .header(
            &format!("a/{}", relative_path),
            &format!("b/{}", relative_path),
        )
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lintable_extensions() {
        assert!(is_lintable(Path::new("a/b/c.ts")));
        assert!(is_lintable(Path::new("x.mjs")));
        assert!(!is_lintable(Path::new("x.rs")));
        assert!(!is_lintable(Path::new("Makefile")));
    }

    #[test]
    fn registry_picks_up_rule_options() {
        let json = r#"{ "ruleOptions": { "comma-spacing": { "before": true } } }"#;
        let project: ProjectConfig = serde_json::from_str(json).unwrap();
        let registry = build_registry(&project, vec![]).unwrap();
        assert!(registry.get("comma-spacing").is_some());
        assert!(registry.get("no-trailing-whitespace").is_some());
    }

    #[test]
    fn bad_rule_options_are_an_error() {
        let json = r#"{ "ruleOptions": { "comma-spacing": { "extra": 1 } } }"#;
        let project: ProjectConfig = serde_json::from_str(json).unwrap();
        assert!(build_registry(&project, vec![]).is_err());
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "disabledLinters": ["no-trailing-whitespace"] }}"#).unwrap();

        let project = ProjectConfig::from_file(&path).unwrap();
        assert!(!project.is_linter_enabled("no-trailing-whitespace"));
        assert!(project.is_linter_enabled("comma-spacing"));
    }

    #[test]
    fn diff_rendering() {
        let diff = render_diff("demo.ts", "foo(a,b)\n", "foo(a, b)\n");
        assert!(diff.contains("a/demo.ts"));
        assert!(diff.contains("-foo(a,b)"));
        assert!(diff.contains("+foo(a, b)"));
    }
}
