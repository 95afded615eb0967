//! Argument string handling.
//!
//! Step tables describe each invocation as a single argument string, the way
//! the tools document their command lines. Before spawning, the string is
//! split into argv entries:
//!
//! - whitespace separates arguments
//! - double quotes group text (including spaces) and are removed
//! - backslashes are ordinary characters, so Windows paths survive
//! - an unquoted `*` or `?` in the last path component marks the argument as
//!   a wildcard, expanded against the directory it names
//!
//! Wildcards that match nothing are passed through unchanged.

use globset::Glob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One argument produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgToken {
    pub text: String,
    /// True when a wildcard character appeared outside quotes.
    pub wildcard: bool,
}

/// Split an argument string into tokens.
pub fn tokenize(arguments: &str) -> Vec<ArgToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut wildcard = false;

    for c in arguments.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(ArgToken {
                        text: std::mem::take(&mut current),
                        wildcard,
                    });
                    in_token = false;
                    wildcard = false;
                }
            }
            c => {
                if !in_quotes && (c == '*' || c == '?') {
                    wildcard = true;
                }
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(ArgToken {
            text: current,
            wildcard,
        });
    }

    tokens
}

/// Expand a wildcard token against the filesystem.
///
/// Relative patterns are resolved against `base` but returned relative, the
/// way a shell would. Only the final path component may contain wildcards.
pub fn expand_wildcard(pattern: &str, base: &Path) -> Vec<String> {
    let pattern_path = Path::new(pattern);
    let Some(file_pattern) = pattern_path.file_name().and_then(|s| s.to_str()) else {
        return vec![pattern.to_string()];
    };
    let parent = pattern_path.parent().unwrap_or_else(|| Path::new(""));
    if parent.to_string_lossy().contains(|c: char| c == '*' || c == '?') {
        return vec![pattern.to_string()];
    }

    let matcher = match Glob::new(file_pattern) {
        Ok(glob) => glob.compile_matcher(),
        Err(_) => return vec![pattern.to_string()],
    };

    let search_dir = if parent.is_absolute() {
        parent.to_path_buf()
    } else {
        base.join(parent)
    };

    let mut matches: Vec<PathBuf> = WalkDir::new(&search_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matcher.is_match(entry.file_name()))
        .map(|entry| parent.join(entry.file_name()))
        .collect();

    if matches.is_empty() {
        return vec![pattern.to_string()];
    }

    matches.sort();
    matches
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

/// Turn an argument string into the final argv, expanding wildcards against
/// `base`.
pub fn build_argv(arguments: &str, base: &Path) -> Vec<String> {
    tokenize(arguments)
        .into_iter()
        .flat_map(|token| {
            if token.wildcard {
                expand_wildcard(&token.text, base)
            } else {
                vec![token.text]
            }
        })
        .collect()
}

/// Quote a path so it survives tokenizing as a single argument.
pub fn quote(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

/// Quote each path and join them with spaces.
pub fn quote_all(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| quote(p))
        .collect::<Vec<_>>()
        .join(" ")
}
