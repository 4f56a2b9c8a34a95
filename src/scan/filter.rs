//! Scope decisions for candidate source files.
//!
//! A path is in scope iff it sits under a configured source directory, that
//! directory is the *first* occurrence of the source-root marker in the path
//! (a nested vendored copy of the source tree never matches), its extension
//! is allow-listed, and no exclusion pattern matches.

use regex::Regex;
use std::path::Path;

use crate::types::SourceOptions;

/// Normalize a path for matching: lossy UTF-8, forward slashes.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Index of the first `/{source_root}/` segment in `path`, treating the
/// path start as a segment boundary. Returns the byte offset of the end of
/// the marker segment (start of the relative remainder).
fn first_marker_end(path: &str, source_root: &str) -> Option<usize> {
    let marker = format!("/{}/", source_root);
    let padded = format!("/{}", path);
    padded.find(&marker).map(|idx| idx + marker.len() - 1)
}

/// Does `path` belong to the analysis set?
pub fn matches(path: &Path, options: &SourceOptions) -> bool {
    let p = normalize_path(path);

    if options.file_kind(&p).is_none() {
        return false;
    }

    for pattern in &options.exclude {
        if let Ok(re) = Regex::new(pattern) {
            if re.is_match(&p) {
                return false;
            }
        }
    }

    // The directory prefix ending at the first source-root marker must be a
    // configured source dir. Rejects files that merely contain a nested copy
    // of the source tree deeper in their path.
    let Some(rel_start) = first_marker_end(&p, &options.source_root) else {
        return false;
    };
    let prefix = p[..rel_start].trim_end_matches('/');
    options
        .source_dirs
        .iter()
        .any(|dir| normalize_path(Path::new(dir)).trim_end_matches('/') == prefix)
}

/// Root-relative module path: everything after the first source-root marker.
/// If the marker is absent the full path is returned unchanged.
pub fn extract_path(path: &Path, options: &SourceOptions) -> String {
    let p = normalize_path(path);
    match first_marker_end(&p, &options.source_root) {
        Some(rel_start) => p[rel_start..].to_string(),
        None => p,
    }
}
