//! Source-set collection and filesystem discovery.

use std::path::Path;

use crate::context::AnalysisContext;
use crate::scan::filter::{extract_path, matches};
use crate::types::{SourceFile, SourceOptions};

/// Filter a caller-supplied file set down to the analysis set, ordered by
/// root-relative path for deterministic downstream output.
///
/// An empty result is a valid state (an empty library), reported as a
/// warning, never an error.
pub fn collect_source_files(
    files: Vec<SourceFile>,
    options: &SourceOptions,
    ctx: &mut AnalysisContext,
) -> Vec<SourceFile> {
    let mut collected: Vec<SourceFile> = files
        .into_iter()
        .filter(|f| matches(&f.id, options))
        .collect();

    collected.sort_by_key(|f| extract_path(&f.id, options));

    if collected.is_empty() {
        ctx.warn("no source files matched the configured scope");
    }

    collected
}

/// Walk a directory tree and produce candidate [`SourceFile`]s for every
/// in-scope file. Contents are left unloaded; the program index reads them
/// on demand.
pub fn scan_tree(
    root: &Path,
    options: &SourceOptions,
    respect_gitignore: bool,
) -> std::io::Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    if respect_gitignore {
        let walk = ignore::WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .build();
        for entry in walk.flatten() {
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false)
                && matches(entry.path(), options)
            {
                files.push(SourceFile::new(entry.path().to_path_buf()));
            }
        }
    } else {
        for entry in walkdir::WalkDir::new(root).into_iter().flatten() {
            if entry.file_type().is_file() && matches(entry.path(), options) {
                files.push(SourceFile::new(entry.path().to_path_buf()));
            }
        }
    }

    files.sort_by_key(|f| extract_path(&f.id, options));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SourceOptions {
        SourceOptions {
            source_dirs: vec!["/repo/src".to_string()],
            ..SourceOptions::default()
        }
    }

    #[test]
    fn test_collect_filters_and_sorts() {
        let files = vec![
            SourceFile::new("/repo/src/zeta.ts"),
            SourceFile::new("/repo/src/alpha.ts"),
            SourceFile::new("/repo/src/alpha.test.ts"),
            SourceFile::new("/elsewhere/beta.ts"),
        ];
        let mut ctx = AnalysisContext::new();
        let collected = collect_source_files(files, &options(), &mut ctx);

        let relative: Vec<String> = collected
            .iter()
            .map(|f| extract_path(&f.id, &options()))
            .collect();
        assert_eq!(relative, vec!["alpha.ts", "zeta.ts"]);
        assert_eq!(ctx.warning_count(), 0);
    }

    #[test]
    fn test_collect_empty_set_warns() {
        let files = vec![SourceFile::new("/elsewhere/beta.ts")];
        let mut ctx = AnalysisContext::new();
        let collected = collect_source_files(files, &options(), &mut ctx);

        assert!(collected.is_empty());
        assert!(ctx.is_ok());
        assert_eq!(ctx.warning_count(), 1);
    }
}
