//! Per-file analysis: doc-comment normalization, the two extractors and
//! the dispatcher that routes files between them.

pub mod code;
pub mod comment;
pub mod component;

pub use code::{extract_code_module, resolve_specifier, CodeModule};
pub use comment::{clean_comment, convert_tags, normalize_comment};
pub use component::{extract_component_module, ComponentModule};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::context::AnalysisContext;
use crate::error::AnalyzeError;
use crate::scan::extract_path;
use crate::types::{FileKind, Module, SourceFile, SourceOptions};

/// Resolves file identities to their source text for one run.
///
/// Stands in for the semantic environment the caller analyzes against: a
/// file missing here is a configuration mismatch between the caller's file
/// listing and the analysis environment, not a broken file.
#[derive(Debug, Default)]
pub struct ProgramIndex {
    sources: HashMap<PathBuf, String>,
}

impl ProgramIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<PathBuf>, text: impl Into<String>) {
        self.sources.insert(id.into(), text.into());
    }

    /// Build an index for the given files, using pre-loaded content when
    /// present and reading from disk otherwise.
    pub fn load(files: &[SourceFile]) -> Result<Self, AnalyzeError> {
        let mut index = Self::new();
        for file in files {
            let text = match &file.content {
                Some(text) => text.clone(),
                None => std::fs::read_to_string(&file.id)?,
            };
            index.insert(file.id.clone(), text);
        }
        Ok(index)
    }

    pub fn source_text(&self, id: &Path) -> Option<&str> {
        self.sources.get(id).map(String::as_str)
    }
}

/// Analyze one source file into a [`Module`], routing by file kind.
///
/// Returns `Ok(None)` with a warning when the file is absent from the
/// program index; the run continues for all other files. All four
/// collection fields of the returned module are materialized, so consumers
/// never branch on optionality.
pub fn analyze_module(
    file: &SourceFile,
    program: &ProgramIndex,
    options: &SourceOptions,
    optional_when_default: bool,
    ctx: &mut AnalysisContext,
) -> Result<Option<Module>, AnalyzeError> {
    let path = extract_path(&file.id, options);

    let Some(text) = program.source_text(&file.id) else {
        ctx.warn_file(&path, "file is not part of the analysis program; skipped");
        return Ok(None);
    };
    let Some(kind) = options.file_kind(&path) else {
        ctx.warn_file(&path, "file kind not recognized; skipped");
        return Ok(None);
    };

    let mut module = Module::new(&path);
    match kind {
        FileKind::Code => {
            let extracted = extract_code_module(text, &path);
            module.declarations = extracted.declarations;
            module.re_exports = extracted.re_exports;
            module.star_exports = extracted.star_exports;
            module.comment = extracted.comment;
        }
        FileKind::Component => {
            let extracted = extract_component_module(text, &path, optional_when_default)?;
            module.declarations = vec![extracted.declaration];
            module.comment = extracted.comment;
        }
    }

    module.dependencies = edge_paths(file.dependencies.as_deref(), options);
    module.dependents = edge_paths(file.dependents.as_deref(), options);

    Ok(Some(module))
}

/// Filter raw dependency identities through the source filter, relativize
/// the survivors and sort them. External packages and out-of-scope files
/// are dropped silently.
fn edge_paths(ids: Option<&[PathBuf]>, options: &SourceOptions) -> Vec<String> {
    let mut paths: Vec<String> = ids
        .unwrap_or_default()
        .iter()
        .filter(|id| crate::scan::matches(id, options))
        .map(|id| extract_path(id, options))
        .collect();
    paths.sort();
    paths
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

    fn program_with(id: &str, text: &str) -> ProgramIndex {
        let mut program = ProgramIndex::new();
        program.insert(id, text);
        program
    }

    #[test]
    fn test_missing_file_is_absent_not_error() {
        let file = SourceFile::new("/repo/src/ghost.ts");
        let program = ProgramIndex::new();
        let mut ctx = AnalysisContext::new();

        let result = analyze_module(&file, &program, &options(), true, &mut ctx).unwrap();
        assert!(result.is_none());
        assert!(ctx.is_ok());
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.diagnostics()[0].file.as_deref(), Some("ghost.ts"));
    }

    #[test]
    fn test_code_file_routed_to_code_extractor() {
        let file = SourceFile::new("/repo/src/util.ts");
        let program = program_with("/repo/src/util.ts", "export const A = 1;\n");
        let mut ctx = AnalysisContext::new();

        let module = analyze_module(&file, &program, &options(), true, &mut ctx)
            .unwrap()
            .unwrap();
        assert_eq!(module.path, "util.ts");
        assert_eq!(module.declarations[0].name, "A");
    }

    #[test]
    fn test_component_file_routed_to_component_extractor() {
        let file = SourceFile::new("/repo/src/Badge.svelte");
        let program = program_with(
            "/repo/src/Badge.svelte",
            "<script>\nexport let text: string;\n</script>\n<span>{text}</span>\n",
        );
        let mut ctx = AnalysisContext::new();

        let module = analyze_module(&file, &program, &options(), true, &mut ctx)
            .unwrap()
            .unwrap();
        assert_eq!(module.declarations.len(), 1);
        assert_eq!(module.declarations[0].name, "Badge");
    }

    #[test]
    fn test_collection_fields_always_present() {
        let file = SourceFile::new("/repo/src/util.ts");
        let program = program_with("/repo/src/util.ts", "export const A = 1;\n");
        let mut ctx = AnalysisContext::new();

        let module = analyze_module(&file, &program, &options(), true, &mut ctx)
            .unwrap()
            .unwrap();
        assert!(module.dependencies.is_empty());
        assert!(module.dependents.is_empty());
        assert!(module.re_exports.is_empty());
        assert!(module.star_exports.is_empty());
    }

    #[test]
    fn test_dependency_edges_filtered_relativized_sorted() {
        let file = SourceFile::new("/repo/src/util.ts")
            .with_dependencies(vec![
                "/repo/src/z.ts".into(),
                "/repo/src/a.ts".into(),
                "/repo/node_modules/pkg/index.ts".into(),
            ])
            .with_dependents(vec!["/repo/src/consumer.ts".into()]);
        let program = program_with("/repo/src/util.ts", "export const A = 1;\n");
        let mut ctx = AnalysisContext::new();

        let module = analyze_module(&file, &program, &options(), true, &mut ctx)
            .unwrap()
            .unwrap();
        assert_eq!(module.dependencies, vec!["a.ts", "z.ts"]);
        assert_eq!(module.dependents, vec!["consumer.ts"]);
    }

    #[test]
    fn test_broken_component_propagates_error() {
        let file = SourceFile::new("/repo/src/Broken.svelte");
        let program = program_with("/repo/src/Broken.svelte", "<script>\nexport let a: string;\n");
        let mut ctx = AnalysisContext::new();

        let err = analyze_module(&file, &program, &options(), true, &mut ctx).unwrap_err();
        assert!(matches!(err, AnalyzeError::ComponentParse { .. }));
    }
}
