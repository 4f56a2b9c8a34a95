//! Extract a typed, deterministic API model from a package's source tree.
//!
//! The pipeline runs in fixed stages: source filtering, per-file
//! declaration extraction (code modules and component-definition files),
//! cross-module star-export linking, duplicate-name detection and canonical
//! serialization. Each run re-derives the whole model from scratch; output
//! for unchanged input is byte-identical.

pub mod analyze;
pub mod cli;
pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod link;
pub mod scan;
pub mod types;

pub use analyze::{analyze_module, ProgramIndex};
pub use config::Config;
pub use context::{AnalysisContext, Diagnostic, Severity};
pub use error::AnalyzeError;
pub use link::{ensure_no_duplicates, find_duplicates, link_star_exports};
pub use scan::{collect_source_files, extract_path, matches, scan_tree};
pub use types::{
    Declaration, DeclarationKind, FileKind, LibraryModel, Module, PackageMeta, Prop, ReExport,
    SourceFile, SourceOptions,
};

/// Run the whole analysis over a prepared file set: filter and order the
/// sources, analyze each file, link star exports and assemble the final
/// model.
///
/// Per-file structural errors (a malformed component file) abort the run;
/// advisory conditions accumulate in `ctx` for the caller to inspect.
pub fn build_library(
    files: Vec<SourceFile>,
    options: &SourceOptions,
    program: &ProgramIndex,
    meta: PackageMeta,
    optional_when_default: bool,
    ctx: &mut AnalysisContext,
) -> Result<LibraryModel, AnalyzeError> {
    let files = collect_source_files(files, options, ctx);

    let mut modules = Vec::new();
    for file in &files {
        if let Some(module) = analyze_module(file, program, options, optional_when_default, ctx)? {
            modules.push(module);
        }
    }

    let also_exported_from = link_star_exports(&modules, ctx);
    Ok(emit::assemble(meta, modules, also_exported_from))
}
