mod args;
mod check;
mod generate;
mod watch;

pub use args::{Args, Command};
pub use check::run_check;
pub use generate::run_generate;
pub use watch::run_watch;

use anyhow::Result;
use std::path::Path;

use crate::analyze::ProgramIndex;
use crate::config::Config;
use crate::context::AnalysisContext;
use crate::scan::{normalize_path, scan_tree};
use crate::types::{LibraryModel, PackageMeta, SourceOptions};

/// Resolve configured source directories against the package root. An
/// empty configuration defaults to `<root>/<source_root>`.
fn resolve_options(root: &Path, config: &Config) -> SourceOptions {
    let mut options = config.source.clone();
    if options.source_dirs.is_empty() {
        options.source_dirs = vec![normalize_path(&root.join(&options.source_root))];
    } else {
        options.source_dirs = options
            .source_dirs
            .iter()
            .map(|dir| {
                if Path::new(dir).is_absolute() {
                    dir.clone()
                } else {
                    normalize_path(&root.join(dir))
                }
            })
            .collect();
    }
    options
}

/// Package identity from `package.json`, falling back to the directory
/// name when the manifest is absent.
fn load_package_meta(root: &Path) -> Result<PackageMeta> {
    let manifest = root.join("package.json");
    if !manifest.exists() {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "package".to_string());
        return Ok(PackageMeta {
            name,
            version: "0.0.0".to_string(),
            description: None,
            repository: None,
        });
    }

    let text = std::fs::read_to_string(&manifest)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let field = |key: &str| value.get(key).and_then(|v| v.as_str()).map(String::from);
    // "repository" may be a bare URL string or an object with a url field.
    let repository = value.get("repository").and_then(|r| match r {
        serde_json::Value::String(url) => Some(url.clone()),
        other => other.get("url").and_then(|u| u.as_str()).map(String::from),
    });

    Ok(PackageMeta {
        name: field("name").unwrap_or_else(|| "package".to_string()),
        version: field("version").unwrap_or_else(|| "0.0.0".to_string()),
        description: field("description"),
        repository,
    })
}

/// One full analysis pass over a package root.
fn run_pipeline(root: &Path, config: &Config) -> Result<(LibraryModel, AnalysisContext)> {
    let options = resolve_options(root, config);
    let files = scan_tree(root, &options, true)?;
    let program = ProgramIndex::load(&files)?;
    let meta = load_package_meta(root)?;

    let mut ctx = AnalysisContext::new();
    let model = crate::build_library(
        files,
        &options,
        &program,
        meta,
        config.optional_when_default,
        &mut ctx,
    )?;
    Ok((model, ctx))
}
