//! Cross-module passes over the complete module set: star-export linking
//! and duplicate-name detection. Both require the full set, so they run
//! after every file has been analyzed.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyze::code::strip_source_extension;
use crate::context::AnalysisContext;
use crate::error::AnalyzeError;
use crate::types::{Declaration, LibraryModel, Module};

/// Resolve every star-export chain into a flat "also exported from" index:
/// declaration name -> sorted originating module paths.
///
/// Names shadowed by a local declaration in the re-exporting module are not
/// forwarded. A target that resolves to no module in the set is a warning,
/// not an error.
pub fn link_star_exports(
    modules: &[Module],
    ctx: &mut AnalysisContext,
) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for module in modules {
        if module.star_exports.is_empty() {
            continue;
        }
        let local: Vec<&str> = module
            .declarations
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        for target in &module.star_exports {
            let Some(origin) = modules
                .iter()
                .find(|m| strip_source_extension(&m.path) == *target)
            else {
                ctx.warn_file(
                    &module.path,
                    format!("star export target `{}` not found in module set", target),
                );
                continue;
            };
            for declaration in &origin.declarations {
                if local.contains(&declaration.name.as_str()) {
                    continue;
                }
                index
                    .entry(declaration.name.clone())
                    .or_default()
                    .push(origin.path.clone());
            }
        }
    }

    for paths in index.values_mut() {
        paths.sort();
        paths.dedup();
    }
    index
}

/// One occurrence of a duplicated declaration name.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateEntry {
    pub module: String,
    pub declaration: Declaration,
}

/// Group declarations by name across the whole library and keep only names
/// declared in more than one module. Every occurrence is reported, not just
/// the extras. Pure; whether duplicates are fatal is caller policy.
pub fn find_duplicates(model: &LibraryModel) -> BTreeMap<String, Vec<DuplicateEntry>> {
    let mut by_name: BTreeMap<String, Vec<DuplicateEntry>> = BTreeMap::new();

    for module in &model.modules {
        for declaration in &module.declarations {
            by_name
                .entry(declaration.name.clone())
                .or_default()
                .push(DuplicateEntry {
                    module: module.path.clone(),
                    declaration: declaration.clone(),
                });
        }
    }

    by_name.retain(|_, entries| entries.len() > 1);
    by_name
}

/// Strict flat-namespace policy: error when any name is declared in more
/// than one module.
pub fn ensure_no_duplicates(model: &LibraryModel) -> Result<(), AnalyzeError> {
    let duplicates = find_duplicates(model);
    if duplicates.is_empty() {
        return Ok(());
    }
    let summary = duplicates
        .iter()
        .map(|(name, entries)| {
            let modules: Vec<&str> = entries.iter().map(|e| e.module.as_str()).collect();
            format!("`{}` in {}", name, modules.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ");
    Err(AnalyzeError::DuplicateNames(summary))
}
