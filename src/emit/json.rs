//! Canonical serialization of the library model.
//!
//! The serialized form is the caching/diffing contract: stable key order,
//! tab indentation, one trailing newline, empty collections omitted. Two
//! runs over identical input produce byte-identical output.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{LibraryModel, Module, PackageMeta};

/// Sort modules by path, merge package identity and attach the linker's
/// "also exported from" index. Declaration order within each module is
/// source order and is never re-sorted.
pub fn assemble(
    meta: PackageMeta,
    mut modules: Vec<Module>,
    also_exported_from: BTreeMap<String, Vec<String>>,
) -> LibraryModel {
    modules.sort_by(|a, b| a.path.cmp(&b.path));
    LibraryModel {
        name: meta.name,
        version: meta.version,
        description: meta.description,
        repository: meta.repository,
        modules,
        also_exported_from,
    }
}

/// Serialize a model to its canonical textual form.
pub fn to_canonical_json(model: &LibraryModel) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    let mut text = match model.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| "{}".to_string()),
        Err(_) => "{}".to_string(),
    };
    text.push('\n');
    text
}

/// Source text of the thin typed-accessor wrapper.
///
/// The wrapper re-exports the parsed model with nominal types attached,
/// for loaders that cannot carry precise types through data imports.
/// Loaders that can may omit it.
pub fn typed_wrapper_source(model: &LibraryModel) -> String {
    let mut out = String::new();
    out.push_str("// Generated by apilens. Do not edit.\n");
    out.push_str(&format!(
        "/** Typed accessor for the `{}` library model. */\n",
        model.name
    ));
    out.push_str("import type { LibraryModel } from \"apilens/model\";\n");
    out.push_str("import model from \"./library.json\";\n");
    out.push('\n');
    out.push_str("export default model as LibraryModel;\n");
    out
}

/// Both co-located artifacts produced from one in-memory model.
#[derive(Debug)]
pub struct GeneratedArtifacts {
    pub serialized: String,
    pub wrapper: Option<String>,
}

/// Produce the canonical serialized form plus, unless disabled, the typed
/// wrapper source.
pub fn generate(model: &LibraryModel, emit_wrapper: bool) -> GeneratedArtifacts {
    GeneratedArtifacts {
        serialized: to_canonical_json(model),
        wrapper: emit_wrapper.then(|| typed_wrapper_source(model)),
    }
}
