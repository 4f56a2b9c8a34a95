//! Core data model for the analysis pipeline.
//!
//! Everything here is plain data: inputs owned by the caller
//! ([`SourceFile`], [`SourceOptions`]), per-module extraction results
//! ([`Declaration`], [`ReExport`], [`Module`]) and the final aggregate
//! ([`LibraryModel`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One file handed to the pipeline by the discovery layer.
///
/// Dependency and dependent identities come from an external module graph;
/// the pipeline filters and relativizes them but never computes them.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute identity of the file.
    pub id: PathBuf,
    /// Pre-loaded text content, if the caller already read the file.
    pub content: Option<String>,
    /// Absolute identities of files this file depends on.
    pub dependencies: Option<Vec<PathBuf>>,
    /// Absolute identities of files depending on this file.
    pub dependents: Option<Vec<PathBuf>>,
}

impl SourceFile {
    pub fn new(id: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            content: None,
            dependencies: None,
            dependents: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_dependencies(mut self, deps: Vec<PathBuf>) -> Self {
        self.dependencies = Some(deps);
        self
    }

    pub fn with_dependents(mut self, deps: Vec<PathBuf>) -> Self {
        self.dependents = Some(deps);
        self
    }
}

/// Immutable scope configuration for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Directory-name marker separating package prefix from module paths,
    /// e.g. "src". Module paths are relative to the first occurrence of
    /// this marker.
    pub source_root: String,
    /// Directories whose contents are in scope, ending in the source root,
    /// e.g. "/repo/packages/lib/src".
    pub source_dirs: Vec<String>,
    /// Extensions analyzed as plain code modules (no leading dot).
    pub code_extensions: Vec<String>,
    /// Extensions analyzed as component-definition files.
    pub component_extensions: Vec<String>,
    /// Regex patterns excluding otherwise-matching paths (test files etc).
    pub exclude: Vec<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            source_root: "src".to_string(),
            source_dirs: Vec::new(),
            code_extensions: vec!["ts".to_string()],
            component_extensions: vec!["svelte".to_string()],
            exclude: vec![r"\.test\.".to_string(), r"\.spec\.".to_string()],
        }
    }
}

/// Which extractor a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Typed code module: exported bindings, re-exports, star exports.
    Code,
    /// Component definition: script block + template, one declaration.
    Component,
}

impl SourceOptions {
    /// Classify a path by its extension, `None` if the extension is not in
    /// either allow-list.
    pub fn file_kind(&self, path: &str) -> Option<FileKind> {
        let ext = path.rsplit('.').next()?;
        if self.component_extensions.iter().any(|e| e == ext) {
            Some(FileKind::Component)
        } else if self.code_extensions.iter().any(|e| e == ext) {
            Some(FileKind::Code)
        } else {
            None
        }
    }
}

/// Kind of an exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    Value,
    Function,
    Class,
    TypeAlias,
    Interface,
    Enum,
    Component,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Value => "value",
            DeclarationKind::Function => "function",
            DeclarationKind::Class => "class",
            DeclarationKind::TypeAlias => "type-alias",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Component => "component",
        }
    }
}

/// One publicly declared component property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub name: String,
    /// Declared type text, verbatim from the source.
    pub type_text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_text: Option<String>,
    pub required: bool,
}

/// One exported symbol of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Unique within the owning module.
    pub name: String,
    pub kind: DeclarationKind,
    /// 1-based line of the declaration in its source file.
    pub source_line: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    /// Resolved signature text for code declarations.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signature: Option<String>,
    /// Structured property surface for component declarations.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub props: Option<Vec<Prop>>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind, source_line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            source_line,
            comment: None,
            signature: None,
            props: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_props(mut self, props: Vec<Prop>) -> Self {
        self.props = Some(props);
        self
    }
}

/// A symbol forwarded from another module, possibly under a new name.
///
/// `export { orig as alias } from './x'` records `local_name = "alias"`,
/// `exported_name = "orig"`, `source_module = "x"` (root-relative, no
/// extension). The symbol's canonical metadata stays in the origin module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReExport {
    pub local_name: String,
    pub source_module: String,
    pub exported_name: String,
}

/// One fully analyzed source file.
///
/// Declarations keep source order; the four collection fields are always
/// present in memory and omitted from the canonical serialized form when
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Root-relative path, the module's primary key.
    pub path: String,
    pub declarations: Vec<Declaration>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependents: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub re_exports: Vec<ReExport>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub star_exports: Vec<String>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            declarations: Vec::new(),
            comment: None,
            dependencies: Vec::new(),
            dependents: Vec::new(),
            re_exports: Vec::new(),
            star_exports: Vec::new(),
        }
    }
}

/// Package identity merged into the final model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageMeta {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub repository: Option<String>,
}

/// The terminal artifact: a package's whole public surface.
///
/// Produced fresh each run; modules are sorted by path, declarations keep
/// their source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryModel {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub repository: Option<String>,
    pub modules: Vec<Module>,
    /// Declaration name -> originating module paths, derived from star
    /// exports by the linker.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub also_exported_from: BTreeMap<String, Vec<String>>,
}
