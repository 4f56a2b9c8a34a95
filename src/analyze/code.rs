//! Declaration extraction for plain typed code modules.
//!
//! Walks top-level `export` statements in source order and produces
//! normalized declaration records, re-export records and star-export
//! targets. Re-exports and declarations are disjoint: a forwarded symbol's
//! canonical metadata stays in its origin module.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyze::comment::normalize_comment;
use crate::types::{Declaration, DeclarationKind, ReExport};

/// Extraction result for one code module.
#[derive(Debug, Default)]
pub struct CodeModule {
    pub declarations: Vec<Declaration>,
    pub re_exports: Vec<ReExport>,
    pub star_exports: Vec<String>,
    pub comment: Option<String>,
}

// export [async] function name(
static FUNCTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export\s+(?:async\s+)?function\s+(\w+)").unwrap());

// export [abstract] class Name
static CLASS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export\s+(?:abstract\s+)?class\s+(\w+)").unwrap());

// export const NAME / export let name
static VALUE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export\s+(?:declare\s+)?(?:const|let|var)\s+(\w+)").unwrap());

// export type Name = ...
static TYPE_ALIAS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export\s+type\s+(\w+)\s*(?:<[^>]*>)?\s*=").unwrap());

// export interface Name
static INTERFACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export\s+interface\s+(\w+)").unwrap());

// export [const] enum Name
static ENUM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export\s+(?:const\s+)?enum\s+(\w+)").unwrap());

// export { a, b as c } from './x'
static RE_EXPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^export\s*(?:type\s+)?\{([^}]*)\}\s*from\s*['"]([^'"]+)['"]"#).unwrap()
});

// export * from './x'
static STAR_EXPORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^export\s*\*\s*from\s*['"]([^'"]+)['"]"#).unwrap());

/// Extract all exported declarations from one code module.
///
/// `module_path` is the module's root-relative path, used to resolve
/// relative re-export specifiers.
pub fn extract_code_module(content: &str, module_path: &str) -> CodeModule {
    let blocks = doc_blocks(content);
    let mut module = CodeModule::default();

    let kinds: [(&Lazy<Regex>, DeclarationKind); 6] = [
        (&FUNCTION_PATTERN, DeclarationKind::Function),
        (&CLASS_PATTERN, DeclarationKind::Class),
        (&VALUE_PATTERN, DeclarationKind::Value),
        (&TYPE_ALIAS_PATTERN, DeclarationKind::TypeAlias),
        (&INTERFACE_PATTERN, DeclarationKind::Interface),
        (&ENUM_PATTERN, DeclarationKind::Enum),
    ];

    for (pattern, kind) in kinds {
        for cap in pattern.captures_iter(content) {
            let whole = cap.get(0).unwrap();
            let name = cap.get(1).map(|m| m.as_str()).unwrap_or("");
            // `export const enum X` belongs to the enum pattern.
            if kind == DeclarationKind::Value && name == "enum" {
                continue;
            }
            let line = line_number_at_offset(content, whole.start());
            let comment = attached_block(&blocks, line).and_then(|b| normalize_comment(b));
            let signature = statement_signature(content, whole.start(), kind);

            module.declarations.push(
                Declaration::new(name, kind, line)
                    .with_comment(comment)
                    .with_signature(signature),
            );
        }
    }

    module.declarations.sort_by_key(|d| d.source_line);
    module.declarations.dedup_by(|a, b| a.name == b.name);

    for cap in RE_EXPORT_PATTERN.captures_iter(content) {
        let specifiers = cap.get(1).map(|m| m.as_str()).unwrap_or("");
        let Some(source) = resolve_specifier(module_path, cap.get(2).unwrap().as_str()) else {
            continue;
        };
        for item in specifiers.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            let (exported_name, local_name) = match item.split_once(" as ") {
                Some((orig, alias)) => (orig.trim(), alias.trim()),
                None => (item, item),
            };
            module.re_exports.push(ReExport {
                local_name: local_name.to_string(),
                source_module: source.clone(),
                exported_name: exported_name.to_string(),
            });
        }
    }

    for cap in STAR_EXPORT_PATTERN.captures_iter(content) {
        if let Some(target) = resolve_specifier(module_path, cap.get(1).unwrap().as_str()) {
            module.star_exports.push(target);
        }
    }

    module.comment = module_comment(content, &blocks, &module.declarations);
    module
}

/// Resolve a relative import specifier against the importing module's
/// root-relative path. External package specifiers resolve to `None`.
/// A trailing source extension on the specifier is dropped.
pub fn resolve_specifier(current: &str, spec: &str) -> Option<String> {
    if !spec.starts_with('.') {
        return None;
    }

    let mut segments: Vec<&str> = current.split('/').collect();
    segments.pop(); // the module's own file name

    for part in spec.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    Some(strip_source_extension(&joined))
}

/// Drop a trailing source extension, leaving other dotted names alone.
pub fn strip_source_extension(path: &str) -> String {
    for ext in [".ts", ".tsx", ".js", ".jsx", ".mts", ".mjs", ".svelte"] {
        if let Some(stripped) = path.strip_suffix(ext) {
            return stripped.to_string();
        }
    }
    path.to_string()
}

/// All `/** ... */` blocks with their line spans.
fn doc_blocks(content: &str) -> Vec<DocBlock> {
    static BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*\*.*?\*/").unwrap());
    BLOCK_PATTERN
        .find_iter(content)
        .map(|m| DocBlock {
            start_line: line_number_at_offset(content, m.start()),
            end_line: line_number_at_offset(content, m.end() - 1),
            text: m.as_str().to_string(),
        })
        .collect()
}

#[derive(Debug)]
struct DocBlock {
    start_line: usize,
    end_line: usize,
    text: String,
}

/// The block ending on the line directly above `line`, if any.
fn attached_block(blocks: &[DocBlock], line: usize) -> Option<&str> {
    blocks
        .iter()
        .find(|b| b.end_line + 1 == line)
        .map(|b| b.text.as_str())
}

/// The module-level doc comment: the first block of the file, provided it
/// appears before any code and is not attached to the first exported
/// declaration (an attached block documents the declaration instead).
fn module_comment(
    content: &str,
    blocks: &[DocBlock],
    declarations: &[Declaration],
) -> Option<String> {
    let first = blocks.first()?;
    let first_code = first_code_line(content, blocks);

    if first_code.map(|l| l <= first.start_line).unwrap_or(false) {
        return None;
    }
    if declarations
        .iter()
        .any(|d| d.source_line == first.end_line + 1)
    {
        return None;
    }
    normalize_comment(&first.text)
}

/// First 1-based line holding code: non-blank, not a line comment, not
/// inside a block comment.
fn first_code_line(content: &str, blocks: &[DocBlock]) -> Option<usize> {
    for (idx, line) in content.lines().enumerate() {
        let number = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if blocks
            .iter()
            .any(|b| b.start_line <= number && number <= b.end_line)
        {
            continue;
        }
        return Some(number);
    }
    None
}

/// Signature text for a declaration starting at `start`: the statement head
/// up to its body or terminator, with the `export` keyword dropped and
/// internal whitespace collapsed.
fn statement_signature(content: &str, start: usize, kind: DeclarationKind) -> String {
    let rest = &content[start..];
    let end = match kind {
        // Body-carrying forms stop at the opening brace.
        DeclarationKind::Function
        | DeclarationKind::Class
        | DeclarationKind::Interface
        | DeclarationKind::Enum => rest.find('{').unwrap_or_else(|| head_end(rest)),
        // Statement forms run to the terminating semicolon.
        _ => rest.find(';').unwrap_or_else(|| head_end(rest)),
    };

    static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    let head = SPACE_RUN.replace_all(rest[..end].trim(), " ");
    head.strip_prefix("export ").unwrap_or(&head).to_string()
}

fn head_end(rest: &str) -> usize {
    rest.find('\n').unwrap_or(rest.len())
}

fn line_number_at_offset(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
