//! Declaration extraction for component-definition files.
//!
//! A component file combines a typed script block with a markup template
//! and exposes its publicly declared properties as its interface. Unlike
//! doc comments, a malformed component file is fatal: partial component
//! metadata would silently corrupt the library description.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::analyze::comment::normalize_comment;
use crate::error::AnalyzeError;
use crate::types::{Declaration, DeclarationKind, Prop};

/// Extraction result for one component file.
#[derive(Debug)]
pub struct ComponentModule {
    pub declaration: Declaration,
    pub comment: Option<String>,
}

// export let name: Type = default;
static PROP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*export\s+let\s+(\w+)\s*(?::\s*([^=;\n]+?))?\s*(?:=\s*([^;\n]+?))?\s*;")
        .unwrap()
});

// : Type | undefined
static UNDEFINED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bundefined\b").unwrap());

/// One `<script>` element: the whole-element span and its body span,
/// both as byte ranges into the original file content.
#[derive(Debug)]
struct ScriptBlock {
    element: Range<usize>,
    body: Range<usize>,
}

/// Extract the single component declaration from one component file.
///
/// `module_path` is the root-relative path; the declaration is named after
/// the file minus its extension. `optional_when_default` controls whether a
/// default value alone makes a prop optional.
pub fn extract_component_module(
    content: &str,
    module_path: &str,
    optional_when_default: bool,
) -> Result<ComponentModule, AnalyzeError> {
    let scripts = split_scripts(content, module_path)?;
    check_template(content, &scripts, module_path)?;
    for script in &scripts {
        check_script(content, script, module_path)?;
    }

    let script_text = scripts
        .iter()
        .map(|s| &content[s.body.clone()])
        .collect::<Vec<_>>()
        .join("\n");

    let mut props = Vec::new();
    for cap in PROP_PATTERN.captures_iter(&script_text) {
        let name = cap.get(1).map(|m| m.as_str()).unwrap_or("");
        let type_text = cap
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| "any".to_string());
        let default_text = cap.get(3).map(|m| m.as_str().trim().to_string());

        let has_marker = UNDEFINED_MARKER.is_match(&type_text) || type_text.ends_with('?');
        let optional = has_marker || (default_text.is_some() && optional_when_default);

        props.push(Prop {
            name: name.to_string(),
            type_text,
            default_text,
            required: !optional,
        });
    }

    let name = component_name(module_path);
    let mut declaration = Declaration::new(name, DeclarationKind::Component, 1);
    if !props.is_empty() {
        declaration = declaration.with_props(props);
    }

    let comment = first_doc_block(&script_text).and_then(normalize_comment);

    Ok(ComponentModule {
        declaration,
        comment,
    })
}

/// File name minus extension.
fn component_name(module_path: &str) -> String {
    let file = module_path.rsplit('/').next().unwrap_or(module_path);
    match file.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file.to_string(),
    }
}

/// Locate every `<script>` element. A script tag that never closes makes
/// the file unparseable.
fn split_scripts(content: &str, file: &str) -> Result<Vec<ScriptBlock>, AnalyzeError> {
    let mut scripts = Vec::new();
    let mut cursor = 0;

    while let Some(open) = content[cursor..].find("<script") {
        let open = cursor + open;
        let Some(tag_end) = content[open..].find('>') else {
            return Err(parse_error(file, content, open, "unterminated script tag"));
        };
        let body_start = open + tag_end + 1;
        let Some(close) = content[body_start..].find("</script>") else {
            return Err(parse_error(file, content, open, "unclosed script block"));
        };
        let body_end = body_start + close;
        let element_end = body_end + "</script>".len();
        scripts.push(ScriptBlock {
            element: open..element_end,
            body: body_start..body_end,
        });
        cursor = element_end;
    }

    Ok(scripts)
}

/// Reject templates whose interpolation braces do not form a well-formed
/// tree. Script elements are skipped; quoted attribute values may contain
/// free braces.
fn check_template(
    content: &str,
    scripts: &[ScriptBlock],
    file: &str,
) -> Result<(), AnalyzeError> {
    let mut depth: i32 = 0;
    let mut in_quote: Option<char> = None;

    for (offset, ch) in content.char_indices() {
        if scripts.iter().any(|s| s.element.contains(&offset)) {
            continue;
        }
        match in_quote {
            Some(q) => {
                if ch == q {
                    in_quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => in_quote = Some(ch),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(parse_error(
                            file,
                            content,
                            offset,
                            "unexpected `}` outside an interpolation expression",
                        ));
                    }
                }
                _ => {}
            },
        }
    }

    if depth != 0 {
        return Err(AnalyzeError::ComponentParse {
            file: file.to_string(),
            line: content.matches('\n').count() + 1,
            message: "unterminated interpolation expression".to_string(),
        });
    }
    Ok(())
}

/// Reject scripts with an unclosed block comment; everything after it
/// would be silently swallowed otherwise.
fn check_script(content: &str, script: &ScriptBlock, file: &str) -> Result<(), AnalyzeError> {
    let body = &content[script.body.clone()];
    let mut rest = body;
    let mut consumed = 0;
    while let Some(open) = rest.find("/*") {
        match rest[open + 2..].find("*/") {
            Some(close) => {
                let advance = open + 2 + close + 2;
                consumed += advance;
                rest = &rest[advance..];
            }
            None => {
                return Err(parse_error(
                    file,
                    content,
                    script.body.start + consumed + open,
                    "unclosed block comment in script",
                ))
            }
        }
    }
    Ok(())
}

fn first_doc_block(script: &str) -> Option<&str> {
    static BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*\*.*?\*/").unwrap());
    BLOCK_PATTERN.find(script).map(|m| m.as_str())
}

fn parse_error(file: &str, content: &str, offset: usize, message: &str) -> AnalyzeError {
    AnalyzeError::ComponentParse {
        file: file.to_string(),
        line: content[..offset.min(content.len())].matches('\n').count() + 1,
        message: message.to_string(),
    }
}
