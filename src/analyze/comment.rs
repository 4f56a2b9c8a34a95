//! Doc-comment cleaning and cross-reference tag conversion.
//!
//! Comments are best-effort: a malformed `{@link}` tag degrades to a literal
//! inline-code passthrough, never an error.

/// Strip block delimiters and per-line markers from a raw doc comment.
///
/// Each interior line loses its leading whitespace, a single `*` marker and
/// at most one following space; any further leading whitespace survives so
/// indented code samples keep their shape. A comment that is empty after
/// cleaning is no comment at all.
pub fn clean_comment(raw: &str) -> Option<String> {
    let text = raw.trim();
    let text = text
        .strip_prefix("/**")
        .or_else(|| text.strip_prefix("/*"))
        .unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);

    let mut lines = Vec::new();
    for line in text.lines() {
        let stripped = line.trim_start();
        if let Some(rest) = stripped.strip_prefix('*') {
            lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        } else {
            lines.push(line);
        }
    }

    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Rewrite `{@link target}` / `{@see target}` tags to portable markup.
///
/// Precedence: URL target with a `|label` becomes a markdown link, a bare
/// URL passes through, anything else is wrapped in inline code (the label,
/// when given, is used verbatim in place of the target). An unclosed tag
/// wraps the literal remainder in inline code.
pub fn convert_tags(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;

    while let Some((idx, tag_len)) = next_tag(rest) {
        // Guard against identifiers that merely start with a tag name.
        let after_name = &rest[idx + tag_len..];
        let boundary = after_name
            .chars()
            .next()
            .map(|c| c.is_whitespace() || c == '}' || c == '|')
            .unwrap_or(true);
        if !boundary {
            let split = idx + tag_len;
            out.push_str(&rest[..split]);
            rest = &rest[split..];
            continue;
        }

        out.push_str(&rest[..idx]);
        let tag = &rest[idx..];

        match tag.find('}') {
            None => {
                // Unterminated: the whole remainder passes through literally.
                out.push('`');
                out.push_str(tag);
                out.push('`');
                return out;
            }
            Some(close) => {
                let inner = tag[tag_len..close].trim();
                out.push_str(&render_tag(inner, &tag[..=close]));
                rest = &tag[close + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Clean a raw doc block and convert its tags in one step.
pub fn normalize_comment(raw: &str) -> Option<String> {
    let cleaned = clean_comment(raw)?;
    let converted = convert_tags(&cleaned);
    let trimmed = converted.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Position and tag-name length of the next cross-reference tag.
fn next_tag(text: &str) -> Option<(usize, usize)> {
    let link = text.find("{@link").map(|i| (i, "{@link".len()));
    let see = text.find("{@see").map(|i| (i, "{@see".len()));
    match (link, see) {
        (Some(l), Some(s)) => Some(if l.0 <= s.0 { l } else { s }),
        (Some(l), None) => Some(l),
        (None, Some(s)) => Some(s),
        (None, None) => None,
    }
}

fn is_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

fn render_tag(inner: &str, literal: &str) -> String {
    // Only the first pipe separates target from label.
    let (target, label) = match inner.split_once('|') {
        Some((t, l)) => (t.trim(), Some(l.trim())),
        None => (inner, None),
    };

    if target.is_empty() {
        return format!("`{}`", literal);
    }

    match (is_url(target), label) {
        (true, Some(label)) => format!("[{}]({})", label, target),
        (true, None) => target.to_string(),
        (false, Some(label)) => format!("`{}`", label),
        (false, None) => format!("`{}`", target),
    }
}
