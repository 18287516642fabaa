// Structured tiers: whole-text JSON and JSON objects embedded in prose.
//
// Both tiers end the same way: a JSON value is searched for the first object
// whose `platform` field names the target, and that object's `content` and
// optional `char_count` are lifted out.

use serde_json::{Map, Value};

use super::literal::parse_loose;
use crate::platform::Platform;

/// A post recovered from a structured object, before cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct PostObject {
    pub content: String,
    /// `char_count` as reported by the model, when present and non-negative.
    pub reported_char_count: Option<usize>,
}

/// Parse the whole text as JSON, falling back to the body of a Markdown
/// code fence when the text is wrapped in one.
pub fn parse_strict(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }
    let fenced = strip_code_fence(trimmed)?;
    serde_json::from_str::<Value>(fenced).ok()
}

/// Body of a ```json ... ``` (or bare ``` ... ```) fence, if the text is one.
fn strip_code_fence(text: &str) -> Option<&str> {
    let body = text.strip_prefix("```")?;
    let body = body.strip_prefix("json").unwrap_or(body);
    Some(body.trim().trim_end_matches("```").trim())
}

/// Find the first object for `platform` in a parsed value.
///
/// Sequences are scanned in order and the first match wins; a single object
/// matches only if its own `platform` field does.
pub fn find_post(value: &Value, platform: &Platform) -> Option<PostObject> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .find(|obj| names_platform(obj, platform))
            .map(post_from_object),
        Value::Object(obj) if names_platform(obj, platform) => Some(post_from_object(obj)),
        _ => None,
    }
}

/// Search prose for an object naming `platform` and parse just that object.
///
/// Every `{` is a candidate start, in document order. A candidate is parsed
/// as a strict JSON value prefix first, then loosely over its balanced span,
/// and the first object whose `platform` matches wins. Nested braces and
/// braces inside strings are fine either way.
pub fn find_embedded(text: &str, platform: &Platform) -> Option<PostObject> {
    for (start, _) in text.match_indices('{') {
        let candidate = &text[start..];
        let value = match serde_json::Deserializer::from_str(candidate).into_iter::<Value>().next() {
            Some(Ok(value)) => Some(value),
            _ => balanced_span(candidate).and_then(parse_loose),
        };
        if let Some(post) = value.as_ref().and_then(|v| find_post(v, platform)) {
            return Some(post);
        }
    }
    None
}

/// The prefix of `text` up to the bracket that closes its first one.
/// Brackets inside single- or double-quoted strings don't count.
fn balanced_span(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn names_platform(obj: &Map<String, Value>, platform: &Platform) -> bool {
    obj.get("platform")
        .and_then(Value::as_str)
        .is_some_and(|label| platform.matches(label))
}

fn post_from_object(obj: &Map<String, Value>) -> PostObject {
    let content = match obj.get("content") {
        Some(Value::String(text)) => text.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };
    let reported_char_count = obj
        .get("char_count")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok());

    PostObject {
        content,
        reported_char_count,
    }
}
