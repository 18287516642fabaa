// Key-value tier: a `content` key followed by a quoted value, anywhere.
//
// This is not platform-aware; it picks up the first quoted `content` value
// in the text when nothing structured could be matched.

use std::sync::OnceLock;

use regex_lite::Regex;

fn content_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?is)\b["']?content["']?\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#,
        )
        .expect("content pattern is valid")
    })
}

/// The first quoted value following a `content` key, unescaped.
pub fn find_content_value(text: &str) -> Option<String> {
    let caps = content_pattern().captures(text)?;
    if let Some(double) = caps.get(1) {
        let quoted = format!("\"{}\"", double.as_str());
        return Some(
            serde_json::from_str::<String>(&quoted).unwrap_or_else(|_| double.as_str().to_string()),
        );
    }
    caps.get(2).map(|single| single.as_str().replace("\\'", "'"))
}
