// Cleaning applied to every extracted candidate before it reaches the caller.
//
// Model output often leaks JSON scaffolding into the post body: escaped
// newlines, a stray `"content":` key, the braces and quotes around the value.
// Only the edges of the text are touched; interior text is left as written.

const EDGE_CHARS: &[char] = &['{', '}', '[', ']', '"', '\''];
const QUOTES: &[char] = &['"', '\''];

/// Normalize escaped newlines and peel JSON scaffolding off both ends.
///
/// Trimming and key stripping repeat until nothing changes, so the result
/// is a fixpoint: `clean_content(&clean_content(x)) == clean_content(x)`.
pub fn clean_content(content: &str) -> String {
    let normalized = content.replace("\\r\\n", "\n").replace("\\n", "\n");

    let mut current = normalized.as_str();
    loop {
        let trimmed = current.trim_matches(|c: char| c.is_whitespace() || EDGE_CHARS.contains(&c));
        let stripped = strip_content_key(trimmed);
        if stripped.len() == current.len() {
            break;
        }
        current = stripped;
    }
    current.to_string()
}

/// Remove a leading `content:` / `"content":` / `'content':` key, any case.
fn strip_content_key(text: &str) -> &str {
    let rest = text.strip_prefix(QUOTES).unwrap_or(text);
    let Some(key) = rest.get(..7) else {
        return text;
    };
    if !key.eq_ignore_ascii_case("content") {
        return text;
    }
    let rest = &rest[7..];
    let rest = rest.strip_prefix(QUOTES).unwrap_or(rest).trim_start();
    match rest.strip_prefix(':') {
        Some(value) => value.trim_start(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_newlines_become_real() {
        assert_eq!(clean_content("line one\\nline two"), "line one\nline two");
        assert_eq!(clean_content("a\\r\\nb"), "a\nb");
    }

    #[test]
    fn test_strips_key_and_scaffolding() {
        assert_eq!(clean_content(r#"{"content": "Hello there"}"#), "Hello there");
        assert_eq!(clean_content("content: plain"), "plain");
        assert_eq!(clean_content("'Content': 'quoted'"), "quoted");
    }

    #[test]
    fn test_interior_text_untouched() {
        let text = "Great content: check the {specs} below";
        assert_eq!(clean_content(text), text);
    }

    #[test]
    fn test_key_lookalikes_kept() {
        assert_eq!(clean_content("contentious: yes"), "contentious: yes");
        assert_eq!(clean_content("conte"), "conte");
    }

    #[test]
    fn test_nested_keys_reach_fixpoint() {
        let once = clean_content(r#"content: "content: 'deep'""#);
        assert_eq!(once, "deep");
        assert_eq!(clean_content(&once), once);
    }

    #[test]
    fn test_empty_and_scaffolding_only() {
        assert_eq!(clean_content(""), "");
        assert_eq!(clean_content(" {[\"\"]} "), "");
    }
}
