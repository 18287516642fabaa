// Content extraction: recover one platform's post from untrusted model output.
//
// Model output arrives in whatever shape the model felt like producing: clean
// JSON, JSON inside chatty prose, Python-ish literals, headered plain text, or
// none of the above. Extraction walks a fixed chain of tiers and the first one
// that produces a post wins. The last tier always produces something, so
// extraction has no error path: the caller always has text to show.

pub mod clean;
pub mod header;
pub mod keyvalue;
pub mod literal;
pub mod structured;

use serde::Serialize;
use tracing::debug;

pub use clean::clean_content;

use crate::platform::Platform;
use structured::PostObject;

/// The post recovered for one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedPost {
    pub platform: Platform,
    /// Cleaned post text. May be empty.
    pub content: String,
    /// Only set for platforms with a length limit. Prefers the count the
    /// model reported alongside the post; otherwise counts characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_count: Option<usize>,
}

/// Which tier produced a post. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    StrictJson,
    LooseLiteral,
    EmbeddedObject,
    KeyValue,
    HeaderScan,
    FullFallback,
}

/// Extract `platform`'s post from `raw`.
///
/// `all_platforms` is every platform requested alongside this one; the
/// header tier uses it to find where this platform's section ends.
pub fn extract_post(raw: &str, platform: &Platform, all_platforms: &[Platform]) -> ExtractedPost {
    let (tier, candidate) = recover(raw, platform, all_platforms);

    debug!(
        platform = platform.name(),
        tier = ?tier,
        content_chars = candidate.content.chars().count(),
        "Extracted post"
    );

    let char_count = platform.char_limit().map(|_| {
        candidate
            .reported_char_count
            .unwrap_or_else(|| candidate.content.chars().count())
    });

    ExtractedPost {
        platform: platform.clone(),
        content: candidate.content,
        char_count,
    }
}

/// Just the post text for `platform`.
pub fn extract_content(raw: &str, platform: &Platform, all_platforms: &[Platform]) -> String {
    extract_post(raw, platform, all_platforms).content
}

/// Run the tier chain. Returned content is already cleaned.
fn recover(raw: &str, platform: &Platform, all_platforms: &[Platform]) -> (Tier, PostObject) {
    // Tiers 1-2: the whole text as one value. The loose parse only runs when
    // strict parsing failed outright.
    let parsed = match structured::parse_strict(raw) {
        Some(value) => Some((Tier::StrictJson, value)),
        None => literal::parse_loose(raw).map(|value| (Tier::LooseLiteral, value)),
    };
    if let Some((tier, value)) = parsed {
        if let Some(post) = structured::find_post(&value, platform) {
            return (tier, cleaned(post));
        }
    }

    // Tier 3
    if let Some(post) = structured::find_embedded(raw, platform) {
        return (Tier::EmbeddedObject, cleaned(post));
    }

    // Tiers 4-5 only count when they leave something after cleaning.
    if let Some(value) = keyvalue::find_content_value(raw) {
        let content = clean_content(&value);
        if !content.is_empty() {
            return (Tier::KeyValue, unreported(content));
        }
    }

    if let Some(section) = header::find_section(raw, platform, all_platforms) {
        let content = clean_content(section);
        if !content.is_empty() {
            return (Tier::HeaderScan, unreported(content));
        }
    }

    (Tier::FullFallback, unreported(clean_content(raw)))
}

fn cleaned(post: PostObject) -> PostObject {
    PostObject {
        content: clean_content(&post.content),
        reported_char_count: post.reported_char_count,
    }
}

fn unreported(content: String) -> PostObject {
    PostObject {
        content,
        reported_char_count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<Platform> {
        vec![Platform::LinkedIn, Platform::Instagram, Platform::Twitter]
    }

    #[test]
    fn test_tier_order_strict_first() {
        let raw = r#"[{"platform": "LinkedIn", "content": "from json"}]"#;
        assert_eq!(recover(raw, &Platform::LinkedIn, &all()).0, Tier::StrictJson);
    }

    #[test]
    fn test_loose_tier_for_python_literal() {
        let raw = "[{'platform': 'Instagram', 'content': 'loose'}]";
        let (tier, post) = recover(raw, &Platform::Instagram, &all());
        assert_eq!(tier, Tier::LooseLiteral);
        assert_eq!(post.content, "loose");
    }

    #[test]
    fn test_valid_json_without_match_falls_through() {
        // Parses strictly but names another platform, so the header tier
        // ends up finding nothing useful and the whole text comes back.
        let raw = r#"{"platform": "Instagram", "note": "n/a"}"#;
        let (tier, _) = recover(raw, &Platform::LinkedIn, &all());
        assert_eq!(tier, Tier::FullFallback);
    }

    #[test]
    fn test_empty_structured_content_is_authoritative() {
        let raw = r#"{"platform": "Twitter", "content": ""}"#;
        let (tier, post) = recover(raw, &Platform::Twitter, &all());
        assert_eq!(tier, Tier::StrictJson);
        assert_eq!(post.content, "");
    }

    #[test]
    fn test_char_count_only_for_limited_platforms() {
        let raw = r#"{"platform": "LinkedIn", "content": "abc", "char_count": 3}"#;
        assert_eq!(extract_post(raw, &Platform::LinkedIn, &all()).char_count, None);
    }
}
