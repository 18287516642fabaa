// Header tier: plain-text sections such as "LinkedIn Post:\n...\n\nInstagram Post:\n...".
//
// A platform's section starts right after its header and runs to the nearest
// header of any other requested platform. Headers only count at word
// boundaries, so "X:" is not found inside "XY:" and "Twitter" is not found
// inside "Twitterverse".

use crate::platform::Platform;

/// Header forms in the order they are tried. The first form found anywhere
/// in the text wins, regardless of where other forms occur.
fn header_forms(name: &str) -> [String; 4] {
    [
        format!("{name} Post:"),
        format!("Platform: {name}"),
        format!("{name}:"),
        name.to_string(),
    ]
}

/// The text between `platform`'s header and the next other-platform header.
///
/// `all_platforms` bounds the section; the target itself may or may not be
/// listed. Returns the section trimmed of surrounding whitespace.
pub fn find_section<'a>(text: &'a str, platform: &Platform, all_platforms: &[Platform]) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets identical to `text`.
    let lower = text.to_ascii_lowercase();

    let (_, body_start) = header_forms(platform.name())
        .iter()
        .find_map(|header| find_bounded(&lower, &header.to_ascii_lowercase(), 0))?;

    let body_end = all_platforms
        .iter()
        .filter(|other| !other.matches(platform.name()))
        .flat_map(|other| header_forms(other.name()))
        .filter_map(|header| find_bounded(&lower, &header.to_ascii_lowercase(), body_start))
        .map(|(start, _)| start)
        .min()
        .unwrap_or(text.len());

    Some(text[body_start..body_end].trim())
}

/// First word-bounded occurrence of `needle` in `haystack` at or after `from`,
/// as a `(start, end)` byte range.
fn find_bounded(haystack: &str, needle: &str, from: usize) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let mut search_from = from;
    while let Some(offset) = haystack.get(search_from..)?.find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        if is_word_bounded(haystack, needle, start, end) {
            return Some((start, end));
        }
        // Step past the first char of this rejected match.
        search_from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// An edge of the needle that is a word character must not touch another
/// word character in the haystack.
fn is_word_bounded(haystack: &str, needle: &str, start: usize, end: usize) -> bool {
    let opens_word = needle.chars().next().is_some_and(is_word_char);
    let closes_word = needle.chars().next_back().is_some_and(is_word_char);

    let before_ok = !opens_word
        || haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
    let after_ok = !closes_word || haystack[end..].chars().next().map_or(true, |c| !is_word_char(c));

    before_ok && after_ok
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
