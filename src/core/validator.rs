//! Pure name/path validation. Never touches the file system.

use regex::Regex;
use std::sync::OnceLock;

/// Characters no path may contain, besides ASCII control characters.
const RESERVED_CHARS: &[char] = &['"', '<', '>', '|'];
const WILDCARD_CHARS: &[char] = &['*', '?'];

/// Matches a reserved device name as a whole path segment, optionally
/// followed by an extension (`CON`, `con.txt`, `aux/x`, `dir\LPT1`).
fn device_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(^|[\\/])(CON|PRN|AUX|NUL|CLOCK\$|COM[0-9]|LPT[0-9])(\.|[\\/]|$)")
            .expect("device name pattern is a valid regex")
    })
}

/// Checks a candidate name or path typed by the user.
///
/// Rejects reserved path characters and control characters, `*`/`?` unless
/// `allow_wildcards` is set, and any segment naming a reserved device.
pub fn is_valid(candidate: &str, allow_wildcards: bool) -> bool {
    let bad_char = candidate.chars().any(|c| {
        c.is_ascii_control()
            || RESERVED_CHARS.contains(&c)
            || (!allow_wildcards && WILDCARD_CHARS.contains(&c))
    });
    if bad_char {
        return false;
    }
    !device_name_pattern().is_match(candidate)
}

/// Returns `true` if the text should be treated as a live wildcard filter.
pub fn has_wildcards(text: &str) -> bool {
    text.contains(WILDCARD_CHARS)
}
