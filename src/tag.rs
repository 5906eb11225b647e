//! Struct-tag mini-parser.
//!
//! Scans the conventional `key:"value,modifiers"` tag grammar directly,
//! without reflection. Only a fixed set of serialization conventions is
//! recognized; unknown keys are skipped and malformed input degrades to
//! an empty mapping, never an error.

use std::collections::BTreeMap;

/// Tag conventions that may override a field's display name.
pub const RECOGNIZED_KEYS: &[&str] = &["json", "xml", "yaml", "db"];

/// Parse a raw struct tag into recognized key/value pairs.
///
/// Surrounding backticks are trimmed. For each recognized key only the
/// first comma-delimited segment of the value is kept — modifiers such
/// as `omitempty` are discarded here. The first occurrence of a key wins.
pub fn parse_tag(raw: &str) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    let mut rest = raw.trim().trim_matches('`');

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        // Key runs up to the ':' introducing the quoted value.
        let Some(colon) = rest.find(':') else { break };
        let key = &rest[..colon];
        if key.is_empty() || key.contains(|c: char| c.is_whitespace() || c == '"') {
            break;
        }
        rest = &rest[colon + 1..];
        let Some(after_quote) = rest.strip_prefix('"') else {
            break;
        };
        let Some((value, remainder)) = read_quoted(after_quote) else {
            break;
        };
        rest = remainder;

        if RECOGNIZED_KEYS.contains(&key) && !tags.contains_key(key) {
            let first = value.split(',').next().unwrap_or("").to_string();
            tags.insert(key.to_string(), first);
        }
    }

    tags
}

/// Read up to the closing quote, honoring `\"` and `\\` escapes.
/// Returns the unescaped value and the text after the closing quote.
fn read_quoted(s: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            '"' => return Some((value, &s[i + 1..])),
            _ => value.push(c),
        }
    }
    None
}
