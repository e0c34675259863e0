//! Recovering a JSON document from model text.
//!
//! With `responseMimeType = application/json` Gemini almost always returns a
//! bare JSON document, but older models and long prompts still produce the
//! occasional ```` ```json ```` fence or a sentence before the payload. These
//! rules run in order and the first one that parses wins:
//!
//! 1. the trimmed text as-is (BOM and zero-width characters removed)
//! 2. the body of the first fenced code block
//! 3. the outermost `{ … }` or `[ … ]` slice

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static RE_FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*\n?(.*?)\n?```").unwrap());

/// Parse the first JSON document found in `text`.
pub fn parse_model_json(text: &str) -> Option<Value> {
    let cleaned = strip_invisible(text);
    let t = cleaned.trim();
    if t.is_empty() {
        return None;
    }

    if let Ok(v) = serde_json::from_str::<Value>(t) {
        return Some(v);
    }

    if let Some(caps) = RE_FENCED_BLOCK.captures(t) {
        if let Ok(v) = serde_json::from_str::<Value>(caps[1].trim()) {
            return Some(v);
        }
    }

    // Whichever bracket opens first is the outermost document.
    let mut slices: Vec<&str> = [outer_slice(t, '{', '}'), outer_slice(t, '[', ']')]
        .into_iter()
        .flatten()
        .collect();
    slices.sort_by_key(|s| s.as_ptr() as usize);
    slices
        .into_iter()
        .find_map(|s| serde_json::from_str::<Value>(s).ok())
}

/// Shorten model text for error messages.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}

fn strip_invisible(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{FEFF}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}'))
        .collect()
}

fn outer_slice(t: &str, open: char, close: char) -> Option<&str> {
    let start = t.find(open)?;
    let end = t.rfind(close)?;
    (start < end).then(|| &t[start..=end])
}
