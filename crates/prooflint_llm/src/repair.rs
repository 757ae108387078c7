//! Tolerant parsing of model responses.
//!
//! Models asked for strict JSON still wrap it in code fences, use curly
//! quotes, or truncate mid-structure. Rather than discard the whole
//! batch, a short repair chain runs before giving up: strict parse, a
//! repaired variant, then both again on the contents of a code fence.

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("invalid trailing comma pattern"));

/// Parses model output as JSON, repairing common damage on the way.
///
/// Returns `None` only when every step fails.
pub fn parse_model_json(raw: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some(value);
    }
    if let Ok(value) = serde_json::from_str(&repair(raw)) {
        return Some(value);
    }
    if let Some(inner) = strip_code_fence(raw) {
        if let Ok(value) = serde_json::from_str(inner) {
            return Some(value);
        }
        if let Ok(value) = serde_json::from_str(&repair(inner)) {
            return Some(value);
        }
    }
    None
}

/// Straightens curly quotes, drops trailing commas, closes unbalanced
/// strings and brackets.
fn repair(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    for (curly, straight) in [("\u{201c}", "\""), ("\u{201d}", "\""), ("\u{2018}", "'"), ("\u{2019}", "'")] {
        text = text.replace(curly, straight);
    }
    let text = TRAILING_COMMA_RE.replace_all(&text, "$1").into_owned();
    balance(&text)
}

fn balance(text: &str) -> String {
    let mut closers = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => closers.push('}'),
            '[' if !in_string => closers.push(']'),
            '}' | ']' if !in_string => {
                closers.pop();
            }
            _ => {}
        }
    }

    let mut repaired = text.to_string();
    if in_string {
        repaired.push('"');
    }
    while let Some(closer) = closers.pop() {
        repaired.push(closer);
    }
    repaired
}

fn strip_code_fence(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let rest = trimmed.strip_prefix("```")?;
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    Some(rest.trim())
}
