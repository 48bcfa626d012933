//! Parsing structured output from generation responses.
//!
//! Providers asked for JSON usually return JSON, but not always bare: the
//! text may be wrapped in a markdown fence or surrounded by prose. Parsing
//! is done in two tiers so that the cheap strict path handles the common
//! case and the lenient path strips those artifacts.

use serde_json::Value;
use viewfinder_error::JsonError;

/// Parse the whole response as JSON, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns a [`JsonError`] carrying a preview of the text.
///
/// # Examples
///
/// ```
/// use viewfinder_pipeline::strict_parse;
///
/// assert!(strict_parse(" {\"a\": 1} ").is_ok());
/// assert!(strict_parse("```json\n{\"a\": 1}\n```").is_err());
/// ```
#[track_caller]
pub fn strict_parse(text: &str) -> Result<Value, JsonError> {
    let trimmed = text.trim().trim_start_matches('\u{feff}');
    serde_json::from_str(trimmed).map_err(|e| JsonError::with_payload(e.to_string(), text))
}

/// Strip formatting artifacts and parse whatever JSON remains.
///
/// Tries, in order: the contents of a fenced code block, the first balanced
/// `{...}` or `[...]` span (whichever opens first), then the raw text.
///
/// # Errors
///
/// Returns a [`JsonError`] when no candidate parses.
///
/// # Examples
///
/// ```
/// use viewfinder_pipeline::lenient_parse;
///
/// let response = "Sure! Here is the plan:\n```json\n{\"shots\": []}\n```\nEnjoy!";
/// let value = lenient_parse(response).unwrap();
/// assert!(value["shots"].is_array());
/// ```
#[track_caller]
pub fn lenient_parse(text: &str) -> Result<Value, JsonError> {
    let mut candidates = Vec::new();
    if let Some(fenced) = extract_from_code_block(text) {
        candidates.push(fenced);
    }
    if let Some(span) = extract_first_structure(text) {
        candidates.push(span);
    }

    for candidate in &candidates {
        if let Ok(value) = strict_parse(candidate) {
            return Ok(value);
        }
        // Fenced content can itself carry prose around the JSON.
        if let Some(inner) = extract_first_structure(candidate) {
            if let Ok(value) = strict_parse(&inner) {
                return Ok(value);
            }
        }
    }

    Err(JsonError::with_payload(
        format!(
            "no parseable JSON found in response of {} bytes",
            text.len()
        ),
        text,
    ))
}

/// Contents of the first fenced code block, with or without a language tag.
///
/// An unterminated fence (truncated response) yields everything after it.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let after_fence = start + 3;
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    match response[content_start..].find("```") {
        Some(end) => Some(response[content_start..content_start + end].trim().to_string()),
        None => Some(response[content_start..].trim().to_string()),
    }
}

/// The first balanced object or array, whichever opens first.
fn extract_first_structure(response: &str) -> Option<String> {
    let brace = response.find('{');
    let bracket = response.find('[');
    match (brace, bracket) {
        (Some(b), Some(k)) if k < b => extract_balanced(response, '[', ']')
            .or_else(|| extract_balanced(response, '{', '}')),
        (Some(_), _) => extract_balanced(response, '{', '}')
            .or_else(|| extract_balanced(response, '[', ']')),
        (None, Some(_)) => extract_balanced(response, '[', ']'),
        (None, None) => None,
    }
}

/// Text between the first `open` and its matching `close`, skipping
/// delimiters inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
