//! Helpers for pulling structured JSON out of model output.

/// Strip Markdown code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Extract the outermost `{...}` object from surrounding prose.
///
/// Models frequently wrap JSON in commentary; taking the span from the first
/// `{` to the last `}` recovers the object without a full parse.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start > end {
        return None;
    }
    Some(&text[start..=end])
}
