/// Best-effort isolation of a JSON payload from free-form model output.
///
/// Generation services routinely prepend acknowledgement prose, wrap the
/// answer in a markdown fence, or truncate output mid-stream. Each step
/// below is a fallback for the previous one; the result is a candidate
/// JSON text, not a parsed value. If it still fails to parse, that is the
/// caller's `MalformedContent` to surface.
pub fn extract_json(raw: &str) -> String {
    let mut cleaned = fenced_block(raw).unwrap_or_else(|| raw.trim());

    if !cleaned.starts_with('[') && !cleaned.starts_with('{') {
        let first_bracket = cleaned.find('[');
        let first_brace = cleaned.find('{');
        match (first_bracket, first_brace) {
            (Some(b), Some(c)) if b < c => cleaned = &cleaned[b..],
            (Some(b), None) => cleaned = &cleaned[b..],
            (_, Some(c)) => cleaned = &cleaned[c..],
            (None, None) => {}
        }
    }

    // Drop an unterminated trailing fragment from truncated output.
    if cleaned.starts_with('[') && !cleaned.ends_with(']') {
        if let Some(last) = cleaned.rfind(']') {
            cleaned = &cleaned[..=last];
        }
    } else if cleaned.starts_with('{') && !cleaned.ends_with('}') {
        if let Some(last) = cleaned.rfind('}') {
            cleaned = &cleaned[..=last];
        }
    }

    cleaned.to_string()
}

/// Interior of the first fenced code block, tolerating an optional
/// language tag such as ```json.
fn fenced_block(raw: &str) -> Option<&str> {
    let start = raw.find("```")?;
    let after_fence = &raw[start + 3..];
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}
