//! Pulls the JSON payload out of free-form completion text.

/// Strips markdown code fences and narrows the text to its JSON object.
///
/// The candidate runs from the first `{` to the last `}`. Text without such a
/// pair is returned trimmed so the JSON parser reports what it found.
pub fn json_candidate(raw: &str) -> &str {
    let text = strip_fences(raw);
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // drop the language tag on the opening fence, e.g. ```json
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches("json"),
        };
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
