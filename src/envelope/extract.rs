/// Returns the leading JSON array of `text`, ignoring whatever follows it.
///
/// The text must start with `[`. Brackets are counted outside string
/// literals only, and `\` escapes inside strings are honored, so `"]"` in a
/// value does not close the array. Returns `None` when the array never
/// closes.
pub fn extract_json_array(text: &str) -> Option<&str> {
    if !text.starts_with('[') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    // Every delimiter is ASCII, so byte positions are char boundaries.
    for (index, byte) in text.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'[' if !in_string => depth += 1,
            b']' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[..=index]);
                }
            }
            _ => {}
        }
    }

    None
}
