use std::collections::HashSet;

/// Trims and neutralizes HTML/script content in user-supplied text.
///
/// Absent input collapses to the empty string, so callers always get a usable
/// value. The output is safe to embed in rendered pages and stable under
/// repeated sanitization.
pub fn sanitize(input: Option<&str>) -> String {
    let Some(text) = input else {
        return String::new();
    };

    // Empty tag allow-list: markup is stripped entirely, script and style
    // bodies are dropped, remaining text is entity-escaped.
    let mut cleaner = ammonia::Builder::default();
    cleaner.tags(HashSet::new());

    let cleaned = cleaner.clean(text.trim()).to_string();
    // Stripping a leading tag can expose fresh whitespace.
    cleaned.trim().to_string()
}
