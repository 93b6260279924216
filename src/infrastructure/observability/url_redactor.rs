const MAX_VISIBLE_LENGTH: usize = 80;

/// Makes a URL safe to log.
///
/// Signed URLs carry their credential in the query string, so everything from
/// `?` on is dropped. Long paths are shortened.
pub fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let (base, had_query) = match trimmed.split_once('?') {
        Some((base, _)) => (base, true),
        None => (trimmed, false),
    };

    let mut redacted = if base.chars().count() > MAX_VISIBLE_LENGTH {
        let visible: String = base.chars().take(MAX_VISIBLE_LENGTH).collect();
        format!("{}...", visible)
    } else {
        base.to_string()
    };

    if had_query {
        redacted.push_str("?[REDACTED]");
    }

    redacted
}
