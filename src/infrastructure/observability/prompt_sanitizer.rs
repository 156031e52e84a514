use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 100;

static SECRET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(bearer\s+|(?:api_key|apikey|key|password|secret|token)=)[^\s&"']+"#)
        .expect("static pattern is valid")
});

/// Shortens user text for log fields and masks anything that looks like a
/// credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let redacted = SECRET_PATTERN.replace_all(trimmed, "${1}[REDACTED]");
    let total_chars = redacted.chars().count();

    if total_chars > MAX_VISIBLE_CHARS {
        let visible: String = redacted.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{visible}... ({total_chars} chars total)")
    } else {
        redacted.into_owned()
    }
}
