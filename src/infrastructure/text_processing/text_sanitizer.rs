use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static BROKEN_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").expect("static pattern is valid")
});

/// Cleans text pulled out of a PDF page: NFKC normalization (ligatures become
/// plain letters), words split across lines by a hyphen are re-joined, blank
/// line runs become one paragraph break and whitespace inside a line
/// collapses to single spaces.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let joined = BROKEN_WORD.replace_all(&normalized, "$head$tail");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for line in joined.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            flush_paragraph(&mut lines, &mut paragraphs);
        } else {
            lines.push(words.join(" "));
        }
    }
    flush_paragraph(&mut lines, &mut paragraphs);

    paragraphs.join("\n\n")
}

fn flush_paragraph(lines: &mut Vec<String>, paragraphs: &mut Vec<String>) {
    if !lines.is_empty() {
        paragraphs.push(lines.join("\n"));
        lines.clear();
    }
}
