use pagewise::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_ligatures_when_sanitizing_then_decomposes_them() {
    assert_eq!(sanitize_extracted_text("ﬁnal oﬀer"), "final offer");
}

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_rejoins_word() {
    assert_eq!(
        sanitize_extracted_text("infor-\nmation retrieval"),
        "information retrieval"
    );
}

#[test]
fn given_runs_of_spaces_when_sanitizing_then_collapses_them() {
    assert_eq!(sanitize_extracted_text("  too    many\tspaces "), "too many spaces");
}

#[test]
fn given_multiple_blank_lines_when_sanitizing_then_keeps_one_paragraph_break() {
    assert_eq!(
        sanitize_extracted_text("first paragraph\n\n\n\nsecond paragraph"),
        "first paragraph\n\nsecond paragraph"
    );
}

#[test]
fn given_single_line_breaks_when_sanitizing_then_preserves_them() {
    assert_eq!(sanitize_extracted_text("line one\nline two"), "line one\nline two");
}

#[test]
fn given_whitespace_only_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text(" \n \t\n"), "");
}
