use pagewise::domain::{ContentType, Document};

#[test]
fn given_pdf_magic_when_sniffing_then_detects_pdf() {
    assert_eq!(ContentType::sniff(b"%PDF-1.7\n..."), Some(ContentType::Pdf));
}

#[test]
fn given_leading_whitespace_before_magic_when_sniffing_then_detects_pdf() {
    assert_eq!(ContentType::sniff(b"\r\n %PDF-1.4"), Some(ContentType::Pdf));
}

#[test]
fn given_utf8_text_when_sniffing_then_detects_text() {
    assert_eq!(
        ContentType::sniff("Grüße aus Köln".as_bytes()),
        Some(ContentType::Text)
    );
}

#[test]
fn given_binary_bytes_when_sniffing_then_returns_none() {
    assert_eq!(ContentType::sniff(&[0x89, 0x50, 0x4e, 0x47, 0xff]), None);
}

#[test]
fn given_empty_bytes_when_sniffing_then_returns_none() {
    assert_eq!(ContentType::sniff(b""), None);
}

#[test]
fn given_document_when_created_then_keeps_metadata() {
    let document = Document::new("report.pdf".to_string(), ContentType::Pdf, 2048);
    assert_eq!(document.filename, "report.pdf");
    assert_eq!(document.content_type.as_mime(), "application/pdf");
    assert_eq!(document.size_bytes, 2048);
}
