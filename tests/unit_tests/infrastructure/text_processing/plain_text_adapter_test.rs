use pagewise::application::ports::{FileLoader, FileLoaderError};
use pagewise::domain::{ContentType, Document};
use pagewise::infrastructure::text_processing::PlainTextAdapter;

fn text_document(len: usize) -> Document {
    Document::new("notes.txt".to_string(), ContentType::Text, len as u64)
}

#[tokio::test]
async fn given_utf8_text_when_loading_then_returns_single_page() {
    let data = "Line one\nLine two".as_bytes();

    let pages = PlainTextAdapter.load(data, &text_document(data.len())).await.unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[0].text, "Line one\nLine two");
}

#[tokio::test]
async fn given_invalid_utf8_when_loading_then_returns_extraction_failed() {
    let data = [0x66, 0x6f, 0xff, 0x6f];

    let result = PlainTextAdapter.load(&data, &text_document(data.len())).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_blank_text_when_loading_then_returns_no_text_found() {
    let data = b" \n\t ";

    let result = PlainTextAdapter.load(data, &text_document(data.len())).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}

#[tokio::test]
async fn given_pdf_document_when_loading_as_text_then_returns_unsupported() {
    let document = Document::new("report.pdf".to_string(), ContentType::Pdf, 4);

    let result = PlainTextAdapter.load(b"%PDF", &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}
