use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document, Page};

use super::text_sanitizer::sanitize_extracted_text;

/// Extracts per-page text from PDF uploads. Bytes are staged in a scratch
/// file for the parser; the system temp directory is used unless another
/// directory is given.
#[derive(Debug, Default)]
pub struct PdfAdapter {
    scratch_dir: Option<PathBuf>,
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scratch_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: Some(dir.into()),
        }
    }

    fn extract_pages(path: &Path) -> Result<Vec<Page>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let page_number = (page_index + 1) as u32;
            let raw = match doc.extract_text(page_index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page = page_number, error = %e, "Skipping unreadable page");
                    continue;
                }
            };

            let text = sanitize_extracted_text(&raw);
            if !text.is_empty() {
                pages.push(Page::new(page_number, text));
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn load(&self, data: &[u8], document: &Document) -> Result<Vec<Page>, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        // One uniquely named file per request; deleted when dropped.
        let mut builder = tempfile::Builder::new();
        builder.prefix("pagewise-").suffix(".pdf");
        let mut temp_file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
            })?;

        temp_file
            .write_all(data)
            .and_then(|()| temp_file.flush())
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
            })?;

        // The file moves into the blocking task so it is removed when parsing
        // ends, including on parser errors and panics.
        let pages = tokio::task::spawn_blocking(move || {
            let pages = Self::extract_pages(temp_file.path());
            drop(temp_file);
            pages
        })
        .await
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(pages)
    }
}
