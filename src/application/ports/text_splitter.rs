use crate::domain::{Chunk, DocumentId, Page};

/// Cuts the concatenated text of `pages` into chunks.
///
/// Splitting cannot fail: parameters are validated when the splitter is
/// constructed.
pub trait TextSplitter: Send + Sync {
    fn split(&self, pages: &[Page], document_id: DocumentId) -> Vec<Chunk>;
}
