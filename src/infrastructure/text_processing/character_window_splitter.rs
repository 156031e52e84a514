use crate::application::ports::{ConfigError, TextSplitter};
use crate::domain::{Chunk, DocumentId, PAGE_SEPARATOR, Page, PageRange};

/// Fixed-size character windows over the concatenated page text. Each window
/// repeats the last `chunk_overlap` characters of its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterWindowSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl CharacterWindowSplitter {
    pub const DEFAULT_CHUNK_SIZE: usize = 500;
    pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if chunk_overlap >= chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                chunk_size,
                overlap: chunk_overlap,
            });
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for CharacterWindowSplitter {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            chunk_overlap: Self::DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Concatenated text plus the character offset where each page begins.
struct PageText {
    chars: Vec<char>,
    page_starts: Vec<(usize, u32)>,
}

impl PageText {
    fn concatenate(pages: &[Page]) -> Self {
        let mut chars = Vec::new();
        let mut page_starts = Vec::with_capacity(pages.len());

        for page in pages.iter().filter(|p| !p.text.is_empty()) {
            if !page_starts.is_empty() {
                chars.extend(PAGE_SEPARATOR.chars());
            }
            page_starts.push((chars.len(), page.number));
            chars.extend(page.text.chars());
        }

        Self { chars, page_starts }
    }

    /// Separator characters belong to the page before them.
    fn page_at(&self, position: usize) -> u32 {
        let following = self
            .page_starts
            .partition_point(|(start, _)| *start <= position);
        self.page_starts[following.saturating_sub(1)].1
    }
}

impl TextSplitter for CharacterWindowSplitter {
    fn split(&self, pages: &[Page], document_id: DocumentId) -> Vec<Chunk> {
        let text = PageText::concatenate(pages);
        let total_len = text.chars.len();
        let mut chunks = Vec::new();

        if total_len == 0 {
            return chunks;
        }

        let mut offset = 0;
        loop {
            let end = (offset + self.chunk_size).min(total_len);
            let chunk_text: String = text.chars[offset..end].iter().collect();
            let page_range = PageRange::new(text.page_at(offset), text.page_at(end - 1));

            chunks.push(Chunk::new(chunk_text, document_id, page_range, offset));

            if end == total_len {
                break;
            }
            offset += self.step();
        }

        chunks
    }
}
