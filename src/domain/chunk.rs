use uuid::Uuid;

/// A window of the concatenated page text of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub document_id: DocumentId,
    pub pages: PageRange,
    /// Character offset of the first character within the concatenated text.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Inclusive range of 1-based page numbers a chunk was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

impl PageRange {
    pub fn new(first: u32, last: u32) -> Self {
        Self {
            first: first.min(last),
            last: first.max(last),
        }
    }

    pub fn single(page: u32) -> Self {
        Self::new(page, page)
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.first..=self.last).contains(&page)
    }
}

impl Chunk {
    pub fn new(text: String, document_id: DocumentId, pages: PageRange, offset: usize) -> Self {
        Self {
            id: ChunkId::new(),
            text,
            document_id,
            pages,
            offset,
        }
    }

    /// Length in characters, the unit chunk sizes are expressed in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
