mod chunk;
mod document;
mod embedding;
mod page;
mod prompt;

pub use chunk::{Chunk, ChunkId, DocumentId, PageRange};
pub use document::{ContentType, Document};
pub use embedding::Embedding;
pub use page::{PAGE_SEPARATOR, Page};
pub use prompt::Prompt;
