use super::chunk::DocumentId;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Text,
}

impl ContentType {
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Text => "text/plain",
        }
    }

    /// Infers the format from the leading bytes. Declared mime types from
    /// uploads are not trusted.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        let trimmed = match data.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(start) => &data[start..],
            None => &[],
        };

        if trimmed.starts_with(PDF_MAGIC) {
            Some(Self::Pdf)
        } else if !data.is_empty() && std::str::from_utf8(data).is_ok() {
            Some(Self::Text)
        } else {
            None
        }
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes,
        }
    }
}
