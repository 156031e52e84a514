use pagewise::domain::{Chunk, DocumentId, PageRange};

#[test]
fn given_reversed_bounds_when_creating_page_range_then_orders_them() {
    let range = PageRange::new(5, 2);
    assert_eq!(range.first, 2);
    assert_eq!(range.last, 5);
}

#[test]
fn given_page_range_when_checking_contains_then_bounds_are_inclusive() {
    let range = PageRange::new(2, 4);
    assert!(range.contains(2));
    assert!(range.contains(4));
    assert!(!range.contains(1));
    assert!(!range.contains(5));
}

#[test]
fn given_multibyte_text_when_measuring_chunk_then_counts_characters() {
    let chunk = Chunk::new("naïve café".to_string(), DocumentId::new(), PageRange::single(1), 0);
    assert_eq!(chunk.char_len(), 10);
}

#[test]
fn given_two_chunks_when_created_then_ids_differ() {
    let document_id = DocumentId::new();
    let a = Chunk::new("a".to_string(), document_id, PageRange::single(1), 0);
    let b = Chunk::new("a".to_string(), document_id, PageRange::single(1), 0);
    assert_ne!(a.id, b.id);
}
