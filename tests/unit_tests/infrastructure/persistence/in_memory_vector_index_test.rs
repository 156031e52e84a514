use pagewise::application::ports::{ConfigError, VectorIndex, VectorIndexError};
use pagewise::domain::{Chunk, DocumentId, Embedding, PageRange};
use pagewise::infrastructure::persistence::InMemoryVectorIndex;

fn chunks(texts: &[&str]) -> Vec<Chunk> {
    let document_id = DocumentId::new();
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Chunk::new(t.to_string(), document_id, PageRange::single(1), i * 10))
        .collect()
}

#[test]
fn given_indexed_chunks_when_querying_then_returns_most_similar_first() {
    let index = InMemoryVectorIndex::build(
        chunks(&["north", "east", "north-east"]),
        vec![
            Embedding::new(vec![0.0, 1.0]),
            Embedding::new(vec![1.0, 0.0]),
            Embedding::new(vec![1.0, 1.0]),
        ],
    )
    .unwrap();

    let results = index.query(&Embedding::new(vec![0.1, 1.0]), 3).unwrap();

    let texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
    assert_eq!(texts, vec!["north", "north-east", "east"]);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn given_equal_scores_when_querying_then_keeps_insertion_order() {
    let index = InMemoryVectorIndex::build(
        chunks(&["first", "second", "third"]),
        vec![Embedding::new(vec![1.0, 0.0]); 3],
    )
    .unwrap();

    let results = index.query(&Embedding::new(vec![1.0, 0.0]), 2).unwrap();

    let texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[test]
fn given_k_larger_than_index_when_querying_then_returns_every_chunk() {
    let index = InMemoryVectorIndex::build(
        chunks(&["only"]),
        vec![Embedding::new(vec![1.0, 0.0])],
    )
    .unwrap();

    let results = index.query(&Embedding::new(vec![1.0, 0.0]), 10).unwrap();

    assert_eq!(results.len(), 1);
}

#[test]
fn given_zero_k_when_querying_then_returns_config_error() {
    let index = InMemoryVectorIndex::build(
        chunks(&["only"]),
        vec![Embedding::new(vec![1.0, 0.0])],
    )
    .unwrap();

    let result = index.query(&Embedding::new(vec![1.0, 0.0]), 0);

    assert!(matches!(
        result,
        Err(VectorIndexError::Config(ConfigError::ZeroTopK))
    ));
}

#[test]
fn given_empty_index_when_querying_then_returns_empty() {
    let index = InMemoryVectorIndex::build(Vec::new(), Vec::new()).unwrap();

    assert!(index.is_empty());
    assert!(index.query(&Embedding::new(vec![1.0]), 4).unwrap().is_empty());
}

#[test]
fn given_mismatched_lengths_when_building_then_returns_error() {
    let result = InMemoryVectorIndex::build(chunks(&["a", "b"]), vec![Embedding::new(vec![1.0])]);

    assert!(matches!(
        result,
        Err(VectorIndexError::LengthMismatch {
            chunks: 2,
            embeddings: 1
        })
    ));
}

#[test]
fn given_mixed_dimensions_when_building_then_returns_error() {
    let result = InMemoryVectorIndex::build(
        chunks(&["a", "b"]),
        vec![Embedding::new(vec![1.0, 0.0]), Embedding::new(vec![1.0])],
    );

    assert!(matches!(
        result,
        Err(VectorIndexError::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn given_query_of_wrong_dimension_when_querying_then_returns_error() {
    let index = InMemoryVectorIndex::build(
        chunks(&["a"]),
        vec![Embedding::new(vec![1.0, 0.0])],
    )
    .unwrap();

    let result = index.query(&Embedding::new(vec![1.0, 0.0, 0.0]), 1);

    assert!(matches!(result, Err(VectorIndexError::DimensionMismatch { .. })));
}
