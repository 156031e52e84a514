use std::cmp::Ordering;

use crate::application::ports::{ConfigError, SearchResult, VectorIndex, VectorIndexError};
use crate::domain::{Chunk, Embedding};

/// Exact cosine-similarity search over a single document's chunks.
///
/// Vectors are normalized once at build time so a query costs one dot
/// product per chunk.
pub struct InMemoryVectorIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

struct IndexEntry {
    chunk: Chunk,
    unit_vector: Vec<f32>,
}

fn unit_vector(embedding: &Embedding) -> Vec<f32> {
    let magnitude = embedding.magnitude();
    if magnitude == 0.0 {
        return vec![0.0; embedding.dimensions()];
    }
    embedding.values.iter().map(|v| v / magnitude).collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl VectorIndex for InMemoryVectorIndex {
    fn build(chunks: Vec<Chunk>, embeddings: Vec<Embedding>) -> Result<Self, VectorIndexError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorIndexError::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let dimensions = embeddings.first().map_or(0, Embedding::dimensions);
        let mut entries = Vec::with_capacity(chunks.len());

        for (chunk, embedding) in chunks.into_iter().zip(embeddings.iter()) {
            if embedding.dimensions() != dimensions {
                return Err(VectorIndexError::DimensionMismatch {
                    expected: dimensions,
                    actual: embedding.dimensions(),
                });
            }
            entries.push(IndexEntry {
                chunk,
                unit_vector: unit_vector(embedding),
            });
        }

        Ok(Self {
            dimensions,
            entries,
        })
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn query(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorIndexError> {
        if top_k == 0 {
            return Err(ConfigError::ZeroTopK.into());
        }
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        if embedding.dimensions() != self.dimensions {
            return Err(VectorIndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.dimensions(),
            });
        }

        let query = unit_vector(embedding);
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                let score = dot(&entry.unit_vector, &query);
                (position, if score.is_nan() { f32::NEG_INFINITY } else { score })
            })
            .collect();

        // Stable sort: equal scores stay in insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(position, score)| SearchResult {
                chunk: self.entries[position].chunk.clone(),
                score,
            })
            .collect())
    }
}
