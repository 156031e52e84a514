use pagewise::application::ports::Embedder;
use pagewise::domain::Embedding;
use pagewise::infrastructure::llm::LocalCandleEmbedder;

const MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

// Outputs are unit length, so the dot product is the cosine.
fn dot(a: &Embedding, b: &Embedding) -> f32 {
    a.values.iter().zip(&b.values).map(|(x, y)| x * y).sum()
}

#[tokio::test]
#[ignore = "downloads model weights from the Hugging Face Hub"]
async fn given_minilm_when_embedding_then_returns_unit_vectors_of_384_dimensions() {
    let embedder = tokio::task::spawn_blocking(|| LocalCandleEmbedder::new(MODEL_ID))
        .await
        .unwrap()
        .unwrap();

    let embeddings = embedder
        .embed_batch(&["The warehouse opens at seven.", "Refunds take two weeks."])
        .await
        .unwrap();

    assert_eq!(embeddings.len(), 2);
    for embedding in &embeddings {
        assert_eq!(embedding.dimensions(), 384);
        assert!((embedding.magnitude() - 1.0).abs() < 1e-3);
    }
}

#[tokio::test]
#[ignore = "downloads model weights from the Hugging Face Hub"]
async fn given_related_texts_when_embedding_then_they_score_higher_than_unrelated() {
    let embedder = tokio::task::spawn_blocking(|| LocalCandleEmbedder::new(MODEL_ID))
        .await
        .unwrap()
        .unwrap();

    let question = embedder.embed("When does the warehouse open?").await.unwrap();
    let related = embedder.embed("The warehouse opens at seven in the morning.").await.unwrap();
    let unrelated = embedder.embed("Photosynthesis converts light into energy.").await.unwrap();

    assert!(dot(&question, &related) > dot(&question, &unrelated));
}
